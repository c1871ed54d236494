//! Error types for vitals-core.
//!
//! Extraction never fails: a transcript with nothing recognizable yields an
//! empty [`PartialReading`](vitals_types::PartialReading), which callers
//! report as "not understood" rather than as a fault.
//!
//! | Error | Meaning | Recovery |
//! |-------|---------|----------|
//! | [`Error::Store`] with `StorageUnavailable` | Database could not be opened | Fatal for the session |
//! | [`Error::Store`] with `WriteFailed` | One save failed | Keep the transcript, let the user retry |
//! | [`Error::SessionClosed`] | Operation after [`Session::close`](crate::Session::close) | Open a new session |
//! | [`Error::AlreadyListening`] | A second listen loop was started | Wait for the first to finish |
//! | [`Error::Speech`] | A speech collaborator failed | Logged; never blocks saving |
//!
//! Nothing here is retried automatically.

use thiserror::Error;

use crate::speech::SpeechError;

/// Errors that can occur in vitals-core.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage layer error.
    #[error(transparent)]
    Store(#[from] vitals_store::Error),

    /// The session was closed before the operation ran.
    #[error("Session is closed")]
    SessionClosed,

    /// Listening was started while already listening.
    #[error("Already listening")]
    AlreadyListening,

    /// A speech collaborator failed.
    #[error(transparent)]
    Speech(#[from] SpeechError),
}

impl Error {
    /// Returns `true` if the underlying store could not be opened.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_storage_unavailable())
    }

    /// Returns `true` if a save failed.
    pub fn is_write_failed(&self) -> bool {
        matches!(self, Error::Store(e) if e.is_write_failed())
    }
}

/// Result type alias using vitals-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
