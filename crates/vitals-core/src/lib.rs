//! Core logic for a voice-driven health log.
//!
//! This crate sits between speech and storage:
//!
//! - [`extract`] finds glucose and blood-pressure readings in transcripts
//! - [`Session`] owns the database handle with an explicit open/close lifecycle
//! - [`VoiceInput`] saves recognized readings and speaks confirmations
//! - [`phrases`] builds the spoken confirmation and summary text
//!
//! Speech recognition and synthesis are external; plug them in through the
//! [`Transcriber`] and [`SpeechSynthesizer`] traits.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use vitals_core::{MemorySynthesizer, Outcome, Session, VoiceInput};
//!
//! #[tokio::main]
//! async fn main() -> vitals_core::Result<()> {
//!     let session = Arc::new(Session::open_in_memory()?);
//!     let synth = Arc::new(MemorySynthesizer::new());
//!     let voice = VoiceInput::new(session.clone(), synth.clone());
//!
//!     let outcome = voice.handle_transcript("血糖6.4，血压130 85").await;
//!     assert!(matches!(outcome, Outcome::Saved { .. }));
//!
//!     let stats = session.stats(7).await?;
//!     assert_eq!(stats.glucose.count, 1);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod extract;
pub mod phrases;
pub mod session;
pub mod speech;
pub mod voice;

pub use error::{Error, Result};
pub use extract::{Extraction, PressureOutcome, extract_detailed, parse};
pub use session::{SavedIds, Session};
pub use speech::{
    MemorySynthesizer, ScriptedTranscriber, SpeechError, SpeechSynthesizer, Transcriber,
};
pub use voice::{Outcome, VoiceInput};

// Re-export the lower layers so callers need only this crate.
pub use vitals_store;
pub use vitals_types;
