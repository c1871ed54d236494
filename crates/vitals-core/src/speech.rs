//! Speech collaborators.
//!
//! Recognition and synthesis live outside this crate. The traits here are
//! the seams: a [`Transcriber`] hands over finalized utterances, and a
//! [`SpeechSynthesizer`] reads text back. Neither is required to succeed for
//! a reading to be saved.
//!
//! [`MemorySynthesizer`] and [`ScriptedTranscriber`] are in-memory
//! implementations for tests and dry runs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

/// Failure reported by a speech collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    /// The platform has no speech engine.
    #[error("Speech engine unavailable: {0}")]
    Unavailable(String),

    /// The engine was available but the request failed.
    #[error("Speech request failed: {0}")]
    Failed(String),
}

/// Reads text aloud.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `text`. Returns once the utterance is queued or finished.
    async fn speak(&self, text: &str) -> Result<(), SpeechError>;
}

/// Supplies finalized transcripts, one per utterance.
#[async_trait]
pub trait Transcriber: Send {
    /// Wait for the next utterance. `Ok(None)` means the input ended.
    async fn next_transcript(&mut self) -> Result<Option<String>, SpeechError>;
}

/// A synthesizer that keeps everything it was asked to say.
#[derive(Debug, Default)]
pub struct MemorySynthesizer {
    spoken: RwLock<Vec<String>>,
    should_fail: AtomicBool,
}

impl MemorySynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `speak` call fail.
    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Everything spoken so far, oldest first.
    pub async fn spoken(&self) -> Vec<String> {
        self.spoken.read().await.clone()
    }

    pub async fn last(&self) -> Option<String> {
        self.spoken.read().await.last().cloned()
    }
}

#[async_trait]
impl SpeechSynthesizer for MemorySynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(SpeechError::Failed("synthesizer set to fail".into()));
        }
        self.spoken.write().await.push(text.to_string());
        Ok(())
    }
}

/// A transcriber that replays a fixed list of utterances.
#[derive(Debug, Default)]
pub struct ScriptedTranscriber {
    lines: VecDeque<String>,
}

impl ScriptedTranscriber {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Transcriber for ScriptedTranscriber {
    async fn next_transcript(&mut self) -> Result<Option<String>, SpeechError> {
        Ok(self.lines.pop_front())
    }
}
