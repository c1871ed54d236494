//! Terminal stand-ins for the speech collaborators.
//!
//! There is no speech engine in a terminal: "speaking" prints the phrase to
//! stderr, and transcripts arrive one per line on stdin.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

use vitals_core::{SpeechError, SpeechSynthesizer, Transcriber};

/// Prints each phrase to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

#[async_trait]
impl SpeechSynthesizer for ConsoleSynthesizer {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        eprintln!("» {}", text);
        Ok(())
    }
}

/// Discards every phrase.
#[derive(Debug, Default)]
pub struct SilentSynthesizer;

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn speak(&self, _text: &str) -> Result<(), SpeechError> {
        Ok(())
    }
}

/// Reads one transcript per line from any async reader.
pub struct LineTranscriber<R> {
    lines: Lines<R>,
}

impl LineTranscriber<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> LineTranscriber<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> Transcriber for LineTranscriber<R> {
    async fn next_transcript(&mut self) -> Result<Option<String>, SpeechError> {
        self.lines
            .next_line()
            .await
            .map_err(|e| SpeechError::Failed(format!("Failed to read input: {e}")))
    }
}
