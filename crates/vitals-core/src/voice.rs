//! Voice input handling.
//!
//! [`VoiceInput`] turns finalized transcripts into saved records and spoken
//! feedback. It owns the "listening" flag, so only one listen loop runs at a
//! time per handler.
//!
//! Speech output is best effort: a failing synthesizer is logged at `warn`
//! and never changes the [`Outcome`].

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use vitals_store::Stats;
use vitals_types::PartialReading;

use crate::error::{Error, Result};
use crate::extract::{PressureOutcome, extract_detailed};
use crate::phrases;
use crate::session::{SavedIds, Session};
use crate::speech::{SpeechSynthesizer, Transcriber};

/// What happened to one transcript.
#[derive(Debug)]
pub enum Outcome {
    /// At least one reading was recognized and saved.
    Saved {
        reading: PartialReading,
        ids: SavedIds,
    },
    /// Nothing recognizable was said.
    NotRecognized { transcript: String },
    /// A reading was recognized but could not be saved. The transcript is
    /// kept so the user can retry.
    SaveFailed { transcript: String, error: Error },
}

impl Outcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Outcome::Saved { .. })
    }
}

/// Connects a transcript source and a synthesizer to a [`Session`].
pub struct VoiceInput {
    session: Arc<Session>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    listening: AtomicBool,
}

impl std::fmt::Debug for VoiceInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceInput")
            .field("listening", &self.is_listening())
            .finish_non_exhaustive()
    }
}

impl VoiceInput {
    pub fn new(session: Arc<Session>, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            session,
            synthesizer,
            listening: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Mark the handler as listening. Returns `false` if it already was.
    pub fn begin_listening(&self) -> bool {
        self.listening
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn finish_listening(&self) {
        self.listening.store(false, Ordering::SeqCst);
    }

    async fn say(&self, text: &str) {
        if let Err(e) = self.synthesizer.speak(text).await {
            warn!("Speech output failed: {e}");
        }
    }

    /// Extract, save, and confirm one transcript.
    pub async fn handle_transcript(&self, transcript: &str) -> Outcome {
        let extraction = extract_detailed(transcript);
        if let PressureOutcome::OutOfRange(p) = extraction.pressure {
            debug!("Ignoring out-of-range pressure {}/{}", p.systolic, p.diastolic);
        }

        let reading = extraction.reading();
        if reading.is_empty() {
            debug!("No reading in transcript: {transcript:?}");
            self.say(phrases::NOT_UNDERSTOOD).await;
            return Outcome::NotRecognized {
                transcript: transcript.to_string(),
            };
        }

        match self.session.save_reading(&reading, transcript).await {
            Ok(ids) => {
                if let Some(text) = phrases::confirmation(&reading) {
                    self.say(&text).await;
                }
                Outcome::Saved { reading, ids }
            }
            Err(error) => {
                warn!("Failed to save reading: {error}");
                self.say(phrases::SAVE_FAILED).await;
                Outcome::SaveFailed {
                    transcript: transcript.to_string(),
                    error,
                }
            }
        }
    }

    /// Handle transcripts until the source runs dry.
    ///
    /// Stops early if the session is closed underneath the loop.
    pub async fn listen<T: Transcriber + ?Sized>(&self, source: &mut T) -> Result<Vec<Outcome>> {
        if !self.begin_listening() {
            return Err(Error::AlreadyListening);
        }
        let result = self.listen_loop(source).await;
        self.finish_listening();
        result
    }

    async fn listen_loop<T: Transcriber + ?Sized>(&self, source: &mut T) -> Result<Vec<Outcome>> {
        self.say(phrases::LISTENING).await;

        let mut outcomes = Vec::new();
        while let Some(transcript) = source.next_transcript().await? {
            let transcript = transcript.trim();
            if transcript.is_empty() {
                continue;
            }

            let outcome = self.handle_transcript(transcript).await;
            let closed = matches!(
                outcome,
                Outcome::SaveFailed {
                    error: Error::SessionClosed,
                    ..
                }
            );
            outcomes.push(outcome);
            if closed {
                break;
            }
        }

        info!(
            "Listening finished: {} of {} transcripts saved",
            outcomes.iter().filter(|o| o.is_saved()).count(),
            outcomes.len()
        );
        Ok(outcomes)
    }

    /// Compute statistics and read them aloud.
    pub async fn speak_summary(&self, days: u32) -> Result<Stats> {
        let stats = self.session.stats(days).await?;
        self.say(&phrases::summary(&stats)).await;
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::{MemorySynthesizer, ScriptedTranscriber, SpeechError};
    use async_trait::async_trait;
    use vitals_types::Collection;

    fn voice() -> (VoiceInput, Arc<MemorySynthesizer>) {
        let session = Arc::new(Session::open_in_memory().unwrap());
        let synth = Arc::new(MemorySynthesizer::new());
        (VoiceInput::new(session, synth.clone()), synth)
    }

    #[tokio::test]
    async fn test_handle_transcript_saves_both() {
        let (voice, synth) = voice();
        let outcome = voice.handle_transcript("血糖6.4，血压130 85").await;

        let Outcome::Saved { reading, ids } = outcome else {
            panic!("expected Saved, got {outcome:?}");
        };
        assert!(reading.glucose.is_some());
        assert_eq!(ids.glucose, Some(1));
        assert_eq!(ids.pressure, Some(1));
        assert_eq!(
            synth.last().await.as_deref(),
            Some("已记录血糖6.4，血压130/85")
        );

        let stored = voice.session().recent_glucose(1).await.unwrap();
        assert_eq!(stored[0].notes, "血糖6.4，血压130 85");
    }

    #[tokio::test]
    async fn test_handle_transcript_not_recognized() {
        let (voice, synth) = voice();
        let outcome = voice.handle_transcript("今天天气不错").await;

        assert!(matches!(
            &outcome,
            Outcome::NotRecognized { transcript } if transcript == "今天天气不错"
        ));
        assert_eq!(synth.last().await.as_deref(), Some(phrases::NOT_UNDERSTOOD));
    }

    #[tokio::test]
    async fn test_out_of_range_pressure_not_recognized() {
        let (voice, _) = voice();
        let outcome = voice.handle_transcript("血压300 90").await;
        assert!(matches!(outcome, Outcome::NotRecognized { .. }));
        assert_eq!(
            voice.session().count(Collection::Pressure).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_save_failure_keeps_transcript() {
        let (voice, synth) = voice();
        voice.session().close().await.unwrap();

        let outcome = voice.handle_transcript("血糖6.4").await;
        let Outcome::SaveFailed { transcript, error } = outcome else {
            panic!("expected SaveFailed");
        };
        assert_eq!(transcript, "血糖6.4");
        assert!(matches!(error, Error::SessionClosed));
        assert_eq!(synth.last().await.as_deref(), Some(phrases::SAVE_FAILED));
    }

    #[tokio::test]
    async fn test_speech_failure_does_not_block_save() {
        let (voice, synth) = voice();
        synth.set_should_fail(true);

        let outcome = voice.handle_transcript("血糖5.5").await;
        assert!(outcome.is_saved());
        assert!(synth.spoken().await.is_empty());
    }

    #[tokio::test]
    async fn test_listen_processes_all_transcripts() {
        let (voice, synth) = voice();
        let mut input = ScriptedTranscriber::new(["血糖6.4", "  ", "听不懂", "血压120/80"]);

        let outcomes = voice.listen(&mut input).await.unwrap();
        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_saved());
        assert!(matches!(outcomes[1], Outcome::NotRecognized { .. }));
        assert!(outcomes[2].is_saved());
        assert!(!voice.is_listening());
        assert_eq!(synth.spoken().await[0], phrases::LISTENING);
    }

    #[tokio::test]
    async fn test_listening_flag_is_exclusive() {
        let (voice, _) = voice();
        assert!(voice.begin_listening());
        assert!(!voice.begin_listening());

        let mut input = ScriptedTranscriber::new(["血糖6.4"]);
        assert!(matches!(
            voice.listen(&mut input).await,
            Err(Error::AlreadyListening)
        ));

        voice.finish_listening();
        assert!(voice.listen(&mut input).await.is_ok());
    }

    struct BrokenTranscriber;

    #[async_trait]
    impl Transcriber for BrokenTranscriber {
        async fn next_transcript(&mut self) -> std::result::Result<Option<String>, SpeechError> {
            Err(SpeechError::Unavailable("no microphone".into()))
        }
    }

    #[tokio::test]
    async fn test_transcriber_error_resets_flag() {
        let (voice, _) = voice();
        let err = voice.listen(&mut BrokenTranscriber).await.unwrap_err();
        assert!(matches!(err, Error::Speech(SpeechError::Unavailable(_))));
        assert!(!voice.is_listening());
    }

    #[tokio::test]
    async fn test_listen_stops_when_session_closed() {
        let (voice, _) = voice();
        voice.session().close().await.unwrap();

        let mut input = ScriptedTranscriber::new(["血糖6.4", "血糖7.0"]);
        let outcomes = voice.listen(&mut input).await.unwrap();
        assert_eq!(outcomes.len(), 1);
    }

    #[tokio::test]
    async fn test_speak_summary() {
        let (voice, synth) = voice();
        voice.handle_transcript("血糖6.4").await;

        let stats = voice.speak_summary(7).await.unwrap();
        assert_eq!(stats.glucose.count, 1);
        assert_eq!(
            synth.last().await.as_deref(),
            Some("最近7天血糖记录1次，平均6.4，最低6.4，最高6.4")
        );
    }
}
