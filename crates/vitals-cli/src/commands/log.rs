//! Log command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};

use vitals_core::{Outcome, Session, VoiceInput};

use crate::format::{FormatOptions, OutcomeJson, format_outcome_text};
use crate::util::write_output;

/// Extract and save the readings in one transcript.
///
/// Fails (non-zero exit) when nothing was recognized or the save failed,
/// after printing the outcome.
pub async fn cmd_log(
    session: Arc<Session>,
    transcript: &str,
    speak: bool,
    json: bool,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let voice = VoiceInput::new(session, super::synthesizer(speak));
    let outcome = voice.handle_transcript(transcript).await;

    let content = if json {
        opts.as_json(&OutcomeJson::from(&outcome))?
    } else {
        format_outcome_text(&outcome, opts)
    };
    write_output(output, &content)?;

    match outcome {
        Outcome::Saved { .. } => Ok(()),
        Outcome::NotRecognized { .. } => {
            bail!("No glucose or blood-pressure reading recognized. Try e.g. \"血糖6.4 血压130 85\"")
        }
        Outcome::SaveFailed { error, .. } => {
            Err(anyhow::Error::new(error).context("Failed to save reading"))
        }
    }
}
