//! Listen command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use vitals_core::{Session, Transcriber, VoiceInput};

use crate::format::{FormatOptions, format_outcome_text};
use crate::speech::LineTranscriber;
use crate::util::write_output;

/// Handle transcripts from stdin until end of input.
pub async fn cmd_listen(
    session: Arc<Session>,
    speak: bool,
    output: Option<&PathBuf>,
    quiet: bool,
    opts: &FormatOptions,
) -> Result<()> {
    if !quiet {
        eprintln!("Listening for transcripts on stdin, one per line (Ctrl-D to finish)...");
    }
    let mut input = LineTranscriber::stdin();
    run_listen(session, speak, &mut input, output, opts).await
}

async fn run_listen<T: Transcriber>(
    session: Arc<Session>,
    speak: bool,
    input: &mut T,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let voice = VoiceInput::new(session, super::synthesizer(speak));
    let outcomes = voice.listen(input).await?;

    let saved = outcomes.iter().filter(|o| o.is_saved()).count();
    let mut content: String = outcomes
        .iter()
        .map(|o| format_outcome_text(o, opts))
        .collect();
    content.push_str(&format!(
        "{} of {} transcripts saved\n",
        saved,
        outcomes.len()
    ));

    write_output(output, &content)
}
