//! Stats command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use vitals_core::{Session, VoiceInput};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_stats_csv, format_stats_text};
use crate::util::write_output;

/// Print (and optionally speak) statistics for the last `days` days.
pub async fn cmd_stats(
    session: Arc<Session>,
    days: u32,
    speak: bool,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let result = if speak {
        VoiceInput::new(session, super::synthesizer(true))
            .speak_summary(days)
            .await
    } else {
        session.stats(days).await
    };
    let stats = result.context("Failed to compute statistics")?;

    let content = match format {
        OutputFormat::Json => opts.as_json(&stats)?,
        OutputFormat::Csv => format_stats_csv(&stats),
        OutputFormat::Text => format_stats_text(&stats, opts),
    };

    write_output(output, &content)
}
