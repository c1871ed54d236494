//! Recent command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use vitals_core::Session;
use vitals_store::{GlucoseRecord, PressureRecord};

use crate::cli::{CollectionArg, OutputFormat};
use crate::format::{FormatOptions, format_glucose_text, format_pressure_text, format_recent_csv};
use crate::util::write_output;

#[derive(Debug, Serialize)]
struct RecentJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    glucose: Option<Vec<GlucoseRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pressure: Option<Vec<PressureRecord>>,
}

pub async fn cmd_recent(
    session: &Session,
    collection: CollectionArg,
    limit: u32,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let glucose = if collection.includes_glucose() {
        Some(
            session
                .recent_glucose(limit)
                .await
                .context("Failed to read glucose records")?,
        )
    } else {
        None
    };
    let pressure = if collection.includes_pressure() {
        Some(
            session
                .recent_pressure(limit)
                .await
                .context("Failed to read blood-pressure records")?,
        )
    } else {
        None
    };

    let content = match format {
        OutputFormat::Json => opts.as_json(&RecentJson { glucose, pressure })?,
        OutputFormat::Csv => format_recent_csv(
            glucose.as_deref().unwrap_or_default(),
            pressure.as_deref().unwrap_or_default(),
        )?,
        OutputFormat::Text => {
            let mut text = String::new();
            if let Some(records) = &glucose {
                text.push_str(&format_glucose_text(records, opts));
            }
            if let Some(records) = &pressure {
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&format_pressure_text(records, opts));
            }
            text
        }
    };

    write_output(output, &content)
}
