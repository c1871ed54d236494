//! Output formatting utilities for text, JSON, and CSV output.

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use time::OffsetDateTime;

use vitals_core::Outcome;
use vitals_store::{GlucoseRecord, PressureRecord, Stats, format_timestamp};

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
}

impl FormatOptions {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    /// Serialize value to pretty JSON with a trailing newline.
    pub fn as_json<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)? + "\n")
    }

    fn heading(&self, text: &str) -> String {
        if self.no_color {
            text.to_string()
        } else {
            text.bold().to_string()
        }
    }

    fn ok(&self, text: &str) -> String {
        if self.no_color {
            format!("[ok] {}", text)
        } else {
            format!("{} {}", "✓".green(), text)
        }
    }

    fn fail(&self, text: &str) -> String {
        if self.no_color {
            format!("[error] {}", text)
        } else {
            format!("{} {}", "✗".red(), text)
        }
    }
}

/// Render an instant in the local time zone as `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_local(instant: OffsetDateTime) -> String {
    DateTime::<Utc>::from_timestamp(instant.unix_timestamp(), instant.nanosecond())
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Escape a string for CSV output.
/// Wraps the value in quotes if it contains commas, quotes, or newlines.
#[must_use]
pub fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[must_use]
pub fn format_glucose_text(records: &[GlucoseRecord], opts: &FormatOptions) -> String {
    if records.is_empty() {
        return "No glucose records.\n".to_string();
    }

    let mut output = opts.heading(&format!("Glucose ({} records)", records.len()));
    output.push('\n');

    let mut builder = Builder::default();
    builder.push_record(["ID", "Recorded", "Value", "Notes"]);
    for r in records {
        builder.push_record([
            r.id.to_string(),
            format_local(r.recorded_at),
            format!("{} {}", r.value, r.unit),
            r.notes.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

#[must_use]
pub fn format_pressure_text(records: &[PressureRecord], opts: &FormatOptions) -> String {
    if records.is_empty() {
        return "No blood-pressure records.\n".to_string();
    }

    let mut output = opts.heading(&format!("Blood pressure ({} records)", records.len()));
    output.push('\n');

    let mut builder = Builder::default();
    builder.push_record(["ID", "Recorded", "Reading", "Notes"]);
    for r in records {
        builder.push_record([
            r.id.to_string(),
            format_local(r.recorded_at),
            r.reading().to_string(),
            r.notes.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

/// One CSV table for both collections, tagged by a `collection` column.
#[must_use]
pub fn format_recent_csv(glucose: &[GlucoseRecord], pressure: &[PressureRecord]) -> Result<String> {
    let mut output = String::from("collection,id,recorded_at,value,systolic,diastolic,notes\n");
    for r in glucose {
        output.push_str(&format!(
            "glucose,{},{},{},,,{}\n",
            r.id,
            format_timestamp(r.recorded_at)?,
            r.value,
            csv_escape(&r.notes)
        ));
    }
    for r in pressure {
        output.push_str(&format!(
            "pressure,{},{},,{},{},{}\n",
            r.id,
            format_timestamp(r.recorded_at)?,
            r.systolic,
            r.diastolic,
            csv_escape(&r.notes)
        ));
    }
    Ok(output)
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[must_use]
pub fn format_stats_text(stats: &Stats, opts: &FormatOptions) -> String {
    let mut output = opts.heading(&format!(
        "Last {} days (since {})",
        stats.days,
        format_local(stats.cutoff)
    ));
    output.push('\n');

    let g = &stats.glucose;
    let p = &stats.pressure;

    let mut builder = Builder::default();
    builder.push_record(["", "Count", "Average", "Min", "Max"]);
    builder.push_record([
        "Glucose (mmol/L)".to_string(),
        g.count.to_string(),
        opt(g.average),
        opt(g.min),
        opt(g.max),
    ]);
    builder.push_record([
        "Systolic (mmHg)".to_string(),
        p.count.to_string(),
        opt(p.avg_systolic),
        opt(p.min_systolic),
        opt(p.max_systolic),
    ]);
    builder.push_record([
        "Diastolic (mmHg)".to_string(),
        p.count.to_string(),
        opt(p.avg_diastolic),
        opt(p.min_diastolic),
        opt(p.max_diastolic),
    ]);

    let mut table = builder.build();
    table.with(Style::rounded());
    output.push_str(&table.to_string());
    output.push('\n');
    output
}

fn csv_opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[must_use]
pub fn format_stats_csv(stats: &Stats) -> String {
    let g = &stats.glucose;
    let p = &stats.pressure;
    let mut output = String::from("metric,count,average,min,max\n");
    output.push_str(&format!(
        "glucose,{},{},{},{}\n",
        g.count,
        csv_opt(g.average),
        csv_opt(g.min),
        csv_opt(g.max)
    ));
    output.push_str(&format!(
        "systolic,{},{},{},{}\n",
        p.count,
        csv_opt(p.avg_systolic),
        csv_opt(p.min_systolic),
        csv_opt(p.max_systolic)
    ));
    output.push_str(&format!(
        "diastolic,{},{},{},{}\n",
        p.count,
        csv_opt(p.avg_diastolic),
        csv_opt(p.min_diastolic),
        csv_opt(p.max_diastolic)
    ));
    output
}

/// One line describing what happened to a transcript.
#[must_use]
pub fn format_outcome_text(outcome: &Outcome, opts: &FormatOptions) -> String {
    match outcome {
        Outcome::Saved { reading, ids } => {
            let mut parts = Vec::new();
            if let (Some(g), Some(id)) = (reading.glucose, ids.glucose) {
                parts.push(format!("glucose {} (#{})", g, id));
            }
            if let (Some(p), Some(id)) = (reading.pressure, ids.pressure) {
                parts.push(format!("pressure {} (#{})", p, id));
            }
            opts.ok(&format!("Saved {}", parts.join(", "))) + "\n"
        }
        Outcome::NotRecognized { transcript } => {
            opts.fail(&format!("No reading recognized in \"{}\"", transcript)) + "\n"
        }
        Outcome::SaveFailed { transcript, error } => {
            opts.fail(&format!("Save failed for \"{}\": {}", transcript, error)) + "\n"
        }
    }
}

/// JSON form of an [`Outcome`].
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeJson<'a> {
    Saved {
        glucose: Option<f64>,
        glucose_id: Option<i64>,
        systolic: Option<u16>,
        diastolic: Option<u16>,
        pressure_id: Option<i64>,
    },
    NotRecognized {
        transcript: &'a str,
    },
    SaveFailed {
        transcript: &'a str,
        error: String,
    },
}

impl<'a> From<&'a Outcome> for OutcomeJson<'a> {
    fn from(outcome: &'a Outcome) -> Self {
        match outcome {
            Outcome::Saved { reading, ids } => OutcomeJson::Saved {
                glucose: reading.glucose.map(|g| g.value),
                glucose_id: ids.glucose,
                systolic: reading.pressure.map(|p| p.systolic),
                diastolic: reading.pressure.map(|p| p.diastolic),
                pressure_id: ids.pressure,
            },
            Outcome::NotRecognized { transcript } => OutcomeJson::NotRecognized { transcript },
            Outcome::SaveFailed { transcript, error } => OutcomeJson::SaveFailed {
                transcript,
                error: error.to_string(),
            },
        }
    }
}
