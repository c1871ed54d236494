//! Data export.
//!
//! The JSON document carries the export moment and the most recent records
//! of each collection, newest first:
//!
//! ```json
//! { "exportTime": "...", "glucose": [ ... ], "pressure": [ ... ] }
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{GlucoseRecord, PressureRecord, format_timestamp};
use crate::store::Store;

/// Maximum number of records exported per collection.
pub const EXPORT_LIMIT: u32 = 1000;

/// A snapshot of both collections for download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// When the export was taken.
    #[serde(with = "time::serde::rfc3339")]
    pub export_time: OffsetDateTime,
    /// Most recent glucose records, newest first.
    pub glucose: Vec<GlucoseRecord>,
    /// Most recent pressure records, newest first.
    pub pressure: Vec<PressureRecord>,
}

impl ExportDocument {
    /// Render as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as CSV: one header and block of rows per collection.
    pub fn to_csv(&self) -> Result<String> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        wtr.write_record(["glucose_id", "value", "unit", "recorded_at", "notes"])?;
        for r in &self.glucose {
            wtr.write_record([
                r.id.to_string(),
                r.value.to_string(),
                r.unit.clone(),
                format_timestamp(r.recorded_at)?,
                r.notes.clone(),
            ])?;
        }

        wtr.write_record(["pressure_id", "systolic", "diastolic", "recorded_at", "notes"])?;
        for r in &self.pressure {
            wtr.write_record([
                r.id.to_string(),
                r.systolic.to_string(),
                r.diastolic.to_string(),
                format_timestamp(r.recorded_at)?,
                r.notes.clone(),
            ])?;
        }

        let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Suggested file name, e.g. `health-data-2024-03-10.json`.
    pub fn file_name(&self, extension: &str) -> Result<String> {
        let date = self
            .export_time
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(|e| Error::InvalidTimestamp(e.to_string()))?;
        Ok(format!("health-data-{date}.{extension}"))
    }
}

impl Store {
    /// Snapshot up to [`EXPORT_LIMIT`] recent records from each collection.
    pub fn export_document(&self) -> Result<ExportDocument> {
        let glucose = self.recent_glucose(EXPORT_LIMIT)?;
        let pressure = self.recent_pressure(EXPORT_LIMIT)?;

        info!(
            "Exporting {} glucose and {} pressure records",
            glucose.len(),
            pressure.len()
        );

        Ok(ExportDocument {
            export_time: self.now(),
            glucose,
            pressure,
        })
    }
}
