//! Data models for stored records.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use vitals_types::{GLUCOSE_UNIT, GlucoseReading, PressureReading};

use crate::error::{Error, Result};

/// A glucose record stored in the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlucoseRecord {
    /// Database row ID.
    pub id: i64,
    /// Concentration in mmol/L.
    pub value: f64,
    /// Always `mmol/L`.
    pub unit: String,
    /// When the record was inserted.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    /// Original transcript, or empty.
    pub notes: String,
}

impl GlucoseRecord {
    /// The stored value as a reading.
    pub fn reading(&self) -> GlucoseReading {
        GlucoseReading::new(self.value)
    }

    /// Whether the unit column holds the canonical unit.
    pub fn has_canonical_unit(&self) -> bool {
        self.unit == GLUCOSE_UNIT
    }
}

/// A blood-pressure record stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureRecord {
    /// Database row ID.
    pub id: i64,
    /// Systolic pressure in mmHg.
    pub systolic: u16,
    /// Diastolic pressure in mmHg.
    pub diastolic: u16,
    /// When the record was inserted.
    #[serde(with = "time::serde::rfc3339")]
    pub recorded_at: OffsetDateTime,
    /// Original transcript, or empty.
    pub notes: String,
}

impl PressureRecord {
    /// The stored pair as a reading.
    pub fn reading(&self) -> PressureReading {
        PressureReading::new(self.systolic, self.diastolic)
    }
}

/// Format an instant the way `recorded_at` columns store it.
///
/// The output is fixed-width UTC with millisecond precision
/// (`2024-03-10T07:30:00.000Z`), so string order equals time order.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String> {
    instant
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .map_err(|e| Error::InvalidTimestamp(format!("{instant}: {e}")))
}

/// Parse a stored `recorded_at` value (any RFC 3339 string).
pub fn parse_timestamp(s: &str) -> Result<OffsetDateTime> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))
}

/// Read a `recorded_at` column, surfacing bad text as a conversion failure.
pub(crate) fn timestamp_column(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<OffsetDateTime> {
    let text: String = row.get(idx)?;
    OffsetDateTime::parse(&text, &Rfc3339).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
