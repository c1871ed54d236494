//! Local data persistence for voice-logged health readings.
//!
//! This crate provides SQLite-based storage for blood-glucose and
//! blood-pressure records, plus the read-side queries and statistics built
//! on top of it.
//!
//! # Features
//!
//! - Append-only collections with store-assigned, never-reused ids
//! - Records stamped with the insert time from a pluggable [`Clock`]
//! - "Most recent N" and "since cutoff" queries with a total order
//! - Count / average / min / max over a calendar-day window
//! - JSON and CSV export
//!
//! # Example
//!
//! ```no_run
//! use vitals_store::Store;
//!
//! let store = Store::open_default()?;
//! store.save_glucose(6.4, "血糖6.4")?;
//!
//! let latest = store.recent_glucose(1)?;
//! assert_eq!(latest[0].unit, "mmol/L");
//! # Ok::<(), vitals_store::Error>(())
//! ```

mod clock;
mod error;
mod export;
mod models;
mod queries;
mod schema;
mod stats;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Error, Result};
pub use export::{EXPORT_LIMIT, ExportDocument};
pub use models::{GlucoseRecord, PressureRecord, format_timestamp, parse_timestamp};
pub use queries::RecordQuery;
pub use schema::SCHEMA_VERSION;
pub use stats::{
    GlucoseStats, PressureStats, Stats, calendar_cutoff, cutoff_in, local_cutoff,
};
pub use store::Store;

/// Default database path following platform conventions.
///
/// - Linux: `~/.local/share/vitals/vitals.db`
/// - macOS: `~/Library/Application Support/vitals/vitals.db`
/// - Windows: `C:\Users\<user>\AppData\Local\vitals\vitals.db`
pub fn default_db_path() -> std::path::PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("vitals")
        .join("vitals.db")
}
