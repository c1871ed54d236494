//! Main store implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::Connection;
use time::OffsetDateTime;
use tracing::{debug, info};

use vitals_types::{Collection, GLUCOSE_UNIT};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::models::{GlucoseRecord, PressureRecord, format_timestamp, timestamp_column};
use crate::queries::RecordQuery;
use crate::schema;

const GLUCOSE_COLUMNS: &str = "id, value, unit, recorded_at, notes";
const PRESSURE_COLUMNS: &str = "id, systolic, diastolic, recorded_at, notes";

/// SQLite-based store for glucose and blood-pressure records.
///
/// Records are append-only: the store exposes no update or delete.
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
}

impl Store {
    /// Open or create a database at the given path.
    ///
    /// Creating the schema is idempotent, so this is safe on an existing
    /// database. Any failure is reported as [`Error::StorageUnavailable`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|e| Error::unavailable(parent, e))?;
            }
        }

        info!("Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(|e| Error::unavailable(path, e))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::unavailable(path, e))?;

        schema::initialize(&conn).map_err(|e| Error::unavailable(path, e))?;

        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
            clock: Arc::new(SystemClock),
        })
    }

    /// Open the default database location.
    pub fn open_default() -> Result<Self> {
        Self::open(crate::default_db_path())
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| Error::unavailable(":memory:", e))?;
        schema::initialize(&conn).map_err(|e| Error::unavailable(":memory:", e))?;
        Ok(Self {
            conn,
            path: None,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used to stamp new records.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Re-run schema initialization on the open connection.
    pub fn initialize(&self) -> Result<()> {
        schema::initialize(&self.conn)
    }

    /// The current instant according to the store's clock.
    pub fn now(&self) -> OffsetDateTime {
        self.clock.now()
    }

    /// Database file path, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, e)| Error::Database(e))
    }

    /// Count records in a collection.
    pub fn count(&self, collection: Collection) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", collection.table_name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

// Write operations
impl Store {
    /// Insert a glucose record stamped with the current time.
    ///
    /// The value is stored as given; range checks belong to the caller.
    /// Returns the assigned id.
    pub fn save_glucose(&self, value: f64, notes: &str) -> Result<i64> {
        let recorded_at = format_timestamp(self.clock.now())?;

        self.conn
            .execute(
                "INSERT INTO glucose (value, unit, recorded_at, notes) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![value, GLUCOSE_UNIT, recorded_at, notes],
            )
            .map_err(|source| Error::WriteFailed {
                collection: Collection::Glucose,
                source,
            })?;

        let id = self.conn.last_insert_rowid();
        debug!("Saved glucose {} at {} as id {}", value, recorded_at, id);
        Ok(id)
    }

    /// Insert a blood-pressure record stamped with the current time.
    ///
    /// No physiological bounds are applied here. Returns the assigned id.
    pub fn save_pressure(&self, systolic: u16, diastolic: u16, notes: &str) -> Result<i64> {
        let recorded_at = format_timestamp(self.clock.now())?;

        self.conn
            .execute(
                "INSERT INTO pressure (systolic, diastolic, recorded_at, notes)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![systolic, diastolic, recorded_at, notes],
            )
            .map_err(|source| Error::WriteFailed {
                collection: Collection::Pressure,
                source,
            })?;

        let id = self.conn.last_insert_rowid();
        debug!(
            "Saved pressure {}/{} at {} as id {}",
            systolic, diastolic, recorded_at, id
        );
        Ok(id)
    }
}

// Read operations
impl Store {
    /// Query glucose records with filters.
    pub fn query_glucose(&self, query: &RecordQuery) -> Result<Vec<GlucoseRecord>> {
        let sql = query.build_sql(Collection::Glucose.table_name(), GLUCOSE_COLUMNS)?;
        let (_, params) = query.build_where()?;

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok(GlucoseRecord {
                    id: row.get(0)?,
                    value: row.get(1)?,
                    unit: row.get(2)?,
                    recorded_at: timestamp_column(row, 3)?,
                    notes: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Query pressure records with filters.
    pub fn query_pressure(&self, query: &RecordQuery) -> Result<Vec<PressureRecord>> {
        let sql = query.build_sql(Collection::Pressure.table_name(), PRESSURE_COLUMNS)?;
        let (_, params) = query.build_where()?;

        debug!("Executing query: {}", sql);

        let params_ref: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_ref.as_slice(), |row| {
                Ok(PressureRecord {
                    id: row.get(0)?,
                    systolic: row.get(1)?,
                    diastolic: row.get(2)?,
                    recorded_at: timestamp_column(row, 3)?,
                    notes: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Up to `limit` glucose records, most recent first.
    pub fn recent_glucose(&self, limit: u32) -> Result<Vec<GlucoseRecord>> {
        self.query_glucose(&RecordQuery::new().limit(check_limit(limit)?))
    }

    /// Up to `limit` pressure records, most recent first.
    pub fn recent_pressure(&self, limit: u32) -> Result<Vec<PressureRecord>> {
        self.query_pressure(&RecordQuery::new().limit(check_limit(limit)?))
    }

    /// Every glucose record at or after `cutoff`, oldest first.
    pub fn filtered_glucose(&self, cutoff: OffsetDateTime) -> Result<Vec<GlucoseRecord>> {
        self.query_glucose(&RecordQuery::new().since(cutoff).oldest_first())
    }

    /// Every pressure record at or after `cutoff`, oldest first.
    pub fn filtered_pressure(&self, cutoff: OffsetDateTime) -> Result<Vec<PressureRecord>> {
        self.query_pressure(&RecordQuery::new().since(cutoff).oldest_first())
    }
}

fn check_limit(limit: u32) -> Result<u32> {
    if limit == 0 {
        Err(Error::InvalidLimit(limit))
    } else {
        Ok(limit)
    }
}
