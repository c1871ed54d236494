//! Session lifecycle around a [`Store`].
//!
//! A [`Session`] owns the single open database handle. It is created ready
//! (`open` → ready) and stays ready until [`Session::close`]; afterwards
//! every operation fails with [`Error::SessionClosed`]. Handles are cheap to
//! share behind an `Arc`.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info};

use vitals_store::{
    ExportDocument, GlucoseRecord, GlucoseStats, PressureRecord, PressureStats, Stats, Store,
    local_cutoff,
};
use vitals_types::{Collection, PartialReading};

use crate::error::{Error, Result};

/// Ids assigned when saving a [`PartialReading`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SavedIds {
    pub glucose: Option<i64>,
    pub pressure: Option<i64>,
}

/// An open connection to the health log.
pub struct Session {
    store: Mutex<Option<Store>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    /// Open (or create) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Store::open(path)?;
        Ok(Self::from_store(store))
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::from_store(Store::open_in_memory()?))
    }

    /// Wrap an already-open store.
    pub fn from_store(store: Store) -> Self {
        Self {
            store: Mutex::new(Some(store)),
        }
    }

    pub async fn is_open(&self) -> bool {
        self.store.lock().await.is_some()
    }

    /// Close the underlying store.
    ///
    /// Closing an already-closed session returns [`Error::SessionClosed`].
    pub async fn close(&self) -> Result<()> {
        let store = self.store.lock().await.take().ok_or(Error::SessionClosed)?;
        store.close()?;
        info!("Session closed");
        Ok(())
    }

    async fn with_store<T>(
        &self,
        f: impl FnOnce(&Store) -> vitals_store::Result<T>,
    ) -> Result<T> {
        let guard = self.store.lock().await;
        let store = guard.as_ref().ok_or(Error::SessionClosed)?;
        Ok(f(store)?)
    }

    /// Database location, or `None` for an in-memory store.
    pub async fn path(&self) -> Result<Option<PathBuf>> {
        self.with_store(|s| Ok(s.path().map(Path::to_path_buf))).await
    }

    pub async fn count(&self, collection: Collection) -> Result<u64> {
        self.with_store(|s| s.count(collection)).await
    }

    /// Save a glucose value. Returns the new record's id.
    pub async fn save_glucose(&self, value: f64, notes: &str) -> Result<i64> {
        self.with_store(|s| s.save_glucose(value, notes)).await
    }

    /// Save a pressure pair. Returns the new record's id.
    pub async fn save_pressure(&self, systolic: u16, diastolic: u16, notes: &str) -> Result<i64> {
        self.with_store(|s| s.save_pressure(systolic, diastolic, notes))
            .await
    }

    /// Save every reading present in `reading`, glucose first.
    ///
    /// Each save is its own statement: if the pressure save fails, an
    /// already-saved glucose record stays.
    pub async fn save_reading(&self, reading: &PartialReading, notes: &str) -> Result<SavedIds> {
        let mut ids = SavedIds::default();
        if let Some(g) = reading.glucose {
            ids.glucose = Some(self.save_glucose(g.value, notes).await?);
        }
        if let Some(p) = reading.pressure {
            ids.pressure = Some(self.save_pressure(p.systolic, p.diastolic, notes).await?);
        }
        Ok(ids)
    }

    pub async fn recent_glucose(&self, limit: u32) -> Result<Vec<GlucoseRecord>> {
        self.with_store(|s| s.recent_glucose(limit)).await
    }

    pub async fn recent_pressure(&self, limit: u32) -> Result<Vec<PressureRecord>> {
        self.with_store(|s| s.recent_pressure(limit)).await
    }

    /// Statistics over the last `days` calendar days, in local time.
    ///
    /// Both collections are read against the same cutoff; each summary is
    /// computed independently.
    pub async fn stats(&self, days: u32) -> Result<Stats> {
        let now = self.with_store(|s| Ok(s.now())).await?;
        let cutoff = local_cutoff(now, days)?;
        debug!("Computing {days}-day stats since {cutoff}");

        let (glucose, pressure) = tokio::try_join!(
            self.with_store(|s| s.filtered_glucose(cutoff)),
            self.with_store(|s| s.filtered_pressure(cutoff)),
        )?;

        Ok(Stats {
            days,
            cutoff,
            glucose: GlucoseStats::from_records(&glucose),
            pressure: PressureStats::from_records(&pressure),
        })
    }

    /// Snapshot recent records for export.
    pub async fn export(&self) -> Result<ExportDocument> {
        self.with_store(Store::export_document).await
    }
}
