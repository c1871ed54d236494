//! Utility functions for CLI operations.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use vitals_core::Session;

/// Open the session, naming the database file on failure.
pub fn open_session(path: &Path) -> Result<Arc<Session>> {
    debug!("Opening database at {}", path.display());
    let session = Session::open(path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    Ok(Arc::new(session))
}

/// Write to the given file, or stdout when `None`.
pub fn write_output(output: Option<&PathBuf>, content: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write to {}", path.display()))?;
        }
        None => {
            print!("{}", content);
            io::stdout().flush()?;
        }
    }
    Ok(())
}
