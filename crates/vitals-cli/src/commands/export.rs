//! Export command implementation.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use vitals_core::Session;

use crate::cli::ExportFormat;
use crate::util::write_output;

/// Export command arguments.
pub struct ExportArgs<'a> {
    pub format: ExportFormat,
    /// Directory for a generated `health-data-YYYY-MM-DD.*` file.
    pub dir: Option<PathBuf>,
    /// Explicit output file; wins over `dir`.
    pub output: Option<&'a PathBuf>,
    pub quiet: bool,
}

/// Write recent records as JSON or CSV.
///
/// Returns the file written, or `None` when the export went to stdout.
pub async fn cmd_export(session: &Session, args: ExportArgs<'_>) -> Result<Option<PathBuf>> {
    let doc = session.export().await.context("Failed to export records")?;

    let content = match args.format {
        ExportFormat::Json => doc.to_json_pretty()? + "\n",
        ExportFormat::Csv => doc.to_csv()?,
    };

    let target = match (args.output, args.dir) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(dir)) => {
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
            Some(dir.join(doc.file_name(args.format.extension())?))
        }
        (None, None) => None,
    };

    write_output(target.as_ref(), &content)?;

    if let Some(path) = &target
        && !args.quiet
    {
        eprintln!(
            "Exported {} glucose and {} blood-pressure records to {}",
            doc.glucose.len(),
            doc.pressure.len(),
            path.display()
        );
    }
    Ok(target)
}
