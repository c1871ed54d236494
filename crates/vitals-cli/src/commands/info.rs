//! Info command implementation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use vitals_core::Session;
use vitals_store::SCHEMA_VERSION;
use vitals_types::Collection;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::format::{FormatOptions, csv_escape};
use crate::util::write_output;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoReport {
    database: String,
    schema_version: i32,
    glucose_records: u64,
    pressure_records: u64,
    config_file: String,
}

pub async fn cmd_info(
    session: &Session,
    database: &Path,
    format: OutputFormat,
    output: Option<&PathBuf>,
    opts: &FormatOptions,
) -> Result<()> {
    let report = InfoReport {
        database: database.display().to_string(),
        schema_version: SCHEMA_VERSION,
        glucose_records: session.count(Collection::Glucose).await?,
        pressure_records: session.count(Collection::Pressure).await?,
        config_file: Config::path().display().to_string(),
    };

    let content = match format {
        OutputFormat::Json => opts.as_json(&report)?,
        OutputFormat::Csv => format!(
            "database,schema_version,glucose_records,pressure_records,config_file\n{},{},{},{},{}\n",
            csv_escape(&report.database),
            report.schema_version,
            report.glucose_records,
            report.pressure_records,
            csv_escape(&report.config_file)
        ),
        OutputFormat::Text => format!(
            "Database:        {}\n\
             Schema version:  {}\n\
             Glucose:         {} records\n\
             Blood pressure:  {} records\n\
             Config file:     {}\n",
            report.database,
            report.schema_version,
            report.glucose_records,
            report.pressure_records,
            report.config_file
        ),
    };

    write_output(output, &content)
}
