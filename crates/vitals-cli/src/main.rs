//! `vitals`: log glucose and blood-pressure readings from spoken transcripts.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `log` | Extract and save readings from one transcript |
//! | `listen` | Read transcripts from stdin until end of input |
//! | `recent` | Show the most recent records |
//! | `stats` | Count, average, min and max over the last N days |
//! | `export` | Write recent records as JSON or CSV |
//! | `info` | Database location and record counts |
//! | `config` | Manage `config.toml` |
//! | `completions` | Generate shell completions |
//!
//! The database path comes from `--database`, then `VITALS_DB`, then the
//! config file, then the platform data directory.

mod cli;
mod commands;
mod config;
mod format;
mod speech;
mod util;

use std::io;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{
    ExportArgs, cmd_config, cmd_export, cmd_info, cmd_listen, cmd_log, cmd_recent, cmd_stats,
};
use crate::config::{Config, resolve_database, resolve_or};
use crate::format::FormatOptions;
use crate::util::open_session;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completions need no logging or database
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "vitals", &mut io::stdout());
        return Ok(());
    }

    let filter = if cli.quiet {
        EnvFilter::new("warn")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = Config::load();
    let opts = FormatOptions::new(cli.no_color);
    let output = cli.output.as_ref();

    if let Commands::Config { action } = cli.command {
        return cmd_config(action, output);
    }

    let database = resolve_database(cli.database.clone(), &config);
    let session = open_session(&database)?;

    let result = match cli.command {
        Commands::Log {
            transcript,
            json,
            no_speak,
        } => {
            let text = transcript.join(" ");
            cmd_log(
                session.clone(),
                &text,
                config.speak && !no_speak,
                json,
                output,
                &opts,
            )
            .await
        }
        Commands::Listen { no_speak } => {
            cmd_listen(
                session.clone(),
                config.speak && !no_speak,
                output,
                cli.quiet,
                &opts,
            )
            .await
        }
        Commands::Recent {
            collection,
            limit,
            format,
        } => {
            let limit = resolve_or(limit, config.recent_limit);
            cmd_recent(&session, collection, limit, format, output, &opts).await
        }
        Commands::Stats {
            days,
            speak,
            format,
        } => {
            let days = resolve_or(days, config.summary_days);
            cmd_stats(session.clone(), days, speak, format, output, &opts).await
        }
        Commands::Export { format, dir } => {
            let args = ExportArgs {
                format,
                dir: dir.or_else(|| config.export_directory.clone()),
                output,
                quiet: cli.quiet,
            };
            cmd_export(&session, args).await.map(|_| ())
        }
        Commands::Info { format } => cmd_info(&session, &database, format, output, &opts).await,
        Commands::Config { .. } | Commands::Completions { .. } => {
            unreachable!("handled before opening the database")
        }
    };

    session.close().await?;
    result
}
