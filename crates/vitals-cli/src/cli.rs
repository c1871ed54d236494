//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// File format for `export`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Which collection(s) a listing covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum CollectionArg {
    #[default]
    All,
    #[value(alias = "sugar")]
    Glucose,
    #[value(alias = "bp")]
    Pressure,
}

impl CollectionArg {
    pub fn includes_glucose(self) -> bool {
        matches!(self, CollectionArg::All | CollectionArg::Glucose)
    }

    pub fn includes_pressure(self) -> bool {
        matches!(self, CollectionArg::All | CollectionArg::Pressure)
    }
}

#[derive(Parser)]
#[command(name = "vitals")]
#[command(author, version, about = "Voice-driven glucose and blood-pressure log", long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (any non-empty `NO_COLOR` other than a false value)
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Database file (overrides config)
    #[arg(long, global = true, env = "VITALS_DB")]
    pub database: Option<PathBuf>,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a reading from a transcript, e.g. `vitals log 血糖6.4 血压130 85`
    Log {
        /// Transcript words (joined with spaces)
        #[arg(required = true, num_args = 1..)]
        transcript: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Do not echo spoken feedback
        #[arg(long)]
        no_speak: bool,
    },

    /// Read transcripts from stdin, one utterance per line
    Listen {
        /// Do not echo spoken feedback
        #[arg(long)]
        no_speak: bool,
    },

    /// Show the most recent records
    Recent {
        /// Collection to list
        #[arg(short, long, value_enum, default_value = "all")]
        collection: CollectionArg,

        /// Number of records per collection (default from config)
        #[arg(short = 'n', long, value_parser = parse_positive)]
        limit: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Summarize the last N calendar days
    Stats {
        /// Window length in days (default from config)
        #[arg(short, long, value_parser = parse_positive)]
        days: Option<u32>,

        /// Read the summary aloud
        #[arg(long)]
        speak: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Export recent records to a file
    Export {
        /// File format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Directory for the generated file (default from config, else stdout)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show database location and record counts
    Info {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Configuration keys that can be read or written
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    /// Database file path
    Database,
    /// Default stats window in days
    SummaryDays,
    /// Default number of records for `recent`
    RecentLimit,
    /// Echo spoken feedback
    Speak,
    /// Default export directory
    ExportDirectory,
}

/// Configuration subcommands
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Get a configuration value
    Get {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        #[arg(value_enum)]
        key: ConfigKey,
        /// Configuration value
        value: String,
    },

    /// Reset a configuration value to its default
    Unset {
        /// Configuration key to reset
        #[arg(value_enum)]
        key: ConfigKey,
    },

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init,
}

/// Parse a positive number of days or records.
pub fn parse_positive(s: &str) -> Result<u32, String> {
    let n: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        return Err("Value must be at least 1".to_string());
    }
    Ok(n)
}

/// Parse boolean argument with flexible input
pub fn parse_bool_arg(s: &str) -> Result<bool, String> {
    match s.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "enable" | "enabled" => Ok(true),
        "false" | "no" | "off" | "0" | "disable" | "disabled" => Ok(false),
        _ => Err(format!(
            "Invalid boolean value '{}'. Use true/false, yes/no, on/off, or 1/0",
            s
        )),
    }
}
