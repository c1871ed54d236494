//! Command implementations for the CLI.

mod config;
mod export;
mod info;
mod listen;
mod log;
mod recent;
mod stats;

use std::sync::Arc;

use vitals_core::SpeechSynthesizer;

use crate::speech::{ConsoleSynthesizer, SilentSynthesizer};

pub use config::cmd_config;
pub use export::{ExportArgs, cmd_export};
pub use info::cmd_info;
pub use listen::cmd_listen;
pub use log::cmd_log;
pub use recent::cmd_recent;
pub use stats::cmd_stats;

/// The terminal synthesizer, or a silent one when feedback is off.
fn synthesizer(speak: bool) -> Arc<dyn SpeechSynthesizer> {
    if speak {
        Arc::new(ConsoleSynthesizer)
    } else {
        Arc::new(SilentSynthesizer)
    }
}
