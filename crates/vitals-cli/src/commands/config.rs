//! Config command implementation.

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::cli::ConfigAction;
use crate::config::Config;
use crate::util::write_output;

pub fn cmd_config(action: ConfigAction, output: Option<&PathBuf>) -> Result<()> {
    let path = Config::path();
    let content = apply(action, &path)?;
    write_output(output, &content)
}

fn apply(action: ConfigAction, path: &std::path::Path) -> Result<String> {
    match action {
        ConfigAction::Show => {
            let config = Config::load_from(path);
            Ok(toml::to_string_pretty(&config)?)
        }
        ConfigAction::Get { key } => Ok(Config::load_from(path).get(key) + "\n"),
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(path);
            config.set(key, &value)?;
            config.save_to(path)?;
            Ok(format!("{:?} = {}\n", key, config.get(key)))
        }
        ConfigAction::Unset { key } => {
            let mut config = Config::load_from(path);
            config.unset(key);
            config.save_to(path)?;
            Ok(format!("{:?} reset to {}\n", key, config.get(key)))
        }
        ConfigAction::Path => Ok(format!("{}\n", path.display())),
        ConfigAction::Init => {
            if path.exists() {
                bail!("Config file already exists: {}", path.display());
            }
            Config::default().save_to(path)?;
            Ok(format!("Created {}\n", path.display()))
        }
    }
}
