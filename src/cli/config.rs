use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::browser::session::LaunchOptions;
use crate::error::ConfigError;
use crate::perception::PerceptionConfig;

pub const DEFAULT_CONFIG_PATH: &str = "form-perception.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-perception",
    version,
    about = "Stable element addressing over accessibility snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-perception.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse one snapshot file and print the candidate elements as JSON
    Parse {
        /// Snapshot text file
        #[arg(long)]
        file: String,
    },

    /// Feed recorded snapshots through take_snapshot, then observe for each later file
    Replay {
        /// Snapshot files, in capture order
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Open a page in the browser and print its full snapshot
    Live {
        /// URL to open
        #[arg(long)]
        url: String,

        /// Show the browser window
        #[arg(long, default_value_t = false)]
        headed: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-perception.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub perception: PerceptionConfig,
    #[serde(default)]
    pub browser: LaunchOptions,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load and validate a config file. A missing default file is not an error.
pub fn try_load_config(path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) if path.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::Read {
                path: config_path.to_string(),
                source: e,
            });
        }
    };

    let config: AppConfig = serde_yaml::from_str(&content).map_err(|e| ConfigError::Yaml {
        path: config_path.to_string(),
        source: e,
    })?;

    config.perception.thresholds.validate()?;
    Ok(config)
}

/// Load config from a YAML file. Returns defaults if the file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    match try_load_config(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{e}; using defaults");
            AppConfig::default()
        }
    }
}

/// Map `-v` count to a log level filter. `RUST_LOG` still wins when set.
pub fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
