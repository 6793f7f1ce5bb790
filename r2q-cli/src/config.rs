use anyhow::{Context, Result};
use r2q_ingest::{DEFAULT_BASE_URL, DEFAULT_CLIENT_ID};
use r2q_mint::export::DEFAULT_OUTPUT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional `~/.robinhood2quicken/config.toml`. Command-line flags win over it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiSection,
    pub export: ExportSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    /// Defaults to https://api.robinhood.com
    pub base_url: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Export executed trades (default: true)
    pub trades: bool,
    /// Export settled dividends (default: true)
    pub dividends: bool,
    /// Default output file (default: robinhood_output.csv)
    pub output: PathBuf,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
        }
    }
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            trades: true,
            dividends: true,
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

pub fn app_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".robinhood2quicken"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(app_home()?.join("config.toml"))
}

/// Load `path`, or the default location when `None`. A missing default file is not an error.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Ok(p) if p.exists() => p,
            _ => return Ok(Config::default()),
        },
    };
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}
