//! Optional `citygraph.toml` in the working directory.
//!
//! ```toml
//! [input]
//! default_file = "tasks.json"
//! data_dir = "data"
//!
//! [output]
//! format = "pretty"   # pretty | text | json
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputMode;

pub const CONFIG_FILE: &str = "citygraph.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_file")]
    pub default_file: PathBuf,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            default_file: default_file(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Consulted after `--format` and `FORMAT`, before TTY detection.
    #[serde(default)]
    pub format: Option<OutputMode>,
}

fn default_file() -> PathBuf {
    PathBuf::from("tasks.json")
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Load `citygraph.toml` from `root`, or defaults when the file is absent.
pub fn load_config(root: &Path) -> Result<Config> {
    let path = root.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<Config>(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
