// CLI configuration file support

use crate::error::Result;
use crate::issue::Priority;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Optional settings read from a YAML config file
///
/// Every field is optional; flags win over config, config over built-in
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the issue store
    pub store_path: Option<PathBuf>,
    /// Auto-dismiss duration for notifications, in milliseconds
    pub notify_duration_ms: Option<u64>,
    /// Priority assumed when creation input omits one
    pub default_priority: Option<Priority>,
}

impl Config {
    /// Load configuration from the given file
    ///
    /// A missing file yields the default (empty) configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&text)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Conventional per-user config location, if one can be determined
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("issuestore").join("config.yaml"))
    }
}
