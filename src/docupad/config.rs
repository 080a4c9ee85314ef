use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_ROOT_URL: &str = "http://localhost";
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Connection settings for a remote Etherpad instance.
///
/// Absence of this struct is a valid, constructible state: every editor
/// operation then fails fast with a configuration error and no network call
/// is ever attempted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EtherpadSettings {
    /// Base URL of the Etherpad instance (e.g. "https://pad.example").
    pub url: String,
    pub apikey: String,

    /// Timeout for every remote call, structured or export fetch.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration for docupad, stored in config.json in the storage directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocupadConfig {
    /// Base URL of the hosting application. Feeds the derivation of pad
    /// session identifiers, so changing it re-keys every session.
    #[serde(default = "default_root_url")]
    pub root_url: String,

    #[serde(default)]
    pub etherpad: Option<EtherpadSettings>,
}

fn default_root_url() -> String {
    DEFAULT_ROOT_URL.to_string()
}

impl Default for DocupadConfig {
    fn default() -> Self {
        Self {
            root_url: default_root_url(),
            etherpad: None,
        }
    }
}

impl DocupadConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: DocupadConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }
}
