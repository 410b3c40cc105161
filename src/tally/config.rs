use crate::error::{Result, TallyError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_BASE_URL: &str = "http://localhost:8765";
const DEFAULT_COLLECTION: &str = "inventory";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Store connection settings, kept in config.json next to nothing else —
/// credentials and endpoints stay out of the library core.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoreConfig {
    /// Base URL of the remote document store.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Collection holding the inventory documents.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Optional bearer token sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Opt-in to conditional writes for increments and decrements.
    #[serde(default)]
    pub checked_writes: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            collection: default_collection(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            checked_writes: false,
        }
    }
}

impl StoreConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TallyError::Io)?;
        let config: StoreConfig =
            serde_json::from_str(&content).map_err(TallyError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TallyError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TallyError::Serialization)?;
        fs::write(config_path, content).map_err(TallyError::Io)?;
        Ok(())
    }

    /// Set a key by its CLI name. Unknown keys and unparsable values are
    /// config errors.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "base-url" => self.base_url = value.trim_end_matches('/').to_string(),
            "collection" => self.collection = value.to_string(),
            "api-key" => {
                self.api_key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            "timeout" => {
                self.timeout_secs = value
                    .parse()
                    .map_err(|_| TallyError::Config(format!("invalid timeout: {}", value)))?
            }
            "checked-writes" => {
                self.checked_writes = value
                    .parse()
                    .map_err(|_| TallyError::Config(format!("invalid bool: {}", value)))?
            }
            other => return Err(TallyError::Config(format!("unknown key: {}", other))),
        }
        Ok(())
    }
}
