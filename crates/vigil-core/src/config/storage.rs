//! Local vault storage configuration.

use serde::{Deserialize, Serialize};

/// Local vault storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for all persisted state.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// Session vault file name, relative to `data_root`.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            session_file: default_session_file(),
        }
    }
}

impl StorageConfig {
    /// Absolute-ish path of the session vault file.
    pub fn session_path(&self) -> String {
        format!("{}/{}", self.data_root.trim_end_matches('/'), self.session_file)
    }
}

fn default_data_root() -> String {
    "data".to_string()
}

fn default_session_file() -> String {
    "session.json".to_string()
}
