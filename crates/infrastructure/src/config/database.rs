//! Database (SQLite) configuration.

use serde::{Deserialize, Serialize};

/// SQLite key-value store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (":memory:" for transient state)
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "lekgotla.db".to_string()
}

const fn default_max_connections() -> u32 {
    2
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}
