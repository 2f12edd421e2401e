//! Application configuration
//!
//! Loaded from an optional `config.toml` next to the binary, overridable via
//! `LEKGOTLA_`-prefixed environment variables.

mod assistant;
mod database;

use serde::{Deserialize, Serialize};

pub use assistant::AssistantConfig;
pub use database::DatabaseConfig;

/// Default administrator credentials, used only to seed an empty store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_admin_username")]
    pub default_username: String,
    #[serde(default = "default_admin_password")]
    pub default_password: String,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_admin_password() -> String {
    "admin@1".to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            default_username: default_admin_username(),
            default_password: default_admin_password(),
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub admin: AdminConfig,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (e.g., LEKGOTLA_DATABASE_PATH)
            .add_source(
                config::Environment::with_prefix("LEKGOTLA")
                    .separator("_")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
