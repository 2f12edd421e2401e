//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: SQLite-backed
//! key-value persistence, the HTTP assistant client, and document encoding.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::{DataUrlEncoder, HttpAssistant};
pub use config::{AdminConfig, AppConfig, AssistantConfig, DatabaseConfig};
pub use persistence::{ConnectionPool, DatabaseError, SqliteKeyValueStore, create_pool};
pub use telemetry::{TelemetryError, init_telemetry};
