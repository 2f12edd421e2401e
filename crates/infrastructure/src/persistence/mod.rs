//! Persistence layer over SQLite

pub mod connection;
pub mod kv_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use kv_store::SqliteKeyValueStore;
