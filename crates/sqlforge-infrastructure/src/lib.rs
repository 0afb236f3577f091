//! Durable-storage and configuration layer for the sqlforge client.

pub mod config_service;
pub mod paths;
pub mod session_store;

pub use config_service::{ClientConfig, ConfigService};
pub use session_store::TomlSessionStore;
