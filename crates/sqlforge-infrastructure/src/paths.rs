//! Unified path management for sqlforge configuration files.
//!
//! All sqlforge configuration and the persisted session live under a
//! single per-user config directory. This keeps the layout consistent
//! across platforms (Linux, macOS, Windows).

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find configuration directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for sqlforge.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/sqlforge/          # Config directory (XDG on Linux/macOS)
/// ├── config.toml              # Client configuration (API base URL)
/// └── session.toml             # Persisted session mirror (token + username)
/// ```
pub struct SqlForgePaths;

impl SqlForgePaths {
    /// Returns the sqlforge configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/sqlforge/`)
    /// - `Err(PathError::ConfigDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("sqlforge"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session file.
    ///
    /// # Security Note
    ///
    /// The session file holds a live bearer token; the store restricts it
    /// to user read/write (600) on Unix systems.
    pub fn session_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.toml"))
    }
}
