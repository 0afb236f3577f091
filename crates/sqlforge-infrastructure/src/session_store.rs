//! TOML-file session store implementation.
//!
//! Persists the session mirror as a single small document so a restarted
//! client can resume a login. Load-side failures of any kind map to
//! "absent": the client falls back to the logged-out state rather than
//! ever observing a half-valid session.

use std::path::PathBuf;

use async_trait::async_trait;
use sqlforge_core::error::{Result, SqlForgeError};
use sqlforge_core::session::{Session, SessionStore};

use crate::paths::SqlForgePaths;

/// Session store backed by a TOML file under the sqlforge config
/// directory.
///
/// Token and username are written together in one document via
/// write-to-temp-then-rename, so a reader never sees one field without
/// the other.
pub struct TomlSessionStore {
    file_path: PathBuf,
}

impl TomlSessionStore {
    /// Creates a store writing to the given file path.
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    /// Creates a store at the default location (`session.toml` under the
    /// sqlforge config directory).
    pub fn new_default() -> Result<Self> {
        let file_path = SqlForgePaths::session_file()
            .map_err(|e| SqlForgeError::config(format!("Failed to resolve session path: {}", e)))?;
        Ok(Self::new(file_path))
    }

    fn temp_path(&self) -> PathBuf {
        self.file_path.with_extension("toml.tmp")
    }

    #[cfg(unix)]
    async fn restrict_permissions(&self) -> std::io::Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        tokio::fs::set_permissions(&self.file_path, permissions).await
    }

    #[cfg(not(unix))]
    async fn restrict_permissions(&self) -> std::io::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let document = toml::to_string_pretty(session)?;
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, document).await?;
        tokio::fs::rename(&temp_path, &self.file_path).await?;
        self.restrict_permissions().await?;

        tracing::debug!("Persisted session for '{}'", session.username);
        Ok(())
    }

    async fn load(&self) -> Option<Session> {
        let raw = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(raw) => raw,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Session file unreadable, treating as logged out: {}", e);
                }
                return None;
            }
        };

        match toml::from_str::<Session>(&raw) {
            Ok(session) if !session.token.is_empty() && !session.username.is_empty() => {
                Some(session)
            }
            Ok(_) => {
                tracing::warn!("Session file incomplete, treating as logged out");
                None
            }
            Err(e) => {
                tracing::warn!("Session file malformed, treating as logged out: {}", e);
                None
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
