//! Secret configuration file storage.
//!
//! Read-only access to `~/.config/inbox/secret.json`. Keys are never
//! validated here.

use crate::paths::InboxPaths;
use inbox_core::InboxError;
use inbox_core::config::SecretConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Config directory not found.
    ConfigDirNotFound,
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Configuration file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::ConfigDirNotFound => {
                write!(f, "Could not determine home directory")
            }
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

impl From<SecretStorageError> for InboxError {
    fn from(err: SecretStorageError) -> Self {
        match err {
            SecretStorageError::NotFound(path) => {
                InboxError::not_found("secret file", path.display().to_string())
            }
            SecretStorageError::IoError(e) => e.into(),
            SecretStorageError::ParseError(e) => {
                InboxError::config(format!("Invalid secret.json: {}", e))
            }
            SecretStorageError::ConfigDirNotFound => {
                InboxError::config("Could not determine home directory")
            }
        }
    }
}

/// Storage for the secret configuration file (secret.json).
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a SecretStorage at the default path (~/.config/inbox/secret.json).
    pub fn new() -> Result<Self, SecretStorageError> {
        let path = InboxPaths::secret_file().map_err(|_| SecretStorageError::ConfigDirNotFound)?;
        Ok(Self { path })
    }

    /// Creates a SecretStorage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads and parses the secret file.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
