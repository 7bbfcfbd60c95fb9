//! Resolves the completion service configuration.
//!
//! Priority:
//! 1. `~/.config/inbox/secret.json` (`openai` section)
//! 2. Environment variables (`OPENAI_API_KEY`, `OPENAI_MODEL_NAME`, `OPENAI_BASE_URL`)
//!
//! A missing key is not an error: the config comes back with an empty key.

use crate::storage::{SecretStorage, SecretStorageError};
use inbox_core::config::CompletionConfig;
use inbox_core::error::Result;
use tracing::{debug, warn};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const MODEL_VAR: &str = "OPENAI_MODEL_NAME";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";

pub struct ConfigService {
    storage: Option<SecretStorage>,
}

impl ConfigService {
    /// Uses the default secret.json location, if the home directory is known.
    pub fn new() -> Self {
        Self {
            storage: SecretStorage::new().ok(),
        }
    }

    pub fn with_storage(storage: SecretStorage) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Resolves against the process environment.
    pub fn completion_config(&self) -> Result<CompletionConfig> {
        self.resolve(|key| std::env::var(key).ok())
    }

    /// Resolves with an explicit environment lookup.
    ///
    /// A secret.json that exists but cannot be read or parsed is an error;
    /// a missing one falls through to the environment.
    pub fn resolve<F>(&self, env: F) -> Result<CompletionConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(storage) = &self.storage {
            match storage.load() {
                Ok(secret) => {
                    if let Some(openai) = secret.openai {
                        debug!(path = %storage.path().display(), "Using completion config from secret file");
                        return Ok(openai.into());
                    }
                }
                Err(SecretStorageError::NotFound(_)) => {}
                Err(e) => return Err(e.into()),
            }
        }

        let api_key = env(API_KEY_VAR).unwrap_or_default();
        let mut config = CompletionConfig::new(api_key);
        if let Some(model) = env(MODEL_VAR) {
            config = config.with_model(model);
        }
        if let Some(base_url) = env(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }

        if !config.has_api_key() {
            warn!(
                "{} not found in secret.json or environment; copilot requests will be unauthenticated",
                API_KEY_VAR
            );
        }

        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbox_core::InboxError;
    use inbox_core::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_secret_file_wins_over_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, r#"{"openai": {"api_key": "from-file"}}"#).unwrap();

        let service = ConfigService::with_storage(SecretStorage::with_path(path));
        let config = service
            .resolve(env_of(&[(API_KEY_VAR, "from-env")]))
            .unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_missing_file_falls_back_to_env() {
        let temp_dir = TempDir::new().unwrap();
        let service =
            ConfigService::with_storage(SecretStorage::with_path(temp_dir.path().join("none.json")));

        let config = service
            .resolve(env_of(&[
                (API_KEY_VAR, "from-env"),
                (MODEL_VAR, "gpt-4o"),
                (BASE_URL_VAR, "http://127.0.0.1:1234/v1"),
            ]))
            .unwrap();
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "http://127.0.0.1:1234/v1");
    }

    #[test]
    fn test_file_without_openai_section_falls_back_to_env() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{}").unwrap();

        let service = ConfigService::with_storage(SecretStorage::with_path(path));
        let config = service.resolve(env_of(&[(API_KEY_VAR, "k")])).unwrap();
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn test_absent_key_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let service =
            ConfigService::with_storage(SecretStorage::with_path(temp_dir.path().join("none.json")));

        let config = service.resolve(env_of(&[])).unwrap();
        assert!(!config.has_api_key());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("secret.json");
        fs::write(&path, "{ nope").unwrap();

        let service = ConfigService::with_storage(SecretStorage::with_path(path));
        let err = service.resolve(env_of(&[])).unwrap_err();
        assert!(matches!(err, InboxError::Config(_)));
    }
}
