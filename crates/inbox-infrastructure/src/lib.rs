//! Infrastructure layer for the inbox: platform paths and secret loading.

pub mod config_service;
pub mod paths;
pub mod storage;

pub use config_service::ConfigService;
pub use paths::InboxPaths;
pub use storage::{SecretStorage, SecretStorageError};
