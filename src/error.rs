//! Error types for the localization service.
//!
//! Only [`LocalizationError`] ever reaches callers of the service. Store and
//! locale provider failures are swallowed where they happen and logged, so a
//! broken disk or a missing OS locale never stops the application starting.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the localization service.
#[derive(Debug, Error)]
pub enum LocalizationError {
    /// The requested language code is not in the supported set.
    #[error("Unsupported language: '{0}'")]
    UnsupportedLanguage(String),

    /// The lookup engine could not be set up. The service stays uninitialized.
    #[error("Failed to initialize localization: {0}")]
    Initialization(#[source] anyhow::Error),

    /// An operation that needs a ready service was called before `initialize`.
    #[error("Localization has not been initialized")]
    NotInitialized,
}

/// Errors raised by a durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize store contents: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while querying the device locale.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Device reported no preferred locale")]
    NoLocale,

    #[error("Device locale provider unavailable: {0}")]
    Unavailable(String),
}
