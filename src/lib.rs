//! Localization resolution and caching service.
//!
//! Decides which language the application runs in, builds complete translation
//! tables from partial ones, mirrors them to durable storage, and tells
//! interested parts of the application when the language changes.

pub mod config;
pub mod error;
pub mod i18n;
pub mod locale;
pub mod store;

pub use error::{LocalizationError, ProviderError, StoreError};
pub use i18n::{InitOptions, Language, Localization};
