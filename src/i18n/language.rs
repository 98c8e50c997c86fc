//! Language type: validated, closed-set language identifier.
//!
//! A `Language` can only be built from a code the registry knows and has
//! enabled, so holding one is proof that tables exist for it.

use crate::error::LocalizationError;
use crate::i18n::{LanguageConfig, LanguageRegistry};
use std::fmt;

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "en", "fr")
    code: &'static str,
}

impl Language {
    /// English, the reference language.
    pub const ENGLISH: Language = Language { code: "en" };

    /// French.
    pub const FRENCH: Language = Language { code: "fr" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err(LocalizationError::UnsupportedLanguage)` otherwise
    pub fn from_code(code: &str) -> Result<Language, LocalizationError> {
        LanguageRegistry::get()
            .get_enabled(code)
            .map(|config| Language { code: config.code })
            .ok_or_else(|| LocalizationError::UnsupportedLanguage(code.to_string()))
    }

    /// Build a Language from a locale tag such as `fr-FR`, `fr_CA` or `FR`.
    ///
    /// Only the primary language subtag is considered; it is matched
    /// case-insensitively.
    pub fn from_locale_tag(tag: &str) -> Option<Language> {
        let primary = tag
            .split(['-', '_', '.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Language::from_code(&primary).ok()
    }

    /// Get the reference (fallback) language.
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// Get the ISO 639-1 language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed properly (via `from_code`
    /// or constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language (e.g., "Français").
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the reference language.
    pub fn is_canonical(&self) -> bool {
        self.config().is_canonical
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
