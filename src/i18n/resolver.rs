//! Startup language resolution.
//!
//! Precedence, first match wins:
//! 1. pinned override (only when the caller allows it)
//! 2. language saved by the last successful change
//! 3. the device's most preferred locale
//! 4. the reference language
//!
//! A failing store or provider only removes its own level from the chain, so
//! resolution always produces a language.

use crate::i18n::Language;
use crate::locale::LocaleProvider;
use crate::store::{KeyValueStore, CURRENT_LANGUAGE_KEY, LANGUAGE_OVERRIDE_KEY};
use tracing::{debug, warn};

pub struct LanguageResolver<'a> {
    store: &'a dyn KeyValueStore,
    locale_provider: &'a dyn LocaleProvider,
}

impl<'a> LanguageResolver<'a> {
    pub fn new(store: &'a dyn KeyValueStore, locale_provider: &'a dyn LocaleProvider) -> Self {
        Self {
            store,
            locale_provider,
        }
    }

    pub async fn resolve_initial_language(&self, allow_override: bool) -> Language {
        if allow_override {
            if let Some(language) = self.stored_language(LANGUAGE_OVERRIDE_KEY).await {
                debug!("Using pinned language override: {}", language);
                return language;
            }
        }

        if let Some(language) = self.stored_language(CURRENT_LANGUAGE_KEY).await {
            debug!("Using saved language: {}", language);
            return language;
        }

        if let Some(language) = self.device_language() {
            debug!("Using device language: {}", language);
            return language;
        }

        let fallback = Language::canonical();
        debug!("No language preference found, falling back to {}", fallback);
        fallback
    }

    async fn stored_language(&self, key: &str) -> Option<Language> {
        let code = match self.store.get(key).await {
            Ok(Some(code)) => code,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read '{}' from store: {}", key, e);
                return None;
            }
        };

        match Language::from_code(&code) {
            Ok(language) => Some(language),
            Err(e) => {
                debug!("Ignoring stored '{}': {}", key, e);
                None
            }
        }
    }

    fn device_language(&self) -> Option<Language> {
        let locales = match self.locale_provider.preferred_locales() {
            Ok(locales) => locales,
            Err(e) => {
                warn!("Failed to query device locale: {}", e);
                return None;
            }
        };

        // Only the top preference is consulted.
        let top = locales.first()?;
        let language = Language::from_locale_tag(top);
        if language.is_none() {
            debug!("Device locale '{}' is not supported", top);
        }
        language
    }
}
