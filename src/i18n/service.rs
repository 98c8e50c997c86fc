//! Localization service: the single entry point applications talk to.
//!
//! One `Localization` value is created at startup, initialized once, and then
//! passed by reference to whatever needs strings or language changes. It moves
//! from `Uninitialized` to `Ready` exactly once; a failed `initialize` leaves it
//! `Uninitialized` so the caller can retry.

use crate::error::LocalizationError;
use crate::i18n::cache::{CacheStats, LanguageOverrides, TranslationCache};
use crate::i18n::engine::{
    InterpolatingEngine, InterpolationParams, LookupEngine, Translated, Translator,
};
use crate::i18n::metrics::MetricsReport;
use crate::i18n::notify::{NotificationBus, Subscription};
use crate::i18n::resolver::LanguageResolver;
use crate::i18n::{Language, LanguageRegistry, TranslationTable};
use crate::locale::LocaleProvider;
use crate::store::{KeyValueStore, CURRENT_LANGUAGE_KEY, LANGUAGE_OVERRIDE_KEY};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Lifecycle of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Ready,
}

/// Options for [`Localization::initialize`].
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Tables merged over the shipped translations, per language
    pub overrides: LanguageOverrides,

    /// Whether a pinned `language_override` may decide the startup language
    pub allow_override: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            overrides: LanguageOverrides::new(),
            allow_override: true,
        }
    }
}

/// Entry for a language picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailableLanguage {
    pub code: &'static str,
    pub display_name: &'static str,
}

pub struct Localization<E: LookupEngine = InterpolatingEngine> {
    state: LifecycleState,
    active: Language,
    store: Arc<dyn KeyValueStore>,
    locale_provider: Arc<dyn LocaleProvider>,
    cache: TranslationCache,
    bus: NotificationBus,
    engine: E,
}

impl Localization<InterpolatingEngine> {
    pub fn new(store: Arc<dyn KeyValueStore>, locale_provider: Arc<dyn LocaleProvider>) -> Self {
        Self::with_engine(store, locale_provider, InterpolatingEngine::new())
    }
}

impl<E: LookupEngine> Localization<E> {
    pub fn with_engine(
        store: Arc<dyn KeyValueStore>,
        locale_provider: Arc<dyn LocaleProvider>,
        engine: E,
    ) -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            active: Language::canonical(),
            cache: TranslationCache::new(Arc::clone(&store)),
            store,
            locale_provider,
            bus: NotificationBus::new(),
            engine,
        }
    }

    /// Resolve the startup language, build every table and start the engine.
    ///
    /// Calling this on a ready service does nothing.
    pub async fn initialize(&mut self, options: InitOptions) -> Result<(), LocalizationError> {
        if self.state == LifecycleState::Ready {
            debug!("Localization already initialized, skipping");
            return Ok(());
        }

        let language = LanguageResolver::new(self.store.as_ref(), self.locale_provider.as_ref())
            .resolve_initial_language(options.allow_override)
            .await;

        self.cache.ensure_loaded(&options.overrides).await;

        self.engine
            .init(self.cache.tables(), language, Language::canonical())
            .await
            .map_err(LocalizationError::Initialization)?;

        self.active = language;
        self.state = LifecycleState::Ready;
        info!("Localization initialized with language {}", language);
        Ok(())
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    pub fn current_language(&self) -> Language {
        self.active
    }

    /// Supported languages in registry order.
    ///
    /// Display names are each language's own name and do not follow the active
    /// language.
    pub fn available_languages(&self) -> Vec<AvailableLanguage> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| AvailableLanguage {
                code: config.code,
                display_name: config.native_name,
            })
            .collect()
    }

    /// Switch the active language, remember it, and notify subscribers.
    ///
    /// The code is validated before anything changes. Failing to save the
    /// choice is logged; the switch still happens for this process.
    pub async fn change_language(&mut self, code: &str) -> Result<(), LocalizationError> {
        let language = Language::from_code(code)?;
        if self.state != LifecycleState::Ready {
            return Err(LocalizationError::NotInitialized);
        }

        self.engine.change_language(language);

        if let Err(e) = self.store.set(CURRENT_LANGUAGE_KEY, language.code()).await {
            warn!("Failed to save language choice {}: {}", language, e);
        }

        self.active = language;
        info!("Language changed to {}", language);
        self.bus.emit(language);
        Ok(())
    }

    /// Look up `key` in the active language and interpolate `params`.
    ///
    /// With no key, or an empty one, the lookup itself is returned as
    /// [`Translated::Unresolved`] instead of a string.
    pub fn translate(&self, key: Option<&str>, params: &InterpolationParams<'_>) -> Translated<'_> {
        match key {
            Some(key) if !key.is_empty() => Translated::Text(self.engine.lookup(key, params)),
            _ => Translated::Unresolved(Translator::new(&self.engine)),
        }
    }

    /// String lookup for callers that always have a key.
    pub fn t(&self, key: &str, params: &InterpolationParams<'_>) -> String {
        self.engine.lookup(key, params)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Language) + Send + Sync + 'static,
    {
        self.bus.subscribe(listener)
    }

    /// Pin `code` as the startup language for future initializations.
    ///
    /// Takes effect on the next process start; the active language is not
    /// changed.
    pub async fn set_language_override(&self, code: &str) -> Result<(), LocalizationError> {
        let language = Language::from_code(code)?;
        if let Err(e) = self.store.set(LANGUAGE_OVERRIDE_KEY, language.code()).await {
            warn!("Failed to save language override {}: {}", language, e);
        }
        Ok(())
    }

    pub async fn clear_language_override(&self) {
        if let Err(e) = self.store.remove(LANGUAGE_OVERRIDE_KEY).await {
            warn!("Failed to remove language override: {}", e);
        }
    }

    /// Drop cached tables and wipe persisted localization data.
    ///
    /// The running session keeps working: the engine already holds its tables,
    /// and the active language and subscribers are untouched.
    pub async fn clear_cache(&mut self) {
        self.cache.clear().await;
        info!("Localization cache cleared");
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub fn cache_metrics(&self) -> MetricsReport {
        self.cache.metrics()
    }

    /// Reference entries `code` has no translation for.
    pub fn missing_keys(&self, code: &str) -> Result<TranslationTable, LocalizationError> {
        let language = Language::from_code(code)?;
        Ok(LanguageRegistry::get().list_missing_keys(language))
    }
}
