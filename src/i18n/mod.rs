//! Internationalization (i18n) module: language resolution, translation tables,
//! caching and change notification.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages and their authored tables
//! - `language`: Type-safe Language type validated against the registry
//! - `merge`: Pure overlay merge that completes partial tables
//! - `validator`: Placeholder and dead-key audit of authored tables
//! - `resolver`: Startup language precedence (override, saved, device, fallback)
//! - `cache`: In-memory merged tables mirrored to the durable store
//! - `metrics`: Per-cache counters
//! - `notify`: Ordered language-change listeners
//! - `engine`: Key lookup and `{{placeholder}}` interpolation
//! - `service`: The `Localization` service tying it all together
//!
//! # Example
//!
//! ```rust,ignore
//! use app_localization::i18n::{InitOptions, Localization};
//!
//! let mut l10n = Localization::new(store, locale_provider);
//! l10n.initialize(InitOptions::default()).await?;
//!
//! let _sub = l10n.subscribe(|language| println!("now speaking {}", language));
//! l10n.change_language("fr").await?;
//! let hello = l10n.t("home.greeting", &[("name", "Ada")]);
//! ```

mod cache;
mod engine;
mod language;
mod merge;
mod metrics;
mod notify;
mod registry;
mod resolver;
mod service;
mod validator;

pub use cache::{CacheStats, LanguageOverrides, TranslationCache};
pub use engine::{
    interpolate, InterpolatingEngine, InterpolationParams, LookupEngine, Translated, Translator,
};
pub use language::Language;
pub use merge::{merge_tables, TranslationTable};
pub use metrics::{CacheMetrics, MetricsReport};
pub use notify::{NotificationBus, Subscription};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::LanguageResolver;
pub use service::{AvailableLanguage, InitOptions, LifecycleState, Localization};
pub use validator::{TranslationValidator, ValidationReport};
