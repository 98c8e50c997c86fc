//! Translation cache with a write-through mirror in the durable store.
//!
//! The in-memory map is authoritative for the life of the process. Every
//! freshly built table is also written to the store as JSON under
//! `lang_cache_<code>`; a failed write is logged and counted, never returned.

use crate::i18n::merge::{overlay, TranslationTable};
use crate::i18n::metrics::{CacheMetrics, MetricsReport};
use crate::i18n::{Language, LanguageRegistry};
use crate::store::{cache_key, KeyValueStore};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Caller-supplied tables merged over the registry tables, per language.
pub type LanguageOverrides = HashMap<Language, TranslationTable>;

/// Diagnostic counts for the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Languages with a table in memory
    pub cached_languages: usize,

    /// Keys currently present in the durable store. Reads as 0 when the
    /// store cannot be listed; `MetricsReport::enumeration_failures` tells
    /// the two cases apart.
    pub stored_keys: usize,
}

pub struct TranslationCache {
    tables: HashMap<Language, TranslationTable>,
    store: Arc<dyn KeyValueStore>,
    metrics: CacheMetrics,
}

impl TranslationCache {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            tables: HashMap::new(),
            store,
            metrics: CacheMetrics::new(),
        }
    }

    /// Build and cache the full table of every enabled language not cached yet.
    ///
    /// Overrides only apply to languages built by this call; an already cached
    /// table is never recomputed or partially updated.
    pub async fn ensure_loaded(&mut self, overrides: &LanguageOverrides) {
        let registry = LanguageRegistry::get();

        for config in registry.list_enabled() {
            let Ok(language) = Language::from_code(config.code) else {
                continue;
            };

            if self.tables.contains_key(&language) {
                self.metrics.record_load_hit();
                continue;
            }

            let mut table = registry.full_table(language);
            if let Some(extra) = overrides.get(&language) {
                overlay(&mut table, extra);
            }
            self.metrics.record_merge();
            debug!("Built {} translation table ({} keys)", language, table.len());

            self.mirror(language, &table).await;
            self.tables.insert(language, table);
        }
    }

    async fn mirror(&self, language: Language, table: &TranslationTable) {
        let serialized = match serde_json::to_string(table) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("Failed to serialize {} translation table: {}", language, e);
                self.metrics.record_mirror_failure();
                return;
            }
        };

        match self.store.set(&cache_key(language.code()), &serialized).await {
            Ok(()) => self.metrics.record_mirror_write(),
            Err(e) => {
                warn!("Failed to persist {} translation table: {}", language, e);
                self.metrics.record_mirror_failure();
            }
        }
    }

    pub fn get(&self, language: Language) -> Option<&TranslationTable> {
        self.tables.get(&language)
    }

    /// Copy of every cached table, for seeding a lookup engine.
    pub fn tables(&self) -> HashMap<Language, TranslationTable> {
        self.tables.clone()
    }

    /// Drop every cached table and wipe the durable store.
    ///
    /// This removes *all* keys the store exposes, including the saved and
    /// pinned language choices.
    pub async fn clear(&mut self) {
        self.tables.clear();
        if let Err(e) = self.store.clear().await {
            warn!("Failed to clear persisted localization data: {}", e);
        }
    }

    pub async fn stats(&self) -> CacheStats {
        let stored_keys = match self.store.keys().await {
            Ok(keys) => keys.len(),
            Err(e) => {
                error!("Failed to enumerate store keys: {}", e);
                self.metrics.record_enumeration_failure();
                0
            }
        };

        CacheStats {
            cached_languages: self.tables.len(),
            stored_keys,
        }
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }
}
