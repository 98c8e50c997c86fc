//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of all languages supported by the
//! application, together with the translation tables authored for them. It uses
//! a singleton pattern with `OnceLock` to ensure thread-safe initialization and
//! access. Everything here is pure: the tables are embedded at compile time and
//! never change.

use crate::i18n::merge::{merge_tables, TranslationTable};
use crate::i18n::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Configuration for a supported language.
///
/// Contains all metadata for a specific language, including its code, names,
/// enabled status, whether it's the reference language, and the authored
/// translation source.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "French")
    pub name: &'static str,

    /// Native name of the language (e.g., "English", "Français")
    pub native_name: &'static str,

    /// Whether this is the reference language (only one should be true).
    /// Its table defines the canonical key space.
    pub is_canonical: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,

    /// Authored translation table as JSON text, possibly partial
    pub source: &'static str,
}

/// Global language registry singleton.
///
/// This registry contains all supported languages and their parsed tables. It's
/// initialized once on first access and remains immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    tables: HashMap<&'static str, TranslationTable>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    ///
    /// # Panics
    /// Panics on first access if an embedded translation table is not a flat
    /// JSON object of strings. The tables ship inside the binary, so this is a
    /// build defect caught by the registry tests.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry::from_configs(default_languages()))
    }

    fn from_configs(languages: Vec<LanguageConfig>) -> LanguageRegistry {
        let tables = languages
            .iter()
            .map(|config| {
                let table: TranslationTable = serde_json::from_str(config.source)
                    .unwrap_or_else(|e| {
                        panic!("Translation table for '{}' is malformed: {}", config.code, e)
                    });
                (config.code, table)
            })
            .collect();

        LanguageRegistry { languages, tables }
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registration order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the reference language configuration.
    ///
    /// # Panics
    /// Panics if no canonical language is found or if multiple canonical
    /// languages are defined (this indicates a configuration error).
    pub fn canonical(&self) -> &LanguageConfig {
        let canonical_langs: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_canonical)
            .collect();

        match canonical_langs.len() {
            0 => panic!("No canonical language found in registry"),
            1 => canonical_langs[0],
            _ => panic!("Multiple canonical languages found in registry"),
        }
    }

    /// Get a language configuration by its code, if that language is enabled.
    pub fn get_enabled(&self, code: &str) -> Option<&LanguageConfig> {
        self.get_by_code(code).filter(|lang| lang.enabled)
    }

    /// The table exactly as authored for `language`. May be partial.
    pub fn raw_table(&self, language: Language) -> &TranslationTable {
        &self.tables[language.code()]
    }

    /// The reference language's table, which covers every canonical key.
    pub fn reference_table(&self) -> &TranslationTable {
        &self.tables[self.canonical().code]
    }

    /// Produce the complete table for `language`.
    ///
    /// The reference language returns its own table; every other language
    /// returns the reference table overlaid by its own entries.
    pub fn full_table(&self, language: Language) -> TranslationTable {
        let reference = self.reference_table();
        if language.is_canonical() {
            return reference.clone();
        }
        merge_tables(reference, self.raw_table(language), None)
    }

    /// Reference entries for every canonical key `language` has not translated.
    ///
    /// Intended for completeness audits, not runtime resolution.
    pub fn list_missing_keys(&self, language: Language) -> TranslationTable {
        let raw = self.raw_table(language);
        self.reference_table()
            .iter()
            .filter(|(key, _)| !raw.contains_key(*key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

/// Default language configurations.
///
/// English is the reference language; French is partially translated and
/// completed from English at load time.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_canonical: true,
            enabled: true,
            source: include_str!("../../locales/en.json"),
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_canonical: false,
            enabled: true,
            source: include_str!("../../locales/fr.json"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_get_by_code_english() {
        let registry = LanguageRegistry::get();
        let config = registry.get_by_code("en").unwrap();

        assert_eq!(config.code, "en");
        assert_eq!(config.name, "English");
        assert!(config.is_canonical);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_french() {
        let registry = LanguageRegistry::get();
        let config = registry.get_by_code("fr").unwrap();

        assert_eq!(config.native_name, "Français");
        assert!(!config.is_canonical);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("de").is_none());
    }

    #[test]
    fn test_list_enabled_order() {
        let codes: Vec<_> = LanguageRegistry::get()
            .list_enabled()
            .iter()
            .map(|lang| lang.code)
            .collect();
        assert_eq!(codes, vec!["en", "fr"]);
    }

    #[test]
    fn test_canonical_returns_english() {
        assert_eq!(LanguageRegistry::get().canonical().code, "en");
    }

    #[test]
    fn test_get_enabled() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_enabled("en").is_some());
        assert!(registry.get_enabled("fr").is_some());
        assert!(registry.get_enabled("de").is_none());
    }

    fn registry_with_disabled_german() -> LanguageRegistry {
        LanguageRegistry::from_configs(vec![
            LanguageConfig {
                code: "en",
                name: "English",
                native_name: "English",
                is_canonical: true,
                enabled: true,
                source: r#"{"greeting": "Hello"}"#,
            },
            LanguageConfig {
                code: "de",
                name: "German",
                native_name: "Deutsch",
                is_canonical: false,
                enabled: false,
                source: r#"{"greeting": "Hallo"}"#,
            },
        ])
    }

    #[test]
    fn test_disabled_language_is_known_but_not_enabled() {
        let registry = registry_with_disabled_german();

        assert_eq!(registry.get_by_code("de").map(|lang| lang.code), Some("de"));
        assert!(registry.get_enabled("de").is_none());
        assert!(registry.get_enabled("en").is_some());
    }

    #[test]
    fn test_list_enabled_skips_disabled() {
        let registry = registry_with_disabled_german();
        let codes: Vec<_> = registry.list_enabled().iter().map(|lang| lang.code).collect();
        assert_eq!(codes, vec!["en"]);
    }

    // ==================== Table Tests ====================

    #[test]
    fn test_embedded_tables_parse() {
        let registry = LanguageRegistry::get();
        assert!(!registry.raw_table(Language::ENGLISH).is_empty());
        assert!(!registry.raw_table(Language::FRENCH).is_empty());
    }

    #[test]
    fn test_french_raw_table_is_partial() {
        let registry = LanguageRegistry::get();
        assert!(
            registry.raw_table(Language::FRENCH).len()
                < registry.raw_table(Language::ENGLISH).len()
        );
    }

    #[test]
    fn test_full_table_covers_canonical_keys_for_every_language() {
        let registry = LanguageRegistry::get();
        let reference_keys: Vec<_> = registry.reference_table().keys().collect();

        for config in registry.list_enabled() {
            let language = Language::from_code(config.code).unwrap();
            let full = registry.full_table(language);
            assert_eq!(
                full.keys().collect::<Vec<_>>(),
                reference_keys,
                "{} table is incomplete",
                config.code
            );
        }
    }

    #[test]
    fn test_full_table_prefers_own_translation() {
        let full = LanguageRegistry::get().full_table(Language::FRENCH);
        assert_eq!(full["common.cancel"], "Annuler");
        // Untranslated keys fall back to English
        assert_eq!(full["settings.clear_cache"], "Clear cached data");
    }

    #[test]
    fn test_full_table_reference_is_itself() {
        let registry = LanguageRegistry::get();
        assert_eq!(
            &registry.full_table(Language::ENGLISH),
            registry.reference_table()
        );
    }

    // ==================== Missing Key Tests ====================

    #[test]
    fn test_list_missing_keys_reference_is_empty() {
        let missing = LanguageRegistry::get().list_missing_keys(Language::ENGLISH);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_list_missing_keys_french() {
        let missing = LanguageRegistry::get().list_missing_keys(Language::FRENCH);

        assert!(missing.contains_key("errors.offline"));
        assert_eq!(
            missing.get("settings.version").map(String::as_str),
            Some("Version {{version}}")
        );
        assert!(!missing.contains_key("common.cancel"));
    }

    #[test]
    #[should_panic(expected = "malformed")]
    fn test_malformed_source_panics() {
        LanguageRegistry::from_configs(vec![LanguageConfig {
            code: "xx",
            name: "Broken",
            native_name: "Broken",
            is_canonical: true,
            enabled: true,
            source: "[1, 2, 3]",
        }]);
    }
}
