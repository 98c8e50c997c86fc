//! String lookup engine.
//!
//! The engine holds the fully merged tables handed over at initialization and
//! answers key lookups for the active language, substituting `{{name}}`
//! placeholders from the caller's parameters.

use crate::i18n::merge::TranslationTable;
use crate::i18n::validator::placeholder_regex;
use crate::i18n::Language;
use anyhow::{bail, Result};
use async_trait::async_trait;
use regex::Captures;
use std::collections::HashMap;
use std::fmt;

/// Named interpolation values, e.g. `&[("name", "Ada")]`.
pub type InterpolationParams<'p> = [(&'p str, &'p str)];

#[async_trait]
pub trait LookupEngine: Send + Sync {
    /// Seed the engine with `resources` and activate `language`.
    async fn init(
        &mut self,
        resources: HashMap<Language, TranslationTable>,
        language: Language,
        fallback: Language,
    ) -> Result<()>;

    fn change_language(&mut self, language: Language);

    /// Resolve `key` in the active language. Unknown keys resolve to the key.
    fn lookup(&self, key: &str, params: &InterpolationParams<'_>) -> String;
}

/// Default engine: in-memory tables plus `{{placeholder}}` interpolation.
#[derive(Debug, Clone)]
pub struct InterpolatingEngine {
    resources: HashMap<Language, TranslationTable>,
    language: Language,
    fallback: Language,
}

impl Default for InterpolatingEngine {
    fn default() -> Self {
        Self {
            resources: HashMap::new(),
            language: Language::canonical(),
            fallback: Language::canonical(),
        }
    }
}

impl InterpolatingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

#[async_trait]
impl LookupEngine for InterpolatingEngine {
    async fn init(
        &mut self,
        resources: HashMap<Language, TranslationTable>,
        language: Language,
        fallback: Language,
    ) -> Result<()> {
        if !resources.contains_key(&fallback) {
            bail!("No translation resources for fallback language '{}'", fallback);
        }
        if !resources.contains_key(&language) {
            bail!("No translation resources for language '{}'", language);
        }

        self.resources = resources;
        self.language = language;
        self.fallback = fallback;
        Ok(())
    }

    fn change_language(&mut self, language: Language) {
        self.language = language;
    }

    fn lookup(&self, key: &str, params: &InterpolationParams<'_>) -> String {
        let template = [self.language, self.fallback]
            .iter()
            .filter_map(|language| self.resources.get(language))
            .find_map(|table| table.get(key));

        match template {
            Some(template) => interpolate(template, params),
            None => key.to_string(),
        }
    }
}

/// Replace each `{{name}}` with its value from `params`, in a single pass.
///
/// Placeholders without a matching parameter are left as written.
pub fn interpolate(template: &str, params: &InterpolationParams<'_>) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            params
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Lookup bound to an engine, handed out when `translate` receives no key.
#[derive(Clone, Copy)]
pub struct Translator<'a> {
    engine: &'a dyn LookupEngine,
}

impl<'a> Translator<'a> {
    pub fn new(engine: &'a dyn LookupEngine) -> Self {
        Self { engine }
    }

    pub fn t(&self, key: &str, params: &InterpolationParams<'_>) -> String {
        self.engine.lookup(key, params)
    }
}

impl fmt::Debug for Translator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Translator").finish_non_exhaustive()
    }
}

/// Result of `Localization::translate`.
///
/// `Unresolved` is returned when no key (or an empty key) was supplied: the
/// caller gets the lookup itself instead of a string. This mirrors long-standing
/// behaviour that callers may depend on; it is kept deliberately and is not an
/// error.
#[derive(Debug, Clone)]
pub enum Translated<'a> {
    Text(String),
    Unresolved(Translator<'a>),
}

impl<'a> Translated<'a> {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Translated::Text(text) => Some(text),
            Translated::Unresolved(_) => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Translated::Unresolved(_))
    }
}

/// Unresolved lookups render as an empty string.
impl fmt::Display for Translated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translated::Text(text) => f.write_str(text),
            Translated::Unresolved(_) => Ok(()),
        }
    }
}
