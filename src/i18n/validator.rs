//! Translation table validation.
//!
//! Checks an authored table against the reference table so that translators
//! keep every `{{placeholder}}` and don't ship keys the application never asks
//! for. Used by the `audit-translations` binary and the registry tests.

use crate::i18n::TranslationTable;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a translation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Critical errors that will produce broken strings at runtime
    pub errors: Vec<String>,

    /// Non-critical warnings about potential issues
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Create a new empty validation report
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Check if the report has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Check if the report has any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check if the report is clean (no errors or warnings)
    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for authored translation tables.
pub struct TranslationValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

/// Regex matching an interpolation placeholder such as `{{name}}`, `{{ name }}`
/// or `{{user-name}}`. Names are ASCII letters, digits, `_`, `.` and `-`.
pub(crate) fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_.-]+)\s*\}\}").expect("placeholder pattern is valid")
    })
}

impl TranslationValidator {
    /// Validate `candidate` against `reference`.
    ///
    /// This function reports:
    /// - an error for each key whose placeholders differ from the reference
    /// - a warning for each key absent from the reference (dead translation)
    /// - a warning for each empty template
    ///
    /// Keys present in the reference but missing from the candidate are not
    /// reported here; `LanguageRegistry::list_missing_keys` covers them.
    pub fn validate(reference: &TranslationTable, candidate: &TranslationTable) -> ValidationReport {
        let mut report = ValidationReport::new();

        for (key, template) in candidate {
            let Some(reference_template) = reference.get(key) else {
                report
                    .warnings
                    .push(format!("Unknown key '{}' is not in the reference table", key));
                continue;
            };

            if template.trim().is_empty() {
                report
                    .warnings
                    .push(format!("Key '{}' has an empty translation", key));
            }

            let expected = Self::extract_placeholders(reference_template);
            let actual = Self::extract_placeholders(template);
            if expected != actual {
                report.errors.push(format!(
                    "Placeholder mismatch for '{}': reference has {:?}, translation has {:?}",
                    key, expected, actual
                ));
            }
        }

        report
    }

    /// Extract the set of placeholder names used in a template
    fn extract_placeholders(template: &str) -> BTreeSet<String> {
        placeholder_regex()
            .captures_iter(template)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
