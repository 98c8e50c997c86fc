//! Translation table type and the overlay merge used to complete partial tables.

use std::collections::BTreeMap;

/// Mapping from localization key to string template.
///
/// A `BTreeMap` keeps serialized mirrors stable between runs.
pub type TranslationTable = BTreeMap<String, String>;

/// Shallow three-way merge: `base`, then `partial`, then `overrides`.
///
/// Later layers win key by key. With the reference table as `base` the result
/// always covers the full canonical key space; keys that exist only in
/// `overrides` are carried through untouched.
pub fn merge_tables(
    base: &TranslationTable,
    partial: &TranslationTable,
    overrides: Option<&TranslationTable>,
) -> TranslationTable {
    let mut merged = base.clone();
    overlay(&mut merged, partial);
    if let Some(overrides) = overrides {
        overlay(&mut merged, overrides);
    }
    merged
}

/// Write every entry of `layer` over `target`.
pub fn overlay(target: &mut TranslationTable, layer: &TranslationTable) {
    for (key, value) in layer {
        target.insert(key.clone(), value.clone());
    }
}
