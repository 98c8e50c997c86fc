//! Translation completeness audit.
//!
//! Prints, for every supported language, the reference entries it has not
//! translated and any placeholder problems in what it has translated.
//!
//! Usage:
//!   cargo run --bin audit-translations            # human-readable report
//!   cargo run --bin audit-translations -- --json  # machine-readable report
//!   cargo run --bin audit-translations -- --strict  # exit 1 on any gap

use anyhow::{bail, Result};
use app_localization::i18n::{Language, LanguageRegistry, TranslationTable, TranslationValidator};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct LanguageAudit {
    code: &'static str,
    name: &'static str,
    missing: TranslationTable,
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let strict = args.iter().any(|a| a == "--strict");

    let registry = LanguageRegistry::get();
    let mut audits = Vec::new();

    for config in registry.list_enabled() {
        let language = Language::from_code(config.code)?;
        let report =
            TranslationValidator::validate(registry.reference_table(), registry.raw_table(language));

        audits.push(LanguageAudit {
            code: config.code,
            name: config.name,
            missing: registry.list_missing_keys(language),
            errors: report.errors,
            warnings: report.warnings,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&audits)?);
    } else {
        for audit in &audits {
            println!(
                "{} ({}): {} missing, {} errors, {} warnings",
                audit.name,
                audit.code,
                audit.missing.len(),
                audit.errors.len(),
                audit.warnings.len()
            );
            for (key, reference) in &audit.missing {
                println!("  missing  {} = {:?}", key, reference);
            }
            for error in &audit.errors {
                println!("  error    {}", error);
            }
            for warning in &audit.warnings {
                println!("  warning  {}", warning);
            }
        }
    }

    let incomplete = audits
        .iter()
        .filter(|a| !a.missing.is_empty() || !a.errors.is_empty())
        .count();
    if strict && incomplete > 0 {
        bail!("{} language(s) have incomplete translations", incomplete);
    }

    Ok(())
}
