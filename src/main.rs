use anyhow::{Context, Result};
use app_localization::config::Config;
use app_localization::i18n::{InitOptions, Localization};
use app_localization::locale::SystemLocaleProvider;
use app_localization::store::FileStore;
use std::sync::Arc;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("app_localization=info".parse()?),
        )
        .init();

    let config = Config::from_env();
    info!(
        "Using store {} (namespace '{}')",
        config.store_path, config.store_namespace
    );

    let store = FileStore::new(&config.store_path, &config.store_namespace);
    let mut l10n = Localization::new(Arc::new(store), Arc::new(SystemLocaleProvider));

    l10n.initialize(InitOptions {
        allow_override: config.allow_override,
        ..InitOptions::default()
    })
    .await
    .context("Failed to initialize localization")?;

    let _subscription = l10n.subscribe(|language| {
        info!("Active language is now {} ({})", language.native_name(), language);
    });

    // Optional first argument switches (and saves) the language
    if let Some(code) = std::env::args().nth(1) {
        l10n.change_language(&code)
            .await
            .with_context(|| format!("Cannot switch to '{}'", code))?;
    }

    let language = l10n.current_language();
    println!("{} ({})", l10n.t("app.name", &[]), language);
    println!("{}", l10n.t("app.tagline", &[]));
    println!("{}", l10n.t("home.greeting", &[("name", "friend")]));
    println!(
        "{}",
        l10n.t("settings.language_changed", &[("language", language.native_name())])
    );

    let languages: Vec<String> = l10n
        .available_languages()
        .iter()
        .map(|lang| format!("{} ({})", lang.display_name, lang.code))
        .collect();
    println!("{}: {}", l10n.t("settings.language", &[]), languages.join(", "));

    let stats = l10n.cache_stats().await;
    info!(
        "Cache: {} languages in memory, {} keys in store",
        stats.cached_languages, stats.stored_keys
    );

    Ok(())
}
