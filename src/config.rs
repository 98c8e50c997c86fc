#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub store_path: String,
    pub store_namespace: String,

    // Resolution
    pub allow_override: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            store_path: std::env::var("LOCALIZATION_STORE_PATH")
                .unwrap_or_else(|_| "data/localization.json".to_string()),
            store_namespace: std::env::var("LOCALIZATION_NAMESPACE")
                .unwrap_or_else(|_| "app".to_string()),

            allow_override: std::env::var("LOCALIZATION_ALLOW_OVERRIDE")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(true),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
