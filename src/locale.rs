//! Device locale detection.

use crate::error::ProviderError;

/// Source of the user's preferred locales, most preferred first.
pub trait LocaleProvider: Send + Sync {
    fn preferred_locales(&self) -> Result<Vec<String>, ProviderError>;
}

/// Reads the operating system's locale preferences via `sys-locale`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLocaleProvider;

impl LocaleProvider for SystemLocaleProvider {
    fn preferred_locales(&self) -> Result<Vec<String>, ProviderError> {
        let locales: Vec<String> = sys_locale::get_locales().collect();
        if locales.is_empty() {
            return Err(ProviderError::NoLocale);
        }
        Ok(locales)
    }
}

/// Fixed list of locales. Useful for tests and for callers that already know
/// the user's preference (for example from an `Accept-Language` header).
#[derive(Debug, Clone, Default)]
pub struct StaticLocaleProvider {
    locales: Vec<String>,
}

impl StaticLocaleProvider {
    pub fn new<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
        }
    }
}

impl LocaleProvider for StaticLocaleProvider {
    fn preferred_locales(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.locales.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_keeps_order() {
        let provider = StaticLocaleProvider::new(["fr-FR", "en-US"]);
        assert_eq!(provider.preferred_locales().unwrap(), vec!["fr-FR", "en-US"]);
    }

    #[test]
    fn test_static_provider_empty() {
        let provider = StaticLocaleProvider::default();
        assert!(provider.preferred_locales().unwrap().is_empty());
    }

    #[test]
    fn test_system_provider_does_not_panic() {
        // CI machines may or may not report a locale; either outcome is valid.
        match SystemLocaleProvider.preferred_locales() {
            Ok(locales) => assert!(!locales.is_empty()),
            Err(e) => assert!(matches!(e, ProviderError::NoLocale)),
        }
    }
}
