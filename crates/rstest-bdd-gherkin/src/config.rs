//! Process-wide parser configuration.
//!
//! The default language used when a document carries no `# language:`
//! directive is resolved from an in-process override, then the
//! `RSTEST_BDD_GHERKIN_LANGUAGE` environment variable, then `en`.

use std::sync::RwLock;

/// Environment variable naming the default document language.
pub const LANGUAGE_ENV: &str = "RSTEST_BDD_GHERKIN_LANGUAGE";

/// Language used when nothing else is configured.
pub const FALLBACK_LANGUAGE: &str = "en";

static LANGUAGE_OVERRIDE: RwLock<Option<String>> = RwLock::new(None);

fn env_language() -> Option<String> {
    std::env::var(LANGUAGE_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn override_language() -> Option<String> {
    LANGUAGE_OVERRIDE
        .read()
        .map_or_else(|poisoned| poisoned.into_inner().clone(), |guard| guard.clone())
}

/// Determine the default document language.
#[must_use]
pub fn default_language() -> String {
    override_language()
        .or_else(env_language)
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// Override the default language for the current process.
///
/// Tests may call [`clear_default_language_override`] to restore environment
/// driven behaviour afterwards.
pub fn set_default_language(language: impl Into<String>) {
    let language = language.into();
    match LANGUAGE_OVERRIDE.write() {
        Ok(mut guard) => *guard = Some(language),
        Err(poisoned) => *poisoned.into_inner() = Some(language),
    }
}

/// Remove any in-process override for the default language.
pub fn clear_default_language_override() {
    match LANGUAGE_OVERRIDE.write() {
        Ok(mut guard) => *guard = None,
        Err(poisoned) => *poisoned.into_inner() = None,
    }
}
