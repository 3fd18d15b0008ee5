//! Localized matching of main-menu option postbacks.
//!
//! Card buttons post back their localized titles, so the engine
//! matches replies against the locale's rendering of each option key.
//! Compiling the alternation on every message would be wasteful; the
//! matcher memoizes (locale, option keys) → compiled pattern behind a
//! lock instead of keeping a mutable global cache.

use std::collections::HashMap;
use std::sync::RwLock;

use regex::Regex;

/// Render an option key in the given locale.
///
/// Only the default bundle exists today, where every key renders as
/// itself; the signature keeps the lookup per-locale so adding a
/// bundle does not touch the matcher.
fn localized_text(_locale: &str, key: &str) -> String {
    key.to_string()
}

#[derive(Default)]
pub struct OptionMatcher {
    cache: RwLock<HashMap<String, Regex>>,
}

impl OptionMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiled case-insensitive prefix pattern for the locale's
    /// rendering of `keys`. Repeat calls return the cached pattern.
    pub fn pattern(&self, locale: &str, keys: &[&str]) -> Regex {
        let cache_key = format!("{}:{}", locale, keys.join("|"));
        if let Some(re) = self.cache.read().expect("matcher cache poisoned").get(&cache_key) {
            return re.clone();
        }

        let alternation = keys
            .iter()
            .map(|key| regex::escape(&localized_text(locale, key)))
            .collect::<Vec<_>>()
            .join("|");
        // Literal alternation of escaped strings; cannot fail to compile.
        let re = Regex::new(&format!("(?i)^({alternation})")).unwrap();
        self.cache
            .write()
            .expect("matcher cache poisoned")
            .insert(cache_key, re.clone());
        re
    }

    /// Whether `text` starts with any of the localized options.
    pub fn matches(&self, locale: &str, keys: &[&str], text: &str) -> bool {
        self.pattern(locale, keys).is_match(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_prefix_anchored_and_case_insensitive() {
        let matcher = OptionMatcher::new();
        assert!(matcher.matches("en-US", &["Fill Form"], "Fill Form"));
        assert!(matcher.matches("en-US", &["Fill Form"], "fill form please"));
        assert!(!matcher.matches("en-US", &["Fill Form"], "please Fill Form"));
    }

    #[test]
    fn alternation_covers_all_keys() {
        let matcher = OptionMatcher::new();
        assert!(matcher.matches("en-US", &["Fill Form", "Exit"], "Exit"));
        assert!(matcher.matches("en-US", &["Fill Form", "Exit"], "exit now"));
        assert!(!matcher.matches("en-US", &["Fill Form", "Exit"], "restart"));
    }

    #[test]
    fn pattern_is_memoized_per_locale_and_keys() {
        let matcher = OptionMatcher::new();
        let first = matcher.pattern("en-US", &["Fill Form"]);
        let second = matcher.pattern("en-US", &["Fill Form"]);
        assert_eq!(first.as_str(), second.as_str());
        assert_eq!(matcher.cache.read().unwrap().len(), 1);

        matcher.pattern("hi-IN", &["Fill Form"]);
        assert_eq!(matcher.cache.read().unwrap().len(), 2);
    }

    #[test]
    fn option_text_is_escaped() {
        let matcher = OptionMatcher::new();
        // A key containing regex metacharacters must match literally.
        assert!(matcher.matches("en-US", &["Yes (all)"], "Yes (all)"));
        assert!(!matcher.matches("en-US", &["Yes (all)"], "Yes all"));
    }
}
