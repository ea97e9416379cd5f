//! Validation configuration from environment variables.
//!
//! The limits and the banned-word list are loaded once at startup and
//! injected into the validation layer; nothing reads them from globals.

use std::collections::HashSet;
use std::env;

/// Default minimum cooking time in minutes.
pub const DEFAULT_MIN_COOKING_TIME: i32 = 1;

/// Default maximum cooking time in minutes (ten hours).
pub const DEFAULT_MAX_COOKING_TIME: i32 = 600;

/// Default maximum amount for a single ingredient portion.
pub const DEFAULT_MAX_INGREDIENT_AMOUNT: i32 = 5000;

/// Words rejected in free-text fields and usernames. Matched
/// case-insensitively against whole words only.
const DEFAULT_BANNED_WORDS: &[&str] = &[
    "admin",
    "bastard",
    "crap",
    "damn",
    "moderator",
    "root",
    "superuser",
];

/// Numeric bounds enforced by the validation layer.
#[derive(Debug, Clone, Copy)]
pub struct RecipeLimits {
    pub min_cooking_time: i32,
    pub max_cooking_time: i32,
    pub max_ingredient_amount: i32,
}

impl Default for RecipeLimits {
    fn default() -> Self {
        Self {
            min_cooking_time: DEFAULT_MIN_COOKING_TIME,
            max_cooking_time: DEFAULT_MAX_COOKING_TIME,
            max_ingredient_amount: DEFAULT_MAX_INGREDIENT_AMOUNT,
        }
    }
}

/// Immutable application configuration shared with every handler.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub limits: RecipeLimits,
    /// Lowercased banned words.
    pub banned_words: HashSet<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            limits: RecipeLimits::default(),
            banned_words: DEFAULT_BANNED_WORDS
                .iter()
                .map(|w| w.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `POTLUCK_BANNED_WORDS`: comma-separated list replacing the default
    /// - `POTLUCK_MAX_INGREDIENT_AMOUNT`: upper bound for portion amounts
    /// - `POTLUCK_MAX_COOKING_TIME`: upper bound for cooking time (minutes)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(words) = env::var("POTLUCK_BANNED_WORDS") {
            config.banned_words = words
                .split(',')
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect();
        }

        if let Some(max) = env::var("POTLUCK_MAX_INGREDIENT_AMOUNT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.limits.max_ingredient_amount = max;
        }

        if let Some(max) = env::var("POTLUCK_MAX_COOKING_TIME")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.limits.max_cooking_time = max;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_match_catalog_rules() {
        let config = AppConfig::default();
        assert_eq!(config.limits.min_cooking_time, 1);
        assert_eq!(config.limits.max_cooking_time, 600);
        assert_eq!(config.limits.max_ingredient_amount, 5000);
    }

    #[test]
    fn default_banned_words_are_lowercase() {
        let config = AppConfig::default();
        assert!(config.banned_words.contains("admin"));
        assert!(config.banned_words.iter().all(|w| *w == w.to_lowercase()));
    }
}
