//! # Currency Token Configuration
//!
//! Price detection and name cleaning both depend on the set of currency
//! tokens the interpreter recognizes. The token set is loaded from
//! `config/currency.json` (overridable via the `CURRENCY_CONFIG_PATH`
//! environment variable) and falls back to built-in defaults when no config
//! file is found. Price regexes are built from the loaded tokens and
//! compiled once.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Currency tokens configuration loaded from JSON
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrencyConfig {
    pub currency_tokens: CurrencyTokens,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrencyTokens {
    /// Currency symbols in precedence order (e.g., "$", "₱")
    pub symbols: Vec<String>,
    /// Currency words matched after an amount (e.g., "dollars", "pesos")
    pub words: Vec<String>,
}

impl CurrencyConfig {
    /// Built-in defaults: dollar sign, peso sign, and their word forms
    pub fn builtin() -> Self {
        Self {
            currency_tokens: CurrencyTokens {
                symbols: vec!["$".to_string(), "₱".to_string()],
                words: vec!["dollars".to_string(), "pesos".to_string()],
            },
        }
    }

    /// Validate currency tokens configuration
    pub fn validate(&self) -> crate::errors::AppResult<()> {
        if self.currency_tokens.symbols.is_empty() {
            return Err(crate::errors::AppError::Config(
                "currency symbols cannot be empty".to_string(),
            ));
        }
        if self.currency_tokens.words.is_empty() {
            return Err(crate::errors::AppError::Config(
                "currency words cannot be empty".to_string(),
            ));
        }

        let validate_tokens = |tokens: &[String], category: &str| -> crate::errors::AppResult<()> {
            for (i, token) in tokens.iter().enumerate() {
                if token.trim().is_empty() {
                    return Err(crate::errors::AppError::Config(format!(
                        "{}[{}] cannot be empty",
                        category, i
                    )));
                }
                if token.chars().any(|c| c.is_control()) {
                    return Err(crate::errors::AppError::Config(format!(
                        "{}[{}] '{}' contains control characters",
                        category, i, token
                    )));
                }
            }
            Ok(())
        };

        validate_tokens(&self.currency_tokens.symbols, "symbols")?;
        validate_tokens(&self.currency_tokens.words, "words")?;

        Ok(())
    }
}

/// Parse and validate one currency config document
///
/// A document that deserializes but carries unusable tokens (empty lists,
/// control characters) is rejected here, before any regex is built from it.
fn parse_currency_config(content: &str) -> anyhow::Result<CurrencyConfig> {
    let config: CurrencyConfig = serde_json::from_str(content)?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    Ok(config)
}

/// Load currency tokens configuration from JSON file
///
/// Resolution order: `CURRENCY_CONFIG_PATH` environment variable, then a set
/// of fallback paths, then the built-in defaults. Invalid documents fall
/// through to the next source.
pub fn load_currency_config() -> CurrencyConfig {
    if let Ok(config_path) = std::env::var("CURRENCY_CONFIG_PATH") {
        info!(
            "Loading currency config from environment variable: {}",
            config_path
        );
        match fs::read_to_string(&config_path) {
            Ok(content) => match parse_currency_config(&content) {
                Ok(config) => {
                    info!("Successfully loaded currency config from: {}", config_path);
                    return config;
                }
                Err(e) => {
                    crate::errors::error_logging::log_config_error(
                        &e,
                        "currency_tokens",
                        "load_currency_config",
                    );
                    warn!(
                        "Rejected currency config from '{}': {}. Falling back to default paths.",
                        config_path, e
                    );
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read currency config from '{}': {}. Falling back to default paths.",
                    config_path, e
                );
            }
        }
    }

    let possible_paths = [
        "/app/config/currency.json", // Docker path
        "config/currency.json",      // Local development path
        "../config/currency.json",   // Test path
    ];

    for config_path in &possible_paths {
        match fs::read_to_string(config_path) {
            Ok(content) => match parse_currency_config(&content) {
                Ok(config) => {
                    info!(
                        "Successfully loaded currency config from fallback path: {}",
                        config_path
                    );
                    return config;
                }
                Err(e) => {
                    crate::errors::error_logging::log_config_error(
                        &e,
                        "currency_tokens",
                        "load_currency_config",
                    );
                    warn!(
                        "Rejected currency config at '{}': {}. Trying next path.",
                        config_path, e
                    );
                    continue;
                }
            },
            Err(_) => continue, // Try next path
        }
    }

    info!("No usable currency config file found, using built-in defaults");
    CurrencyConfig::builtin()
}

/// Build the ordered price-pattern regex strings from a currency config
///
/// One pattern per symbol (symbol before the amount), then one pattern
/// covering all currency words (amount before the word). The returned order
/// is the precedence order: first pattern to match wins.
fn build_price_patterns(config: &CurrencyConfig) -> Vec<String> {
    let mut patterns: Vec<String> = config
        .currency_tokens
        .symbols
        .iter()
        .map(|symbol| format!(r"{}\s*(\d+(?:\.\d+)?)", regex::escape(symbol)))
        .collect();

    let escaped_words: Vec<String> = config
        .currency_tokens
        .words
        .iter()
        .map(|word| regex::escape(word))
        .collect();
    patterns.push(format!(
        r"(?i)(\d+(?:\.\d+)?)\s*(?:{})\b",
        escaped_words.join("|")
    ));

    patterns
}

lazy_static! {
    /// Ordered price patterns, each with the amount in capture group 1
    static ref PRICE_REGEXES: Vec<Regex> = build_price_patterns(&load_currency_config())
        .iter()
        .map(|p| Regex::new(p).expect("price pattern should be valid"))
        .collect();

    /// Patterns removed from item names during cleaning: full price
    /// expressions first, then any bare currency symbol left behind
    static ref STRIP_REGEXES: Vec<Regex> = {
        let config = load_currency_config();
        let mut patterns = build_price_patterns(&config);
        for symbol in &config.currency_tokens.symbols {
            patterns.push(regex::escape(symbol));
        }
        patterns
            .iter()
            .map(|p| Regex::new(p).expect("currency strip pattern should be valid"))
            .collect()
    };
}

/// Ordered price regexes; the amount is in capture group 1
pub fn price_regexes() -> &'static [Regex] {
    &PRICE_REGEXES
}

/// Regexes whose matches are stripped from item names during cleaning
pub fn currency_strip_regexes() -> &'static [Regex] {
    &STRIP_REGEXES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_config_is_valid() {
        assert!(CurrencyConfig::builtin().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_empty_and_control_tokens() {
        let mut config = CurrencyConfig::builtin();
        config.currency_tokens.symbols = vec![];
        assert!(config.validate().is_err());

        let mut config = CurrencyConfig::builtin();
        config.currency_tokens.words = vec!["".to_string()];
        assert!(config.validate().is_err());

        let mut config = CurrencyConfig::builtin();
        config.currency_tokens.symbols = vec!["$\n".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_price_pattern_precedence_order() {
        let patterns = build_price_patterns(&CurrencyConfig::builtin());
        // One per symbol plus the word pattern
        assert_eq!(patterns.len(), 3);
        assert!(patterns[0].starts_with(r"\$"));
        assert!(patterns[2].contains("dollars"));
    }

    #[test]
    fn test_parse_currency_config_rejects_unusable_documents() {
        let valid = r#"{"currency_tokens":{"symbols":["$"],"words":["dollars"]}}"#;
        assert!(parse_currency_config(valid).is_ok());

        assert!(parse_currency_config("not json at all").is_err());

        // Deserializes fine, but empty token lists must not reach the
        // regex builder
        let empty_symbols = r#"{"currency_tokens":{"symbols":[],"words":["dollars"]}}"#;
        assert!(parse_currency_config(empty_symbols).is_err());

        let control_chars = r#"{"currency_tokens":{"symbols":["$\n"],"words":["dollars"]}}"#;
        assert!(parse_currency_config(control_chars).is_err());
    }

    #[test]
    fn test_price_regexes_capture_amount() {
        let regexes = price_regexes();
        let caps = regexes[0].captures("$12.99").unwrap();
        assert_eq!(&caps[1], "12.99");
        let caps = regexes
            .last()
            .unwrap()
            .captures("150 pesos")
            .unwrap();
        assert_eq!(&caps[1], "150");
    }
}
