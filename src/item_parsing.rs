//! # Single-Item Parsing
//!
//! Turns one raw item span (e.g. `"2 Cheeseburgers ($8.50)"`) into a
//! structured [`OrderedItem`]. Quantity and price are each detected by an
//! ordered list of patterns where the first match wins; the remaining text
//! is cleaned of currency tokens and parenthesized numeric asides before the
//! validity gate decides whether a candidate is emitted at all.

use crate::currency;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

/// A line item extracted from free text, before catalog resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedItem {
    /// Cleaned item name (non-empty, no residual currency tokens)
    pub name: String,
    /// Ordered quantity, defaults to 1 when the text names none
    pub quantity: u32,
    /// Unit price when the text carried one
    pub price: Option<f64>,
}

/// Configuration options for item extraction
#[derive(Clone, Debug)]
pub struct ExtractorConfig {
    /// Whether to clean extracted item names (currency stripping, whitespace)
    pub enable_name_cleaning: bool,
    /// Maximum length for item names (truncated at a word boundary if longer)
    pub max_name_length: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            enable_name_cleaning: true,
            max_name_length: 100,
        }
    }
}

impl ExtractorConfig {
    /// Validate extractor configuration parameters
    pub fn validate(&self) -> crate::errors::AppResult<()> {
        if self.max_name_length == 0 {
            return Err(crate::errors::AppError::Config(
                "max_name_length must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

lazy_static! {
    // Quantity patterns in precedence order. All are anchored at the start
    // of the span so digits embedded mid-phrase are never captured.
    static ref QUANTITY_REGEXES: Vec<Regex> = vec![
        Regex::new(r"(?i)^(\d+)\s*x\s+(.+)$").expect("quantity 'x' pattern should be valid"),
        Regex::new(r"(?i)^(\d+)\s+of\s+(.+)$").expect("quantity 'of' pattern should be valid"),
        Regex::new(r"^(\d+)\s+(.+)$").expect("bare quantity pattern should be valid"),
    ];

    /// Parenthesized asides containing a digit, e.g. "($12.99)" or "(2 left)"
    static ref NUMERIC_ASIDE_REGEX: Regex =
        Regex::new(r"\([^)]*\d[^)]*\)").expect("numeric aside pattern should be valid");
}

/// Parse a raw item span into an [`OrderedItem`]
///
/// Returns `None` when the cleaned name fails the validity gate (a single
/// character, or nothing but punctuation/whitespace).
pub fn parse_single_item(raw: &str, config: &ExtractorConfig) -> Option<OrderedItem> {
    let raw = raw.trim();
    trace!("Parsing item span: '{}'", raw);

    // Quantity: first anchored pattern to match wins, default 1
    let mut quantity: u32 = 1;
    let mut rest = raw;
    for pattern in QUANTITY_REGEXES.iter() {
        if let Some(caps) = pattern.captures(raw) {
            quantity = caps[1].parse().unwrap_or(1);
            rest = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            debug!("Quantity {} detected in span '{}'", quantity, raw);
            break;
        }
    }
    if quantity == 0 {
        // "0 x Burger" is not an order; treat as an unquantified mention
        quantity = 1;
    }

    // Price: first currency pattern to match wins, absent otherwise
    let mut price: Option<f64> = None;
    for pattern in currency::price_regexes() {
        if let Some(caps) = pattern.captures(rest) {
            price = caps[1].parse::<f64>().ok().filter(|p| *p >= 0.0);
            debug!("Price {:?} detected in span '{}'", price, raw);
            break;
        }
    }

    let name = clean_item_name(rest, config);

    // Validity gate: discard single-character or punctuation-only names
    if name.chars().count() <= 1 || !name.chars().any(|c| c.is_alphanumeric()) {
        debug!("Discarding span '{}': cleaned name '{}' fails gate", raw, name);
        return None;
    }

    trace!(
        "Parsed item: name='{}', quantity={}, price={:?}",
        name,
        quantity,
        price
    );
    Some(OrderedItem {
        name,
        quantity,
        price,
    })
}

/// Clean an extracted item name
///
/// Strips parenthesized numeric asides and all recognized currency
/// substrings, collapses whitespace, trims stray punctuation at both ends,
/// and truncates overly long names at a word boundary.
fn clean_item_name(raw_name: &str, config: &ExtractorConfig) -> String {
    if !config.enable_name_cleaning || raw_name.trim().is_empty() {
        trace!("Name cleaning disabled or empty name: '{}'", raw_name);
        return raw_name.trim().to_string();
    }

    let original_name = raw_name.trim().to_string();
    let mut name = NUMERIC_ASIDE_REGEX.replace_all(&original_name, " ").to_string();

    for pattern in currency::currency_strip_regexes() {
        name = pattern.replace_all(&name, " ").to_string();
    }

    // Collapse whitespace runs left behind by the stripping passes
    name = name.split_whitespace().collect::<Vec<&str>>().join(" ");

    // Trim punctuation at the edges, keeping hyphens and apostrophes inside
    name = name
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '-' && c != '\'')
        .to_string();

    if name.len() > config.max_name_length {
        // Step back to a char boundary so multibyte names cannot split
        let mut cut = config.max_name_length;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        let truncated = name[..cut].to_string();
        if let Some(last_space) = truncated.rfind(' ') {
            name = truncated[..last_space].to_string();
        } else {
            name = truncated;
        }
        warn!(
            "Item name truncated due to length limit ({} > {}): '{}' -> '{}'",
            original_name.len(),
            config.max_name_length,
            original_name,
            name
        );
    }

    trace!("Cleaned item name: '{}' -> '{}'", original_name, name);
    name
}
