//! # Order Extraction
//!
//! Scans a conversational agent's reply for order confirmations and turns
//! them into structured [`OrderedItem`]s. Extraction runs an ordered list of
//! pattern groups (most specific first) with a short-circuit on the first
//! group that matches, then two recovery sweeps:
//!
//! - a secondary global sweep over bulleted confirmations, for multi-line
//!   replies the stop-early primary pass would miss, and
//! - a tertiary sweep over recommendation phrasing ("I recommend X",
//!   "Try the X", ...) emitted as unconfirmed single-quantity candidates.
//!
//! Absence of recognizable items is a normal outcome, not an error.

use crate::item_parsing::{parse_single_item, ExtractorConfig, OrderedItem};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, trace};

/// Result of parsing one agent response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Extracted items, in the order they appeared in the text
    pub items: Vec<OrderedItem>,
    /// Sum of `price × quantity` over priced items; `None` when no item
    /// carries a price
    pub total_price: Option<f64>,
    /// True when at least one item was extracted
    pub success: bool,
    /// Human-readable summary of the outcome
    pub message: String,
}

/// Tag identifying which pattern group produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// `- Added 2 Cheeseburgers to your cart`
    BulletWithQuantity,
    /// `- Added Fries to your cart`
    Bullet,
    /// `added X and Y to your cart`
    Conjunction,
    /// `added the X to your cart`
    TheConfirmation,
    /// `added X to your cart`
    Generic,
}

/// One entry in the ordered extraction cascade
struct PatternGroup {
    kind: PatternKind,
    regex: Regex,
}

lazy_static! {
    // Confirmation pattern groups in fixed precedence order, most specific
    // first. The primary pass stops at the first group that matches.
    static ref PATTERN_GROUPS: Vec<PatternGroup> = vec![
        PatternGroup {
            kind: PatternKind::BulletWithQuantity,
            regex: Regex::new(r"(?mi)^\s*[-•*]\s*(?:i've\s+|we've\s+)?added\s+(\d+\s+.+?)\s+to your cart")
                .expect("bullet-with-quantity pattern should be valid"),
        },
        PatternGroup {
            kind: PatternKind::Bullet,
            regex: Regex::new(r"(?mi)^\s*[-•*]\s*(?:i've\s+|we've\s+)?added\s+(?:the\s+)?(.+?)\s+to your cart")
                .expect("bullet pattern should be valid"),
        },
        PatternGroup {
            kind: PatternKind::Conjunction,
            regex: Regex::new(r"(?i)added\s+(?:the\s+)?(.+?)\s+(?:and|&)\s+(?:the\s+)?(.+?)\s+to your cart")
                .expect("conjunction pattern should be valid"),
        },
        PatternGroup {
            kind: PatternKind::TheConfirmation,
            regex: Regex::new(r"(?i)added\s+the\s+(.+?)\s+to your cart")
                .expect("the-confirmation pattern should be valid"),
        },
        PatternGroup {
            kind: PatternKind::Generic,
            regex: Regex::new(r"(?i)added\s+(.+?)\s+to your cart")
                .expect("generic pattern should be valid"),
        },
    ];

    // Recommendation phrasings recognized by the tertiary suggestion sweep.
    // Captures run until sentence punctuation or end of line.
    static ref SUGGESTION_REGEXES: Vec<Regex> = vec![
        Regex::new(r"(?i)i recommend\s+(?:the\s+)?([^.!?,\n]+)")
            .expect("recommend pattern should be valid"),
        Regex::new(r"(?i)you might like\s+(?:the\s+)?([^.!?,\n]+)")
            .expect("might-like pattern should be valid"),
        Regex::new(r"(?i)try the\s+([^.!?,\n]+)").expect("try-the pattern should be valid"),
        Regex::new(r"(?i)how about\s+(?:the\s+)?([^.!?,\n]+)")
            .expect("how-about pattern should be valid"),
        Regex::new(r"(?i)consider\s+(?:the\s+)?([^.!?,\n]+)")
            .expect("consider pattern should be valid"),
        Regex::new(r"(?i)you can order\s+(?:the\s+)?([^.!?,\n]+)")
            .expect("can-order pattern should be valid"),
        Regex::new(r"(?i)available options include\s+([^.!?\n]+)")
            .expect("options-include pattern should be valid"),
    ];
}

/// Extractor for order confirmations in free-text agent replies
pub struct OrderExtractor {
    config: ExtractorConfig,
}

impl Default for OrderExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderExtractor {
    /// Create an extractor with the default configuration
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// Create an extractor with custom configuration
    pub fn with_config(config: ExtractorConfig) -> crate::errors::AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Parse an agent response into structured order items
    ///
    /// Never fails: unrecognizable input yields `success = false` and an
    /// empty item list.
    pub fn parse(&self, text: &str) -> ParseResult {
        // Raw spans already turned into candidates, scoped to this call
        let mut seen_spans: HashSet<String> = HashSet::new();
        let mut items: Vec<OrderedItem> = Vec::new();

        // PRIMARY PASS: first pattern group with a match wins; only its
        // first occurrence is consumed, and no lower-precedence group is
        // tried, so the same phrase is never captured twice
        for group in PATTERN_GROUPS.iter() {
            if let Some(caps) = group.regex.captures(text) {
                debug!("Primary pass matched {:?} group", group.kind);
                for slot in caps.iter().skip(1).flatten() {
                    self.push_candidate(slot.as_str(), &mut seen_spans, &mut items);
                }
                break;
            }
        }

        // SECONDARY SWEEP: every bulleted confirmation, not just the first,
        // recovering multi-line replies the primary stop-early pass misses
        if items.is_empty() {
            let mut bullet_hits: Vec<(usize, &str)> = Vec::new();
            for group in PATTERN_GROUPS
                .iter()
                .filter(|g| matches!(g.kind, PatternKind::BulletWithQuantity | PatternKind::Bullet))
            {
                for caps in group.regex.captures_iter(text) {
                    if let Some(slot) = caps.get(1) {
                        trace!("Secondary sweep hit ({:?}): '{}'", group.kind, slot.as_str());
                        bullet_hits.push((slot.start(), slot.as_str()));
                    }
                }
            }
            // Emit in appearance order, not group order; the stable sort
            // keeps the more specific group first for same-offset hits
            bullet_hits.sort_by_key(|(start, _)| *start);
            for (_, slot) in bullet_hits {
                self.push_candidate(slot, &mut seen_spans, &mut items);
            }
        }

        // TERTIARY SWEEP: recommendation phrasing, surfaced as unconfirmed
        // quantity-1 candidates for the caller to disambiguate
        if items.is_empty() {
            for pattern in SUGGESTION_REGEXES.iter() {
                for caps in pattern.captures_iter(text) {
                    if let Some(slot) = caps.get(1) {
                        trace!("Suggestion sweep hit: '{}'", slot.as_str());
                        self.push_suggestion(slot.as_str(), &mut seen_spans, &mut items);
                    }
                }
            }
        }

        let total_price = compute_total_price(&items);
        let success = !items.is_empty();
        let message = if success {
            format!("Found {} item(s) in response", items.len())
        } else {
            "No order items found in response".to_string()
        };

        info!(
            item_count = items.len(),
            total_price = ?total_price,
            "Parsed order response"
        );

        ParseResult {
            items,
            total_price,
            success,
            message,
        }
    }

    /// Run one raw span through single-item parsing, respecting span dedup
    fn push_candidate(
        &self,
        span: &str,
        seen_spans: &mut HashSet<String>,
        items: &mut Vec<OrderedItem>,
    ) {
        if !seen_spans.insert(span.to_string()) {
            debug!("Skipping already-processed span: '{}'", span);
            return;
        }
        if let Some(item) = parse_single_item(span, &self.config) {
            items.push(item);
        }
    }

    /// Emit a suggestion span as a quantity-1, price-less candidate
    fn push_suggestion(
        &self,
        span: &str,
        seen_spans: &mut HashSet<String>,
        items: &mut Vec<OrderedItem>,
    ) {
        if !seen_spans.insert(span.to_string()) {
            debug!("Skipping already-processed span: '{}'", span);
            return;
        }
        if let Some(item) = parse_single_item(span, &self.config) {
            // Suggestions are not confirmed additions: no quantity, no price
            items.push(OrderedItem {
                name: item.name,
                quantity: 1,
                price: None,
            });
        }
    }
}

/// Sum `price × quantity` over priced items
///
/// `None` when no item carries a price. A zero sum is likewise reported as
/// absent price information, not as a zero-cost order.
fn compute_total_price(items: &[OrderedItem]) -> Option<f64> {
    let mut total = None;
    for item in items {
        if let Some(price) = item.price {
            let line = price * item.quantity as f64;
            total = Some(total.unwrap_or(0.0) + line);
        }
    }
    // A zero sum carries no price information
    total.filter(|t| *t > 0.0)
}

/// Parse an agent response using the default extractor configuration
///
/// The crate's primary entry point for extraction.
pub fn parse_order_from_response(response_text: &str) -> ParseResult {
    OrderExtractor::new().parse(response_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_price_absent_without_price_information() {
        let items = vec![OrderedItem {
            name: "Fries".to_string(),
            quantity: 3,
            price: None,
        }];
        assert_eq!(compute_total_price(&items), None);
    }

    #[test]
    fn test_total_price_weighted_by_quantity() {
        let items = vec![
            OrderedItem {
                name: "Burger".to_string(),
                quantity: 2,
                price: Some(5.0),
            },
            OrderedItem {
                name: "Fries".to_string(),
                quantity: 1,
                price: None,
            },
        ];
        assert_eq!(compute_total_price(&items), Some(10.0));
    }

    #[test]
    fn test_primary_pass_stops_at_first_group() {
        // Both the conjunction and generic groups could match; the
        // conjunction group is more specific and must win
        let result = parse_order_from_response("Added Burger and Fries to your cart");
        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[0].name, "Burger");
        assert_eq!(result.items[1].name, "Fries");
    }
}
