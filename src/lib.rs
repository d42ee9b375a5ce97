//! # Order Interpreter
//!
//! A rule-based interpreter that converts free-text replies from a
//! conversational ordering agent into structured order items, then
//! reconciles them against a menu catalog using a tiered matching strategy
//! (exact, substring, fuzzy edit-distance).
//!
//! The crate exposes two pure entry points:
//!
//! - [`parse_order_from_response`] — text to [`ParseResult`]
//! - [`find_matching_menu_items`] — candidates plus catalog to [`MatchResult`]

pub mod currency;
pub mod errors;
pub mod extraction;
pub mod item_parsing;
pub mod matching;
pub mod validation;

// Re-export types for easier access
pub use extraction::{parse_order_from_response, OrderExtractor, ParseResult};
pub use item_parsing::{ExtractorConfig, OrderedItem};
pub use matching::{
    find_matching_menu_items, CatalogMatcher, MatchResult, MatcherConfig, MenuItem,
};
