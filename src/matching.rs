//! # Catalog Matching
//!
//! Resolves extracted [`OrderedItem`]s against a catalog of known menu
//! items. Each candidate is tried against an ordered list of match
//! strategies (exact, substring, fuzzy edit-distance), stopping at the first
//! strategy that finds an entry; within a strategy the first catalog entry
//! in iteration order wins. A candidate that no strategy resolves is
//! reported back by its original name.

use crate::item_parsing::OrderedItem;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// A known purchasable menu item, supplied by the caller and never mutated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Stable identifier from the catalog store
    pub id: String,
    /// Display name the candidate names are resolved against
    pub name: String,
    /// Catalog price
    pub price: f64,
}

/// Outcome of resolving a batch of candidates against a catalog
///
/// Every candidate lands in exactly one of the two lists, so
/// `matched.len() + unmatched.len()` always equals the number of candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Resolved catalog entries, in candidate order
    pub matched: Vec<MenuItem>,
    /// Original names of candidates no strategy could resolve
    pub unmatched: Vec<String>,
}

/// Configuration options for catalog matching
#[derive(Clone, Debug)]
pub struct MatcherConfig {
    /// Minimum normalized edit-distance similarity for a fuzzy match;
    /// strictly exceeded, never met
    pub fuzzy_threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 0.7,
        }
    }
}

impl MatcherConfig {
    /// Validate matcher configuration parameters
    pub fn validate(&self) -> crate::errors::AppResult<()> {
        if !(self.fuzzy_threshold > 0.0 && self.fuzzy_threshold < 1.0) {
            return Err(crate::errors::AppError::Config(format!(
                "fuzzy_threshold must be between 0 and 1 exclusive, got {}",
                self.fuzzy_threshold
            )));
        }
        Ok(())
    }
}

/// One strategy in the ordered resolution cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchStrategy {
    /// Case-insensitive equality
    Exact,
    /// Case-insensitive containment in either direction
    Substring,
    /// Normalized Levenshtein similarity above the configured threshold
    Fuzzy,
}

// Resolution order: each strategy is a strict fallback for the previous one
const MATCH_STRATEGIES: [MatchStrategy; 3] = [
    MatchStrategy::Exact,
    MatchStrategy::Substring,
    MatchStrategy::Fuzzy,
];

impl MatchStrategy {
    /// Whether this strategy resolves `candidate` to `entry_name`
    ///
    /// Both arguments are expected lower-cased by the caller.
    fn matches(&self, candidate: &str, entry_name: &str, threshold: f64) -> bool {
        match self {
            MatchStrategy::Exact => candidate == entry_name,
            MatchStrategy::Substring => {
                candidate.contains(entry_name) || entry_name.contains(candidate)
            }
            MatchStrategy::Fuzzy => similarity(candidate, entry_name) > threshold,
        }
    }
}

/// Matcher resolving candidates against a caller-owned catalog snapshot
pub struct CatalogMatcher {
    config: MatcherConfig,
}

impl Default for CatalogMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogMatcher {
    /// Create a matcher with the default configuration
    pub fn new() -> Self {
        Self {
            config: MatcherConfig::default(),
        }
    }

    /// Create a matcher with custom configuration
    pub fn with_config(config: MatcherConfig) -> crate::errors::AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Resolve each candidate to a catalog entry, or report it unmatched
    ///
    /// Pure function of its inputs. Catalog order is the deterministic
    /// tie-break at every tier: the first entry satisfying the tier wins,
    /// with no best-of-N ranking in the fuzzy tier.
    pub fn match_items(&self, candidates: &[OrderedItem], catalog: &[MenuItem]) -> MatchResult {
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();

        for candidate in candidates {
            let candidate_lower = candidate.name.to_lowercase();
            let mut resolved = false;

            'strategies: for strategy in MATCH_STRATEGIES {
                for entry in catalog {
                    let entry_lower = entry.name.to_lowercase();
                    if strategy.matches(&candidate_lower, &entry_lower, self.config.fuzzy_threshold)
                    {
                        debug!(
                            "Candidate '{}' resolved to '{}' via {:?} strategy",
                            candidate.name, entry.name, strategy
                        );
                        matched.push(entry.clone());
                        resolved = true;
                        break 'strategies;
                    }
                }
                trace!(
                    "Candidate '{}' not resolved by {:?} strategy",
                    candidate.name,
                    strategy
                );
            }

            if !resolved {
                debug!("Candidate '{}' unmatched against catalog", candidate.name);
                unmatched.push(candidate.name.clone());
            }
        }

        info!(
            candidate_count = candidates.len(),
            matched_count = matched.len(),
            unmatched_count = unmatched.len(),
            "Matched candidates against catalog"
        );

        MatchResult { matched, unmatched }
    }
}

/// Normalized edit-distance similarity between two strings
///
/// `(max_len - levenshtein) / max_len` over character counts; 1.0 when both
/// strings are empty.
pub fn similarity(s1: &str, s2: &str) -> f64 {
    let len1 = s1.chars().count();
    let len2 = s2.chars().count();
    let max_len = len1.max(len2);
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein_distance(s1, s2);
    (max_len - distance) as f64 / max_len as f64
}

/// Calculate Levenshtein distance between two strings
///
/// Classic full-matrix dynamic programming with unit costs for insertion,
/// deletion, and substitution. Inputs are item-name sized, so no early exit
/// or caching is applied.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let len1 = s1_chars.len();
    let len2 = s2_chars.len();

    let mut matrix = vec![vec![0; len2 + 1]; len1 + 1];

    #[allow(clippy::needless_range_loop)]
    for i in 0..=len1 {
        matrix[i][0] = i;
    }
    for j in 0..=len2 {
        matrix[0][j] = j;
    }

    for i in 1..=len1 {
        for j in 1..=len2 {
            let cost = if s1_chars[i - 1] == s2_chars[j - 1] {
                0
            } else {
                1
            };

            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[len1][len2]
}

/// Resolve candidates against a catalog using the default matcher
///
/// The crate's primary entry point for catalog matching.
pub fn find_matching_menu_items(
    parsed_items: &[OrderedItem],
    available_menu_items: &[MenuItem],
) -> MatchResult {
    CatalogMatcher::new().match_items(parsed_items, available_menu_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_known_distances() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }

    #[test]
    fn test_similarity_empty_strings() {
        assert_eq!(similarity("", ""), 1.0);
    }

    #[test]
    fn test_matcher_config_validation() {
        assert!(MatcherConfig::default().validate().is_ok());
        assert!(MatcherConfig { fuzzy_threshold: 0.0 }.validate().is_err());
        assert!(MatcherConfig { fuzzy_threshold: 1.0 }.validate().is_err());
        assert!(MatcherConfig { fuzzy_threshold: 1.5 }.validate().is_err());
    }

    #[test]
    fn test_strategy_order_is_exact_substring_fuzzy() {
        assert_eq!(
            MATCH_STRATEGIES,
            [
                MatchStrategy::Exact,
                MatchStrategy::Substring,
                MatchStrategy::Fuzzy
            ]
        );
    }
}
