//! Validation module for boundary input checks
//!
//! The parsing and matching cores assume well-formed inputs and never fail;
//! callers reject malformed input here before it reaches them:
//!
//! - Response text (length and control-character constraints)
//! - Catalog entries handed in by the caller

use crate::errors::{error_logging, AppError, AppResult};
use crate::matching::MenuItem;

/// Maximum accepted response length in bytes; conversational replies are
/// tens to low hundreds of characters
pub const MAX_RESPONSE_LENGTH: usize = 10_000;

/// Validate a raw agent response before parsing
///
/// Empty text is valid input and parses to "no items found"; only oversized
/// or binary-looking input is rejected.
///
/// # Examples
/// ```
/// use order_interpreter::validation::validate_response_text;
///
/// assert!(validate_response_text("I've added 2 Cheeseburgers to your cart").is_ok());
/// assert!(validate_response_text("").is_ok());
/// assert!(validate_response_text(&"a".repeat(20_000)).is_err());
/// assert!(validate_response_text("abc\u{0}def").is_err());
/// ```
pub fn validate_response_text(text: &str) -> AppResult<()> {
    if text.len() > MAX_RESPONSE_LENGTH {
        let err = AppError::Validation(format!(
            "response text too long: {} bytes exceeds {}",
            text.len(),
            MAX_RESPONSE_LENGTH
        ));
        error_logging::log_validation_error(&err, "validate_response_text", Some(text));
        return Err(err);
    }

    if text.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        let err = AppError::Validation("response text contains control characters".to_string());
        error_logging::log_validation_error(&err, "validate_response_text", Some(text));
        return Err(err);
    }

    Ok(())
}

/// Validate a catalog entry supplied by the caller
///
/// # Examples
/// ```
/// use order_interpreter::validation::validate_menu_item;
/// use order_interpreter::MenuItem;
///
/// let item = MenuItem { id: "1".into(), name: "Cheeseburger".into(), price: 8.5 };
/// assert!(validate_menu_item(&item).is_ok());
///
/// let nameless = MenuItem { id: "2".into(), name: "  ".into(), price: 8.5 };
/// assert!(validate_menu_item(&nameless).is_err());
/// ```
pub fn validate_menu_item(item: &MenuItem) -> AppResult<()> {
    if item.name.trim().is_empty() {
        let err = AppError::Validation(format!("menu item '{}' has an empty name", item.id));
        error_logging::log_validation_error(&err, "validate_menu_item", Some(&item.name));
        return Err(err);
    }

    if !item.price.is_finite() || item.price < 0.0 {
        let err = AppError::Validation(format!(
            "menu item '{}' has an invalid price: {}",
            item.id, item.price
        ));
        error_logging::log_validation_error(&err, "validate_menu_item", Some(&item.name));
        return Err(err);
    }

    Ok(())
}
