//! Parsing utilities for front-end input.
//!
//! Numeric form fields are lenient: the longest leading number is taken
//! ("12abc" reads as 12) and input with no leading number becomes zero
//! instead of an error.

use crate::directory::SortKey;
use crate::error::{ChoresError, Result};
use crate::storage::JobCategory;

// =============================================================================
// Numeric Coercion
// =============================================================================

/// Parse a price or other decimal field from its leading number,
/// coercing failures to `0.0`.
///
/// # Example
/// ```
/// use homechores::utils::parsing::parse_decimal_or_zero;
///
/// assert_eq!(parse_decimal_or_zero("42.5"), 42.5);
/// assert_eq!(parse_decimal_or_zero("3.5kg"), 3.5);
/// assert_eq!(parse_decimal_or_zero("abc"), 0.0);
/// ```
pub fn parse_decimal_or_zero(input: &str) -> f64 {
    let trimmed = input.trim();
    let prefix = numeric_prefix(trimmed, true);
    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() => {
            if prefix.len() != trimmed.len() {
                tracing::debug!(input, value, "ignored trailing text after decimal");
            }
            value
        }
        _ => {
            tracing::warn!(input, "non-numeric decimal input, using 0");
            0.0
        }
    }
}

/// Parse a whole-number field such as years of experience from its leading
/// digits, coercing failures and negative values to `0`. A fractional part
/// is truncated.
pub fn parse_count_or_zero(input: &str) -> u32 {
    let trimmed = input.trim();
    let prefix = numeric_prefix(trimmed, false);
    match prefix.parse::<u32>() {
        Ok(value) => {
            if prefix.len() != trimmed.len() {
                tracing::debug!(input, value, "ignored trailing text after count");
            }
            value
        }
        Err(_) => {
            tracing::warn!(input, "non-numeric count input, using 0");
            0
        }
    }
}

/// Longest leading slice of `input` that reads as a number: an optional
/// sign and digits, plus a fraction and exponent when `decimal` is set.
/// Empty when `input` does not start with a number.
fn numeric_prefix(input: &str, decimal: bool) -> &str {
    let bytes = input.as_bytes();
    let digits_at = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let mut mantissa = digits_at(end);
    end += mantissa;

    if decimal && bytes.get(end) == Some(&b'.') {
        let fraction = digits_at(end + 1);
        if mantissa + fraction > 0 {
            end += 1 + fraction;
            mantissa += fraction;
        }
    }
    if mantissa == 0 {
        return "";
    }

    if decimal && matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_at(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    &input[..end]
}

// =============================================================================
// Filter Parsing
// =============================================================================

/// Parse a job filter. `"all"` (or empty) means no category filter.
pub fn parse_job_filter(name: &str) -> Result<Option<JobCategory>> {
    let lower = name.trim().to_lowercase();
    if lower.is_empty() || lower == "all" {
        return Ok(None);
    }
    lower.parse::<JobCategory>().map(Some)
}

/// Parse a sort key name: name, rating, price-low or price-high.
pub fn parse_sort_key(name: &str) -> Result<SortKey> {
    match name.trim().to_lowercase().as_str() {
        "name" => Ok(SortKey::NameAsc),
        "rating" => Ok(SortKey::RatingDesc),
        "price-low" => Ok(SortKey::PriceAsc),
        "price-high" => Ok(SortKey::PriceDesc),
        _ => Err(ChoresError::InvalidInput(format!(
            "Unknown sort '{}'. Use: name, rating, price-low or price-high",
            name
        ))),
    }
}
