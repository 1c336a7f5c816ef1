//! Text-to-number coercion for form values.
//!
//! Both parsers read the longest numeric prefix and ignore whatever
//! follows, so "12abc" is 12 and "37.9" read as an integer is 37. Text with
//! no numeric prefix yields `None`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Decimal number with optional sign, fraction and exponent, or Infinity
    static ref FLOAT_PREFIX: Regex = Regex::new(
        r"^\s*([+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?))"
    ).unwrap();

    /// Signed run of decimal digits
    static ref INT_PREFIX: Regex = Regex::new(
        r"^\s*([+-]?[0-9]+)"
    ).unwrap();
}

/// Parse the leading decimal number of `text`.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let captures = FLOAT_PREFIX.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}

/// Parse the leading integer of `text`.
///
/// Returns `None` when the digits do not fit in an `i32`.
pub fn parse_int_prefix(text: &str) -> Option<i32> {
    let captures = INT_PREFIX.captures(text)?;
    captures.get(1)?.as_str().parse().ok()
}
