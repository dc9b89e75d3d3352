//! Attribute value decoding
//!
//! DOT attribute values keep their quotes in the graph model (`"0.1"`,
//! `"C6H6"`). Comparisons against user input need the logical value, so
//! this module trims the wrapping quotes without touching the interior.

/// Strip one pair of wrapping double quotes from a raw attribute value
///
/// The value must both start and end with `"` and be at least two
/// characters long; anything else is returned as-is. Interior escapes are
/// left untouched.
///
/// # Example
/// ```
/// use dotprune_core::label::decode;
///
/// assert_eq!(decode("\"C6H6\""), "C6H6");
/// assert_eq!(decode("0.25"), "0.25");
/// ```
pub fn decode(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw)
}
