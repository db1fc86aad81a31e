//! Price-text parsing shared by every store configuration.

/// Parses a price from free text by stripping every character outside
/// `[0-9.]` and reading the remainder as a float.
///
/// Handles currency symbols and thousands separators (`"₩12,345"` → `12345.0`,
/// `"Rs. 1,290.50"` → `1290.5`). Returns `0.0` when nothing parseable is left
/// — callers treat a non-positive price as a rejected record, so the default
/// folds unparseable text into the ordinary no-price path.
#[must_use]
pub fn parse_price(text: &str) -> f64 {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse::<f64>().unwrap_or(0.0)
}
