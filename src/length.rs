//! Parsing of interval lengths such as `500`, `5k` or `2m`.

use crate::error::IntervalError;
use crate::Position;

/// Parse a length: an integer with an optional `k` (×1,000) or `m`
/// (×1,000,000) suffix. Zero is rejected.
pub fn parse_length(arg: &str) -> Result<Position, IntervalError> {
    let invalid = || IntervalError::InvalidLength(arg.to_string());
    let trimmed = arg.trim();
    let (digits, multiplier): (&str, Position) = if let Some(n) = trimmed.strip_suffix('k') {
        (n, 1_000)
    } else if let Some(n) = trimmed.strip_suffix('m') {
        (n, 1_000_000)
    } else {
        (trimmed, 1)
    };

    // u64::from_str accepts a leading '+', which we don't want
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let value: Position = digits.parse().map_err(|_| invalid())?;
    let length = value.checked_mul(multiplier).ok_or_else(invalid)?;
    if length == 0 {
        return Err(invalid());
    }
    Ok(length)
}
