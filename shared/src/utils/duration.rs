//! Duration parsing for configuration values
//!
//! Token lifetimes and TTL overrides are supplied as strings like `900`,
//! `900s`, `15m`, `12h`, or `7d`. A bare number is interpreted as seconds.

/// Parse a duration string into whole seconds.
///
/// Recognized unit suffixes are `s` (seconds), `m` (minutes), `h` (hours),
/// and `d` (days); the suffix is case-insensitive. Values must be positive
/// integers.
pub fn parse_duration(value: &str) -> Result<i64, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(String::from("empty duration"));
    }

    let (number, multiplier) = match value.chars().last() {
        Some(c) if c.is_ascii_digit() => (value, 1),
        Some('s') | Some('S') => (&value[..value.len() - 1], 1),
        Some('m') | Some('M') => (&value[..value.len() - 1], 60),
        Some('h') | Some('H') => (&value[..value.len() - 1], 60 * 60),
        Some('d') | Some('D') => (&value[..value.len() - 1], 24 * 60 * 60),
        Some(c) => return Err(format!("unknown duration unit '{}'", c)),
        None => return Err(String::from("empty duration")),
    };

    let amount: i64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{}'", value))?;
    if amount <= 0 {
        return Err(format!("duration must be positive, got '{}'", value));
    }

    amount
        .checked_mul(multiplier)
        .ok_or_else(|| format!("duration '{}' overflows", value))
}
