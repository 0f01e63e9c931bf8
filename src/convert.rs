//! String to number / boolean projections for scalar values
//!
//! Both number readers accept the longest valid prefix and ignore whatever
//! follows it, so `"42px"` reads as 42 and `"1.5.2"` as 1.5.

/// The single failure value older callers expect from numeric reads
pub const LEGACY_NUMERIC_SENTINEL: i64 = -1;
/// [`LEGACY_NUMERIC_SENTINEL`] for float reads
pub const LEGACY_FLOAT_SENTINEL: f64 = -1.0;

/// Optional `-`, then decimal digits up to the first non-digit
///
/// Returns `None` when no digit follows the sign, or when the digits do not
/// fit in an `i64`.
pub fn parse_int(text: &str) -> Option<i64> {
    let (negative, rest) = split_sign(text);
    let digits = leading_digits(rest);
    if digits.is_empty() {
        return None;
    }
    // Negative values accumulate downwards so i64::MIN is reachable
    let mut value: i64 = 0;
    for b in digits.bytes() {
        let digit = i64::from(b - b'0');
        let shifted = value.checked_mul(10)?;
        value = if negative {
            shifted.checked_sub(digit)?
        } else {
            shifted.checked_add(digit)?
        };
    }
    Some(value)
}

/// Optional `-`, digits, then at most one `.` followed by digits
///
/// Returns `None` unless the text (after the sign) starts with a digit or a
/// dot. A second dot ends the number.
pub fn parse_float(text: &str) -> Option<f64> {
    let (negative, rest) = split_sign(text);
    if !rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let integer = leading_digits(rest);
    let fraction = rest
        .get(integer.len()..)
        .and_then(|tail| tail.strip_prefix('.'))
        .map(leading_digits)
        .unwrap_or_default();

    let normalized = format!(
        "{}.{}",
        if integer.is_empty() { "0" } else { integer },
        if fraction.is_empty() { "0" } else { fraction },
    );
    let magnitude: f64 = normalized.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Exactly `true`; anything else, including no value at all, is false
pub fn parse_bool(text: Option<&str>) -> bool {
    text == Some("true")
}

/// [`parse_int`] with the legacy `-1` for every failure, including a missing value
pub fn legacy_int(text: Option<&str>) -> i64 {
    text.and_then(parse_int).unwrap_or(LEGACY_NUMERIC_SENTINEL)
}

/// [`parse_float`] with the legacy `-1.0` for every failure, including a missing value
pub fn legacy_float(text: Option<&str>) -> f64 {
    text.and_then(parse_float).unwrap_or(LEGACY_FLOAT_SENTINEL)
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    }
}

fn leading_digits(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.get(..end).unwrap_or_default()
}
