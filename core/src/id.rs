//! Lenient parsing of the `{id}` path segment.
//!
//! A malformed segment never produces a client error. It yields `None`,
//! which matches no stored todo, so the request ends as a plain 404.

/// Parse the leading integer of `segment`.
///
/// Leading whitespace and a single sign are accepted, then as many decimal
/// digits as follow; anything after the digits is ignored (`"12abc"` is 12).
/// No digits, or a value outside `i64`, gives `None`.
pub fn parse_id(segment: &str) -> Option<i64> {
    let s = segment.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = &rest[..digits];
    if negative {
        format!("-{magnitude}").parse().ok()
    } else {
        magnitude.parse().ok()
    }
}

/// Id segment of a `/todos/...` path: the text between `/todos/` and the
/// next `/`. Deeper segments are ignored.
pub fn id_segment(rest: &str) -> &str {
    rest.split('/').next().unwrap_or_default()
}
