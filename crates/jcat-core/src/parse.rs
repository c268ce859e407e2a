//! Field parsers: total functions over raw snapshot strings.
//!
//! Nothing here returns an error. A value that cannot be interpreted is
//! reported as `None` and the engine treats it as absent.

use std::sync::OnceLock;

use regex::Regex;

/// Parse a decimal number the way the snapshot's producers write them.
///
/// Thousands separators (`,`) are removed and surrounding whitespace trimmed.
/// The longest leading decimal literal is parsed, so `"12.3-45.6"` yields
/// `12.3` and `"7 (2023)"` yields `7.0`. Returns `None` for empty input, a
/// bare `"-"`, text without a leading number, and non-finite results.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let literal = numeric_prefix(cleaned.trim());
    if literal.is_empty() {
        return None;
    }
    literal.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// [`parse_number`] after removing a `%` sign.
pub fn parse_percent(raw: &str) -> Option<f64> {
    parse_number(&raw.replacen('%', "", 1))
}

/// Lowercase a possibly-missing field for case-insensitive matching.
pub fn normalize_text(raw: Option<&str>) -> String {
    raw.map(str::to_lowercase).unwrap_or_default()
}

/// Neutralise markup-significant characters. Record fields are untrusted and
/// must pass through here before being embedded in rendered output.
pub fn escape_for_display(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `true` for values the catalog displays as "nothing": absent, `""`, `"-"`.
pub fn is_blank(raw: Option<&str>) -> bool {
    matches!(raw, None | Some("") | Some("-"))
}

/// `true` only for the affirmative flag `"是"`.
pub fn is_yes(raw: Option<&str>) -> bool {
    raw == Some("是")
}

/// Extract the partition number from text like `"医学2区"` or `"1区 Top"`.
pub fn parse_partition(raw: &str) -> Option<u8> {
    static PARTITION: OnceLock<Regex> = OnceLock::new();
    let re = PARTITION.get_or_init(|| Regex::new(r"([1-4])区").expect("static regex"));
    re.captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Numeric part of a ranking like `"12/204"`.
pub fn parse_rank(raw: &str) -> Option<f64> {
    parse_number(raw.split('/').next().unwrap_or_default())
}

/// Slice off the longest prefix of `s` that is a decimal literal:
/// `[+-]? digits? (. digits?)? ([eE] [+-]? digits)?` with at least one digit
/// in the mantissa. Returns `""` when there is none.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if mantissa_digits > 0 || j > frac_start {
            mantissa_digits += j - frac_start;
            i = j;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &s[..i]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
