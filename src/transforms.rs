//! Value transforms applied to captured pattern groups.
//!
//! These mirror the formatting conventions of Brazilian policy documents:
//! `DD/MM/YYYY` dates and `1.234,56` monetary amounts.

use once_cell::sync::Lazy;
use regex::Regex;

/// Normalize raw document text before any pattern runs against it.
///
/// Unifies line endings and collapses runs of spaces/tabs; newlines are kept
/// because several patterns anchor on them.
pub fn normalize_text(raw: &str) -> String {
    static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

    let unified = raw.replace("\r\n", "\n").replace('\r', "\n");
    SPACES.replace_all(&unified, " ").trim().to_string()
}

/// Convert a `DD/MM/YYYY` date string to ISO `YYYY-MM-DD` by positional
/// split. Strings not matching the 3-part `/`-separated shape with a 2-digit
/// first segment pass through unchanged; calendar correctness is not checked
/// here.
pub fn convert_date_br(value: &str) -> String {
    let parts: Vec<&str> = value.trim().split('/').collect();
    if parts.len() != 3 || parts[0].len() != 2 {
        return value.trim().to_string();
    }
    format!("{}-{}-{}", parts[2], parts[1], parts[0])
}

/// Parse a Brazilian-locale monetary string (`"1.234,56"`) into a float
/// rounded to 2 decimal places. Dots are thousands separators and the comma
/// is the decimal mark. Non-numeric input yields 0.
pub fn parse_monetary(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let normalized = cleaned.replace('.', "").replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(v) => round2(v),
        Err(_) => 0.0,
    }
}

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
