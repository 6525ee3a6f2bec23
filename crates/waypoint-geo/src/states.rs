//! Static per-state adjacency figures and state-name normalization.

use std::collections::HashMap;
use std::sync::LazyLock;

use waypoint_core::AppError;

const STATE_ADJACENCY: [(&str, f64); 51] = [
    ("AL", 0.66), ("AK", 1.21), ("AZ", 1.06), ("AR", 0.59),
    ("CA", 2.36), ("CO", 1.62), ("CT", 1.23), ("DE", 1.13),
    ("DC", 2.71), ("FL", 1.02), ("GA", 0.84), ("HI", 1.00),
    ("ID", 0.36), ("IL", 0.32), ("IN", 0.23), ("IA", 0.24),
    ("KS", 0.25), ("KY", 0.23), ("LA", 0.27), ("ME", 0.31),
    ("MD", 0.51), ("MA", 0.63), ("MI", 0.25), ("MN", 0.37),
    ("MS", 0.20), ("MO", 0.26), ("MT", 0.39), ("NE", 0.26),
    ("NV", 0.46), ("NH", 0.43), ("NJ", 0.54), ("NM", 0.28),
    ("NY", 0.51), ("NC", 0.29), ("ND", 0.32), ("OH", 0.24),
    ("OK", 0.22), ("OR", 0.53), ("PA", 0.29), ("RI", 0.43),
    ("SC", 0.27), ("SD", 0.28), ("TN", 0.28), ("TX", 0.29),
    ("UT", 0.48), ("VT", 0.36), ("VA", 0.44), ("WA", 0.58),
    ("WV", 0.19), ("WI", 0.30), ("WY", 0.36),
];

static TABLE: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| STATE_ADJACENCY.into_iter().collect());

/// Normalize a provider state field into a table key.
///
/// Two-byte values are treated as postal abbreviations and upper-cased;
/// anything else is treated as a full name and title-cased after
/// lower-casing.
pub fn normalize_state(raw: &str) -> String {
    if raw.len() == 2 {
        raw.to_uppercase()
    } else {
        title_case(&raw.to_lowercase())
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev = ' ';
    for c in s.chars() {
        if is_word_separator(prev) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

fn is_word_separator(c: char) -> bool {
    if c.is_ascii() {
        return !(c.is_ascii_alphanumeric() || c == '_');
    }
    if c.is_alphanumeric() {
        return false;
    }
    c.is_whitespace()
}

/// Exact table lookup on an already-normalized key.
pub fn lookup(key: &str) -> Option<f64> {
    TABLE.get(key).copied()
}

/// Normalize `raw_state`, look it up, and format the figure with two
/// decimals.
pub fn adjacency_for(raw_state: &str) -> Result<String, AppError> {
    let key = normalize_state(raw_state);
    match lookup(&key) {
        Some(value) => Ok(format!("{:.2}", value)),
        None => {
            tracing::debug!("State {:?} (normalized {:?}) not in table", raw_state, key);
            Err(AppError::LookupMiss("state not found in the map".to_string()))
        }
    }
}
