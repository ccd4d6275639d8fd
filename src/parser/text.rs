use regex::Regex;
use std::sync::OnceLock;

/// Extracts the first number from a loosely formatted amount such as
/// `"₹250"`, `"4.2"` or `"Rs. 1,299 for two"`.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("Invalid regex"));

    let m = re.find(raw)?;
    m.as_str().replace(',', "").parse().ok()
}

/// Lowercases, trims and collapses internal whitespace.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"APPLE juice"` becomes `"Apple juice"`.
#[must_use]
pub fn capitalize(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut chars = lower.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[must_use]
pub fn slugify(raw: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("Invalid regex"));

    re.replace_all(&raw.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
