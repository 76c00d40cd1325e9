//! CSS length helpers for reading and writing piece positions.

/// Parses a pixel length like `"12px"`, `"-3.5px"` or a bare `"0"`.
///
/// Anything else (`"auto"`, percentages, empty) is `None`.
pub fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    if number.is_empty() {
        return None;
    }
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// First value that parses as pixels, else `fallback` (the rendered layout
/// position, when known). Non-finite fallbacks resolve to 0.
pub fn resolve_px<'a>(candidates: impl IntoIterator<Item = &'a str>, fallback: f64) -> f64 {
    candidates
        .into_iter()
        .find_map(parse_px)
        .unwrap_or(if fallback.is_finite() { fallback } else { 0. })
}

pub fn px(value: f64) -> String {
    format!("{}px", value)
}
