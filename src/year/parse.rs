use std::sync::LazyLock;

use regex::Regex;

use super::range::YearRange;

static ISO_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{4})[-/]").expect("valid ISO prefix regex"));

static FOUR_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{4}").expect("valid digit-run regex"));

// © / ℗ or their ASCII spellings "(C)" / "(P)", then optional whitespace.
static COPYRIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:[©℗]|\([cp]\))\s*([0-9]{4})").expect("valid copyright regex")
});

/// Parse a year out of a free-form date string.
///
/// Tried in order: the whole string as an integer, a `YYYY-` / `YYYY/` date
/// prefix, then the first in-range 4-digit run anywhere in the text.
pub fn parse_date_year(text: &str, range: YearRange) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(year) = text.parse::<i32>() {
        if range.contains(year) {
            return Some(year);
        }
    }

    ISO_PREFIX
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<i32>().ok())
        .find(|&year| range.contains(year))
        .or_else(|| find_year(text, range))
}

/// Parse a year out of a copyright notice such as `"℗ 2020 Label"`.
///
/// A year right after the copyright/phonogram mark wins; otherwise the first
/// in-range 4-digit run.
pub fn parse_copyright_year(text: &str, range: YearRange) -> Option<i32> {
    COPYRIGHT
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<i32>().ok())
        .find(|&year| range.contains(year))
        .or_else(|| find_year(text, range))
}

/// First in-range 4-digit run in `text`.
pub fn find_year(text: &str, range: YearRange) -> Option<i32> {
    FOUR_DIGITS
        .find_iter(text)
        .filter_map(|m| m.as_str().parse::<i32>().ok())
        .find(|&year| range.contains(year))
}
