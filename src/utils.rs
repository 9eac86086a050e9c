//! Helper parsers for price cells, grade numbers and cell text cleanup.

use crate::types::Price;
use regex::Regex;
use std::sync::LazyLock;

static DIGIT_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid digit-run regex"));

static SUBJECT_INDEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*|\s*\d+$").expect("valid subject-index regex"));

/// Normalizes one raw price cell into an integer amount.
///
/// An absent or empty cell and the literal `-` placeholder both mean "not
/// applicable" and yield zero. Everything else is stripped down to its
/// digits (dropping line breaks and thousands separators) and parsed;
/// an empty digit run degrades to zero. Never fails.
#[must_use]
pub fn normalize_price(cell: Option<&str>) -> Price {
    let Some(raw) = cell else {
        return 0;
    };
    if raw.contains('-') {
        return 0;
    }
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Strips line breaks and surrounding whitespace from one cell's text.
#[must_use]
pub fn clean_cell(text: &str) -> String {
    text.replace(['\n', '\r'], "").trim().to_string()
}

/// Cleans a subject cell for display: removes embedded line breaks, then a
/// leading or trailing run of digits left over from row numbering.
#[must_use]
pub fn clean_subject(raw: &str) -> String {
    let cleaned = clean_cell(raw);
    SUBJECT_INDEX_RE.replace_all(&cleaned, "").to_string()
}

/// Extracts the first digit run embedded in a grade label, e.g. `3年` → 3.
#[must_use]
pub fn grade_number(label: &str) -> Option<u32> {
    DIGIT_RUN_RE
        .find(label)
        .and_then(|m| m.as_str().parse().ok())
}

/// Formats a raw grade key into its display label, e.g. `3` → `3年`.
#[must_use]
pub fn grade_label(grade: &str) -> String {
    format!("{grade}年")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_placeholder_cells_are_zero() {
        assert_eq!(normalize_price(None), 0);
        assert_eq!(normalize_price(Some("")), 0);
        assert_eq!(normalize_price(Some("-")), 0);
        assert_eq!(normalize_price(Some("12-3")), 0);
    }

    #[test]
    fn separators_breaks_and_leading_zeros_are_ignored() {
        assert_eq!(normalize_price(Some("1,234")), 1234);
        assert_eq!(normalize_price(Some("075\n")), 75);
        assert_eq!(normalize_price(Some("NT$110")), 110);
        assert_eq!(normalize_price(Some("元")), 0);
    }

    #[test]
    fn subject_numbering_artifacts_are_stripped() {
        assert_eq!(clean_subject("01 數學"), "數學");
        assert_eq!(clean_subject("數學 2"), "數學");
        assert_eq!(clean_subject("自然\n科學"), "自然科學");
    }

    #[test]
    fn grade_numbers_come_from_the_first_digit_run() {
        assert_eq!(grade_number("3年"), Some(3));
        assert_eq!(grade_number("7"), Some(7));
        assert_eq!(grade_number("國小"), None);
    }
}
