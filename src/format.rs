//! Field formatter: one raw cell in, exactly `width` characters out.
//!
//! Formatting never fails. Values that cannot be written as given fall
//! back to zeros or spaces and carry a [`FieldIssue`] describing what
//! happened.
//!
//! Truncation direction differs by kind and must stay that way for the
//! consuming system:
//! - Numeric and Currency keep the right-most (low-order) digits.
//! - AlphaNumeric keeps the left-most characters.

use crate::cell::CellValue;
use crate::layout::{FieldKind, FieldSource, FieldSpec};
use crate::warning::FieldIssue;

/// A formatted field and the fallback applied to produce it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub text: String,
    pub issue: Option<FieldIssue>,
}

impl Formatted {
    fn clean(text: String) -> Self {
        Self { text, issue: None }
    }

    fn with_issue(text: String, issue: FieldIssue) -> Self {
        Self {
            text,
            issue: Some(issue),
        }
    }
}

/// Format `value` according to `spec`.
///
/// The returned text always has exactly `spec.width` characters.
pub fn format_field(value: &CellValue, spec: &FieldSpec) -> Formatted {
    let width = spec.width;
    match spec.kind {
        FieldKind::Fixed => {
            let constant = match &spec.source {
                FieldSource::Constant(v) => v.as_str(),
                FieldSource::Column(_) => "",
            };
            Formatted::clean(pad_right(constant, width))
        }
        FieldKind::Numeric => format_numeric(value, width),
        FieldKind::Currency => format_currency(value, width),
        FieldKind::AlphaNumeric => format_alphanumeric(value, width),
    }
}

/// Digits only, zero-left-padded, low-order digits kept on overflow.
pub fn format_numeric(value: &CellValue, width: usize) -> Formatted {
    if value.is_blank() {
        return Formatted::clean(zeros(width));
    }
    let digits: String = value
        .to_string()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return Formatted::with_issue(zeros(width), FieldIssue::NoDigits);
    }
    fit_digits(&digits, width)
}

/// Decimal amount written as zero-padded integer cents.
pub fn format_currency(value: &CellValue, width: usize) -> Formatted {
    if value.is_blank() {
        return Formatted::clean(zeros(width));
    }
    let amount = match value {
        CellValue::Number(n) => Some(*n),
        CellValue::Text(s) => parse_amount(s),
        CellValue::Bool(_) | CellValue::Empty => None,
    };
    let Some(amount) = amount.filter(|a| a.is_finite()) else {
        return Formatted::with_issue(zeros(width), FieldIssue::Unparseable);
    };

    let cents = (amount * 100.0).round_ties_even();
    if cents < 0.0 {
        return Formatted::with_issue(zeros(width), FieldIssue::Negative);
    }
    // -0.0 passes the check above but would print as "-0".
    let cents = cents.abs();
    fit_digits(&format!("{cents:.0}"), width)
}

/// Trimmed text, space-right-padded, left-most characters kept on overflow.
pub fn format_alphanumeric(value: &CellValue, width: usize) -> Formatted {
    let rendered = value.to_string();
    let trimmed = rendered.trim();
    let text = pad_right(trimmed, width);
    if trimmed.chars().count() > width {
        Formatted::with_issue(text, FieldIssue::Truncated)
    } else if !text.is_ascii() {
        Formatted::with_issue(text, FieldIssue::NonAscii)
    } else {
        Formatted::clean(text)
    }
}

/// Parse a locale-formatted amount: "." groups thousands, "," marks the
/// decimal point ("1.234,56" is 1234.56).
fn parse_amount(s: &str) -> Option<f64> {
    let normalized = s.replace('.', "").replace(',', ".");
    normalized.trim().parse::<f64>().ok()
}

fn fit_digits(digits: &str, width: usize) -> Formatted {
    if digits.len() > width {
        let tail = digits[digits.len() - width..].to_string();
        Formatted::with_issue(tail, FieldIssue::Overflow)
    } else {
        Formatted::clean(format!("{digits:0>width$}"))
    }
}

fn pad_right(s: &str, width: usize) -> String {
    let truncated: String = s.chars().take(width).collect();
    format!("{truncated:<width$}")
}

fn zeros(width: usize) -> String {
    "0".repeat(width)
}
