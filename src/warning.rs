//! Reprocessed-field warnings.
//!
//! Field formatting never fails. When a cell cannot be written as-is the
//! formatter substitutes a fallback and reports a [`FieldIssue`]; the
//! document encoder collects those into [`FieldWarning`]s so fallbacks on
//! financial data are visible to the caller.

use std::fmt;

/// Why a field was not written verbatim from its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldIssue {
    /// Currency text was not a finite decimal number; written as zero.
    Unparseable,
    /// Numeric field input contained no digits; written as zeros.
    NoDigits,
    /// Negative currency amount; written as zero.
    Negative,
    /// Value has more digits than the field; low-order digits kept.
    Overflow,
    /// Alphanumeric value longer than the field; left-most characters kept.
    Truncated,
    /// Alphanumeric value contains non-ASCII characters, so the line is
    /// wider than 200 bytes even though it has 200 characters.
    NonAscii,
    /// The source column is absent from the input.
    MissingColumn,
}

impl FieldIssue {
    /// True when the fallback replaced a malformed, non-blank value.
    ///
    /// Strict mode rejects these; truncation and encoding notes only.
    pub fn is_malformed(self) -> bool {
        matches!(
            self,
            FieldIssue::Unparseable | FieldIssue::NoDigits | FieldIssue::Negative
        )
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FieldIssue::Unparseable => "not a number, written as zero",
            FieldIssue::NoDigits => "no digits, written as zeros",
            FieldIssue::Negative => "negative amount, written as zero",
            FieldIssue::Overflow => "too many digits, low-order digits kept",
            FieldIssue::Truncated => "too long, truncated",
            FieldIssue::NonAscii => "non-ASCII text",
            FieldIssue::MissingColumn => "column not found in input",
        };
        f.write_str(text)
    }
}

/// A field issue located in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWarning {
    /// 1-based data row in the source, blank rows included.
    /// Zero for document-level warnings such as a missing column.
    pub row: usize,
    pub field: String,
    pub value: String,
    pub issue: FieldIssue,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row == 0 {
            write!(f, "{}: {}", self.field, self.issue)
        } else {
            write!(
                f,
                "row {}, {}: {:?} {}",
                self.row, self.field, self.value, self.issue
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_classification() {
        assert!(FieldIssue::Unparseable.is_malformed());
        assert!(FieldIssue::NoDigits.is_malformed());
        assert!(FieldIssue::Negative.is_malformed());
        assert!(!FieldIssue::Overflow.is_malformed());
        assert!(!FieldIssue::Truncated.is_malformed());
        assert!(!FieldIssue::MissingColumn.is_malformed());
    }

    #[test]
    fn test_warning_display() {
        let w = FieldWarning {
            row: 3,
            field: "VALOR_DESCONTO_AUTONOMO".to_string(),
            value: "abc".to_string(),
            issue: FieldIssue::Unparseable,
        };
        assert_eq!(
            w.to_string(),
            r#"row 3, VALOR_DESCONTO_AUTONOMO: "abc" not a number, written as zero"#
        );

        let doc_level = FieldWarning {
            row: 0,
            field: "CPF_AUTONOMO".to_string(),
            value: String::new(),
            issue: FieldIssue::MissingColumn,
        };
        assert_eq!(doc_level.to_string(), "CPF_AUTONOMO: column not found in input");
    }
}
