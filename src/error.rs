//! Error types for layout validation and document conversion.

use thiserror::Error;

use crate::warning::FieldIssue;

/// Which side of the boundary a conversion failure belongs to.
///
/// `ClientInput` failures are caused by the submitted spreadsheet and can be
/// fixed by the person who sent it. `Internal` failures are faults outside
/// the caller's control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ClientInput,
    Internal,
}

/// Errors produced while converting a tabular source into a Layout PS document.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The spreadsheet could not be opened or parsed at all.
    #[error("could not read spreadsheet: {0}")]
    InvalidSource(String),

    /// Parsing succeeded but every row was blank.
    #[error("no valid data found")]
    EmptyInput,

    /// A cell needed a fallback value while running in strict mode.
    #[error("row {row}, field {field}: malformed value {value:?} ({issue})")]
    MalformedCell {
        row: usize,
        field: String,
        value: String,
        issue: FieldIssue,
    },

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::InvalidSource(_)
            | ConvertError::EmptyInput
            | ConvertError::MalformedCell { .. } => ErrorKind::ClientInput,
            ConvertError::Layout(_) | ConvertError::Io(_) => ErrorKind::Internal,
        }
    }
}

/// Defects in a layout definition. These are programming errors in the
/// schema table, never something the spreadsheet author can fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("field {0} has zero width")]
    ZeroWidth(String),

    #[error("field {0} starts at position 0 (positions are 1-based)")]
    ZeroStart(String),

    #[error("field {field} starts at {start} but the previous field ends at {cursor}")]
    Overlap {
        field: String,
        start: usize,
        cursor: usize,
    },

    #[error("field {field} ends at {end}, past the {total}-byte record")]
    PastEnd {
        field: String,
        end: usize,
        total: usize,
    },

    #[error("field {0} is Fixed but has no constant value")]
    MissingConstant(String),

    #[error("field {0} needs a source column")]
    MissingColumn(String),
}
