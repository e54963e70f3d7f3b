//! Encoder and reader settings.

/// How the document encoder treats cells that needed a fallback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Write the fallback (zeros/spaces) and record a warning.
    #[default]
    Lenient,
    /// Reject the document on the first malformed, non-blank cell.
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncoderConfig {
    pub strictness: Strictness,
}

impl EncoderConfig {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }
}

/// Settings for turning a workbook into a [`Table`](crate::table::Table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Sheet to read; the first sheet when `None`.
    pub sheet: Option<String>,
    /// 0-based sheet row holding the column headers. Rows above it are
    /// ignored, rows below it are data.
    pub header_row: usize,
    /// Names for repeated headers: `(name, alias)` renames the next
    /// unaliased repeat of `name`. Listing the same name twice aliases the
    /// 2nd and 3rd occurrence, in order.
    pub duplicate_aliases: Vec<(String, String)>,
}

impl Default for ReaderConfig {
    /// The PS enrollment template: title on the first row, headers on the
    /// second, and a second "CÓDIGO PLANO" column for the dependent.
    fn default() -> Self {
        Self {
            sheet: None,
            header_row: 1,
            duplicate_aliases: vec![(
                "CÓDIGO PLANO".to_string(),
                "CÓDIGO PLANO DEPENDENTE".to_string(),
            )],
        }
    }
}
