//! Row and document encoders.
//!
//! [`RowEncoder`] walks the layout with a 1-based write cursor, filling any
//! gap before a field with spaces, appending each formatted field, and
//! finally forcing the line to the layout's exact width. It never fails.
//!
//! [`DocumentEncoder`] drives the row encoder over a whole
//! [`TabularSource`]: it trims column names, drops rows that are blank in
//! every column, rejects an input with no rows left, and joins the lines
//! with `\n`.

use tracing::{debug, warn};

use crate::cell::CellValue;
use crate::config::{EncoderConfig, Strictness};
use crate::error::ConvertError;
use crate::format::format_field;
use crate::layout::Layout;
use crate::record::RecordLine;
use crate::table::{ColumnIndex, Row, TabularSource};
use crate::warning::{FieldIssue, FieldWarning};

/// A fallback the formatter applied while encoding one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFallback {
    /// Index of the field in the layout.
    pub field: usize,
    pub value: String,
    pub issue: FieldIssue,
}

/// Result of encoding one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRow {
    pub line: RecordLine,
    pub fallbacks: Vec<FieldFallback>,
}

/// Encodes single rows against a layout.
#[derive(Debug, Clone, Copy)]
pub struct RowEncoder<'a> {
    layout: &'a Layout,
}

impl<'a> RowEncoder<'a> {
    pub fn new(layout: &'a Layout) -> Self {
        Self { layout }
    }

    pub fn encode(&self, row: &Row<'_>) -> EncodedRow {
        let line_size = self.layout.line_size();
        let mut line = String::with_capacity(line_size);
        let mut fallbacks = Vec::new();
        let mut cursor = 1;
        let empty = CellValue::Empty;

        for (i, field) in self.layout.fields().iter().enumerate() {
            if field.start > cursor {
                line.extend(std::iter::repeat_n(' ', field.start - cursor));
                cursor = field.start;
            }

            let value = match field.source_column() {
                Some(column) => row.get(column),
                None => &empty,
            };
            let formatted = format_field(value, field);
            if let Some(issue) = formatted.issue {
                fallbacks.push(FieldFallback {
                    field: i,
                    value: value.to_string(),
                    issue,
                });
            }
            line.push_str(&formatted.text);
            cursor += field.width;
        }

        EncodedRow {
            line: RecordLine::fit(line, line_size),
            fallbacks,
        }
    }
}

/// The encoded output of a whole source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedDocument {
    lines: Vec<RecordLine>,
    warnings: Vec<FieldWarning>,
    discarded_rows: usize,
}

impl EncodedDocument {
    pub fn lines(&self) -> &[RecordLine] {
        &self.lines
    }

    pub fn warnings(&self) -> &[FieldWarning] {
        &self.warnings
    }

    /// Number of blank rows dropped before encoding.
    pub fn discarded_rows(&self) -> usize {
        self.discarded_rows
    }

    /// The document as UTF-8 text: lines joined by `\n`, no trailing
    /// newline.
    pub fn to_text(&self) -> String {
        self.lines
            .iter()
            .map(RecordLine::as_str)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_text().into_bytes()
    }
}

/// Encodes a whole tabular source into a Layout PS document.
#[derive(Debug, Clone)]
pub struct DocumentEncoder<'a> {
    layout: &'a Layout,
    config: EncoderConfig,
}

impl<'a> DocumentEncoder<'a> {
    pub fn new(layout: &'a Layout, config: EncoderConfig) -> Self {
        Self { layout, config }
    }

    /// Encode every non-blank row of `source`.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::EmptyInput`] when no non-blank rows remain.
    /// - [`ConvertError::MalformedCell`] in strict mode, for the first cell
    ///   whose value had to be replaced.
    pub fn encode<S>(&self, source: &S) -> Result<EncodedDocument, ConvertError>
    where
        S: TabularSource + ?Sized,
    {
        let index = ColumnIndex::from_names(source.column_names());
        let mut warnings = self.missing_columns(&index);

        let rows: Vec<(usize, Row<'_>)> = source
            .rows()
            .iter()
            .map(|cells| Row::new(&index, cells))
            .enumerate()
            .filter(|(_, row)| !row.is_blank())
            .map(|(i, row)| (i + 1, row))
            .collect();
        let discarded_rows = source.rows().len() - rows.len();

        if rows.is_empty() {
            debug!(discarded_rows, "no non-blank rows in input");
            return Err(ConvertError::EmptyInput);
        }

        let row_encoder = RowEncoder::new(self.layout);
        let mut lines = Vec::with_capacity(rows.len());
        for (row_number, row) in &rows {
            let encoded = row_encoder.encode(row);
            for fallback in encoded.fallbacks {
                let field = &self.layout.fields()[fallback.field];
                if self.config.strictness == Strictness::Strict && fallback.issue.is_malformed() {
                    return Err(ConvertError::MalformedCell {
                        row: *row_number,
                        field: field.name.clone(),
                        value: fallback.value,
                        issue: fallback.issue,
                    });
                }
                warn!(
                    row = row_number,
                    field = %field.name,
                    value = %fallback.value,
                    "{}",
                    fallback.issue
                );
                warnings.push(FieldWarning {
                    row: *row_number,
                    field: field.name.clone(),
                    value: fallback.value,
                    issue: fallback.issue,
                });
            }
            lines.push(encoded.line);
        }

        debug!(
            lines = lines.len(),
            discarded_rows,
            warnings = warnings.len(),
            "encoded document"
        );
        Ok(EncodedDocument {
            lines,
            warnings,
            discarded_rows,
        })
    }

    fn missing_columns(&self, index: &ColumnIndex) -> Vec<FieldWarning> {
        let mut warnings = Vec::new();
        for field in self.layout.fields() {
            let Some(column) = field.source_column() else {
                continue;
            };
            if !index.contains(column) {
                warn!(field = %field.name, column, "source column not found in input");
                warnings.push(FieldWarning {
                    row: 0,
                    field: field.name.clone(),
                    value: column.to_string(),
                    issue: FieldIssue::MissingColumn,
                });
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FieldKind, FieldSpec, TOTAL_LINE_SIZE};
    use crate::table::Table;

    const PS_COLUMNS: [&str; 6] = [
        "CPF DO AUTÔNOMO",
        "CÓDIGO PLANO",
        "MENSALIDADE TITULAR",
        "CPF DO DEPENDENTE",
        "CÓDIGO PLANO DEPENDENTE",
        "MENSALIDADE DEPENDENTE",
    ];

    fn expected_holder_only_line() -> String {
        format!(
            "3{}{}{}{}{}{}{}",
            "12345678900",
            "AB1 ",
            "00123456",
            "00000000000",
            "    ",
            "00000000",
            " ".repeat(153)
        )
    }

    fn encode_ps(table: &Table) -> Result<EncodedDocument, ConvertError> {
        let layout = Layout::ps().unwrap();
        DocumentEncoder::new(&layout, EncoderConfig::default()).encode(table)
    }

    #[test]
    fn test_holder_only_scenario() {
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[&["123.456.789-00", "AB1", "1.234,56", "", "", ""]],
        );
        let doc = encode_ps(&table).unwrap();
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.lines()[0].as_str(), expected_holder_only_line());
        assert_eq!(doc.to_bytes().len(), 200);
        assert!(doc.warnings().is_empty());
    }

    #[test]
    fn test_holder_and_dependent() {
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[&[
                "123.456.789-00",
                "AB1",
                "1.234,56",
                "987.654.321-00",
                "DP2",
                "617,28",
            ]],
        );
        let doc = encode_ps(&table).unwrap();
        let line = &doc.lines()[0];
        assert_eq!(line.field(25, 11), "98765432100");
        assert_eq!(line.field(36, 4), "DP2 ");
        assert_eq!(line.field(40, 8), "00061728");
        assert_eq!(line.field(48, 153), " ".repeat(153));
    }

    #[test]
    fn test_two_rows_joined_by_single_newline() {
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[
                &["111.111.111-11", "A", "10,00", "", "", ""],
                &["222.222.222-22", "B", "20,00", "", "", ""],
            ],
        );
        let bytes = encode_ps(&table).unwrap().to_bytes();
        assert_eq!(bytes.len(), 2 * 200 + 1);
        assert_eq!(bytes[200], b'\n');
        assert_eq!(bytes.iter().filter(|b| **b == b'\n').count(), 1);
        assert!(!bytes.ends_with(b"\n"));
    }

    #[test]
    fn test_rows_keep_input_order() {
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[
                &["3", "", "", "", "", ""],
                &["1", "", "", "", "", ""],
                &["2", "", "", "", "", ""],
            ],
        );
        let doc = encode_ps(&table).unwrap();
        let ids: Vec<&str> = doc.lines().iter().map(|l| l.field(2, 11)).collect();
        assert_eq!(ids, vec!["00000000003", "00000000001", "00000000002"]);
    }

    #[test]
    fn test_blank_rows_are_discarded() {
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[
                &["", "", "", "", "", ""],
                &["123.456.789-00", "AB1", "1.234,56", "", "", ""],
                &["  ", "", "", "", "", ""],
                &[],
            ],
        );
        let doc = encode_ps(&table).unwrap();
        assert_eq!(doc.lines().len(), 1);
        assert_eq!(doc.discarded_rows(), 3);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let no_rows = Table::from_strs(&PS_COLUMNS, &[]);
        assert!(matches!(encode_ps(&no_rows), Err(ConvertError::EmptyInput)));

        let only_blank = Table::from_strs(&PS_COLUMNS, &[&["", "", "", "", "", ""]]);
        assert!(matches!(encode_ps(&only_blank), Err(ConvertError::EmptyInput)));
    }

    #[test]
    fn test_untrimmed_headers_still_match() {
        let table = Table::from_strs(
            &[" CPF DO AUTÔNOMO", "CÓDIGO PLANO ", "MENSALIDADE TITULAR  "],
            &[&["123.456.789-00", "AB1", "1.234,56"]],
        );
        let doc = encode_ps(&table).unwrap();
        assert_eq!(&doc.lines()[0].as_str()[..24], &expected_holder_only_line()[..24]);
    }

    #[test]
    fn test_missing_columns_are_warned_and_blank() {
        let table = Table::from_strs(&["CPF DO AUTÔNOMO"], &[&["12345678900"]]);
        let doc = encode_ps(&table).unwrap();
        let missing: Vec<&str> = doc
            .warnings()
            .iter()
            .filter(|w| w.issue == FieldIssue::MissingColumn)
            .map(|w| w.value.as_str())
            .collect();
        assert_eq!(missing.len(), 5);
        assert!(missing.contains(&"CÓDIGO PLANO DEPENDENTE"));
        assert_eq!(doc.lines()[0].field(13, 4), "    ");
        assert_eq!(doc.lines()[0].field(17, 8), "00000000");
    }

    #[test]
    fn test_row_of_unrelated_columns_is_all_fallbacks() {
        // Non-blank row whose values live outside the layout's columns.
        let table = Table::from_strs(&["OBS"], &[&["note"]]);
        let doc = encode_ps(&table).unwrap();
        let line = doc.lines()[0].as_str();
        assert_eq!(line.len(), TOTAL_LINE_SIZE);
        assert_eq!(
            &line[..47],
            "300000000000    0000000000000000000    00000000"
        );
    }

    #[test]
    fn test_lenient_records_warnings() {
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[
                &["123.456.789-00", "AB1", "1.234,56", "", "", ""],
                &["sem cpf", "LONGCODE", "abc", "", "", "-5,00"],
            ],
        );
        let doc = encode_ps(&table).unwrap();
        let found: Vec<(usize, &str, FieldIssue)> = doc
            .warnings()
            .iter()
            .map(|w| (w.row, w.field.as_str(), w.issue))
            .collect();
        assert_eq!(
            found,
            vec![
                (2, "CPF_AUTONOMO", FieldIssue::NoDigits),
                (2, "CODIGO_PLANO_AUTONOMO", FieldIssue::Truncated),
                (2, "VALOR_DESCONTO_AUTONOMO", FieldIssue::Unparseable),
                (2, "VALOR_DESCONTO_AUTONOMO_DEPENDENTE", FieldIssue::Negative),
            ]
        );
        assert_eq!(doc.lines()[1].field(13, 4), "LONG");
    }

    #[test]
    fn test_strict_rejects_malformed_cell() {
        let layout = Layout::ps().unwrap();
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[
                &["", "", "", "", "", ""],
                &["123.456.789-00", "AB1", "1.234,56", "", "", ""],
                &["123.456.789-00", "AB1", "mil reais", "", "", ""],
            ],
        );
        let err = DocumentEncoder::new(&layout, EncoderConfig::strict())
            .encode(&table)
            .unwrap_err();
        match err {
            ConvertError::MalformedCell {
                row,
                field,
                value,
                issue,
            } => {
                assert_eq!(row, 3);
                assert_eq!(field, "VALOR_DESCONTO_AUTONOMO");
                assert_eq!(value, "mil reais");
                assert_eq!(issue, FieldIssue::Unparseable);
            }
            other => panic!("Expected MalformedCell, got {other:?}"),
        }
    }

    #[test]
    fn test_strict_allows_truncation() {
        let layout = Layout::ps().unwrap();
        let table = Table::from_strs(&PS_COLUMNS, &[&["1", "LONGCODE", "1,00", "", "", ""]]);
        let doc = DocumentEncoder::new(&layout, EncoderConfig::strict())
            .encode(&table)
            .unwrap();
        assert_eq!(doc.warnings().len(), 1);
        assert_eq!(doc.warnings()[0].issue, FieldIssue::Truncated);
    }

    #[test]
    fn test_gap_is_space_filled() {
        let layout = Layout::new(
            vec![
                FieldSpec::fixed("T", 1, 1, "9"),
                FieldSpec::column("N", 5, 3, FieldKind::Numeric, "n"),
                FieldSpec::column("A", 12, 2, FieldKind::AlphaNumeric, "a"),
            ],
            16,
        )
        .unwrap();
        let table = Table::from_strs(&["n", "a"], &[&["7", "xy"]]);
        let index = ColumnIndex::from_names(table.column_names());
        let encoded = RowEncoder::new(&layout).encode(&Row::new(&index, &table.rows()[0]));
        assert_eq!(encoded.line.as_str(), "9   007    xy   ");
        assert!(encoded.fallbacks.is_empty());
    }

    #[test]
    fn test_row_encoder_width_for_empty_row() {
        let layout = Layout::ps().unwrap();
        let index = ColumnIndex::from_names(&[]);
        let encoded = RowEncoder::new(&layout).encode(&Row::new(&index, &[]));
        assert_eq!(encoded.line.width(), TOTAL_LINE_SIZE);
        assert_eq!(
            &encoded.line.as_str()[..47],
            "300000000000    0000000000000000000    00000000"
        );
        assert!(encoded.line.as_str()[47..].chars().all(|c| c == ' '));
    }

    #[test]
    fn test_row_encoder_width_for_oversized_values() {
        let layout = Layout::ps().unwrap();
        let table = Table::from_strs(
            &PS_COLUMNS,
            &[&[
                "9999999999999999999999",
                "ABCDEFGHIJ",
                "99999999999,99",
                "x1y2z3",
                "   ",
                "1e3",
            ]],
        );
        let index = ColumnIndex::from_names(table.column_names());
        let encoded = RowEncoder::new(&layout).encode(&Row::new(&index, &table.rows()[0]));
        assert_eq!(encoded.line.width(), TOTAL_LINE_SIZE);
        assert_eq!(encoded.line.field(40, 8), "00100000");
    }
}
