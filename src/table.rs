//! Tabular input consumed by the encoders.
//!
//! The encoders do not care where rows come from. Anything that can hand
//! over an ordered list of column names and ordered rows of cells
//! implements [`TabularSource`]; [`Table`] is the in-memory implementation
//! produced by the spreadsheet reader and used throughout the tests.
//!
//! Column names must already be unique once trimmed. Spreadsheets that
//! repeat a header (the PS template has two "CÓDIGO PLANO" columns) are
//! disambiguated by the reader before rows get here.

use std::collections::HashMap;

use crate::cell::CellValue;

/// A source of named columns and positional rows.
pub trait TabularSource {
    /// Column names in sheet order.
    fn column_names(&self) -> &[String];

    /// Rows in sheet order. A row may be shorter than the header; missing
    /// trailing cells read as [`CellValue::Empty`].
    fn rows(&self) -> &[Vec<CellValue>];
}

/// An in-memory table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Convenience constructor from string-ish headers and cells.
    pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Self {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .iter()
            .map(|r| {
                r.iter()
                    .map(|c| {
                        if c.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::from(*c)
                        }
                    })
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl TabularSource for Table {
    fn column_names(&self) -> &[String] {
        &self.columns
    }

    fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }
}

/// Lookup from trimmed column name to cell position.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    by_name: HashMap<String, usize>,
}

impl ColumnIndex {
    /// Index column names after trimming surrounding whitespace. If two
    /// names collide after trimming, the first one wins.
    pub fn from_names(names: &[String]) -> Self {
        let mut by_name = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            by_name.entry(name.trim().to_string()).or_insert(i);
        }
        Self { by_name }
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name.trim()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

static EMPTY: CellValue = CellValue::Empty;

/// One row, viewed by column name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    index: &'a ColumnIndex,
    cells: &'a [CellValue],
}

impl<'a> Row<'a> {
    pub fn new(index: &'a ColumnIndex, cells: &'a [CellValue]) -> Self {
        Self { index, cells }
    }

    /// Cell under `column`, or Empty when the column is unknown or the row
    /// is short.
    pub fn get(&self, column: &str) -> &'a CellValue {
        self.index
            .position(column)
            .and_then(|i| self.cells.get(i))
            .unwrap_or(&EMPTY)
    }

    /// True when every cell of the row is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_blank)
    }
}
