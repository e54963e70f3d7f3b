//! # ps-layout
//!
//! Converts health-plan enrollment spreadsheets into the Layout PS
//! fixed-width text file consumed by legacy payroll systems.
//!
//! ## Overview
//!
//! Each spreadsheet row becomes one 200-byte record line:
//! - **Fixed positions**: every field has a 1-based start and a width
//! - **Typed formatting**: digits-only IDs, implied-decimal amounts, codes
//! - **Gap filling**: unused positions, including the tail, are spaces
//! - **Best effort**: a malformed cell falls back to zeros or spaces and is
//!   reported as a warning instead of aborting the file
//!
//! ## Example
//!
//! ```
//! use ps_layout::{DocumentEncoder, EncoderConfig, Layout, Table};
//!
//! let table = Table::from_strs(
//!     &["CPF DO AUTÔNOMO", "CÓDIGO PLANO", "MENSALIDADE TITULAR"],
//!     &[&["123.456.789-00", "AB1", "1.234,56"]],
//! );
//!
//! let layout = Layout::ps().unwrap();
//! let doc = DocumentEncoder::new(&layout, EncoderConfig::default())
//!     .encode(&table)
//!     .unwrap();
//!
//! let line = &doc.lines()[0];
//! assert_eq!(line.width(), 200);
//! assert_eq!(line.field(1, 24), "312345678900AB1 00123456");
//! ```

pub mod cell;
pub mod config;
pub mod convert;
pub mod encoder;
pub mod error;
pub mod format;
pub mod layout;
pub mod reader;
pub mod record;
pub mod table;
pub mod warning;

pub use cell::CellValue;
pub use config::{EncoderConfig, ReaderConfig, Strictness};
pub use convert::{convert_bytes, convert_path};
pub use encoder::{DocumentEncoder, EncodedDocument, EncodedRow, FieldFallback, RowEncoder};
pub use error::{ConvertError, ErrorKind, LayoutError};
pub use format::{Formatted, format_field};
pub use layout::{FieldKind, FieldSource, FieldSpec, Layout, TOTAL_LINE_SIZE};
pub use reader::{read_workbook_bytes, read_workbook_path};
pub use record::RecordLine;
pub use table::{ColumnIndex, Row, Table, TabularSource};
pub use warning::{FieldIssue, FieldWarning};
