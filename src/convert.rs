//! One-call conversion: workbook in, Layout PS document out.

use std::path::Path;

use crate::config::{EncoderConfig, ReaderConfig};
use crate::encoder::{DocumentEncoder, EncodedDocument};
use crate::error::ConvertError;
use crate::layout::Layout;
use crate::reader::{read_workbook_bytes, read_workbook_path};

/// Read the workbook at `path` and encode it against `layout`.
///
/// # Errors
///
/// [`ConvertError::InvalidSource`] if the workbook cannot be read, otherwise
/// whatever [`DocumentEncoder::encode`] returns.
pub fn convert_path(
    path: &Path,
    layout: &Layout,
    reader: &ReaderConfig,
    encoder: EncoderConfig,
) -> Result<EncodedDocument, ConvertError> {
    let table = read_workbook_path(path, reader)?;
    DocumentEncoder::new(layout, encoder).encode(&table)
}

/// Same as [`convert_path`] for a workbook held in memory.
///
/// # Errors
///
/// See [`convert_path`].
pub fn convert_bytes(
    bytes: Vec<u8>,
    layout: &Layout,
    reader: &ReaderConfig,
    encoder: EncoderConfig,
) -> Result<EncodedDocument, ConvertError> {
    let table = read_workbook_bytes(bytes, reader)?;
    DocumentEncoder::new(layout, encoder).encode(&table)
}
