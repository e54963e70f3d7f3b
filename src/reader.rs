//! Spreadsheet reader: workbook file → [`Table`].
//!
//! Opens xlsx, xls, xlsb and ods through calamine's format detection and
//! takes the header row and data rows from one sheet. Repeated header
//! names are made unique here, so the encoders can look cells up by name.

use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use calamine::{Data, Range, Reader, Sheets, open_workbook_auto, open_workbook_auto_from_rs};
use tracing::debug;

use crate::cell::CellValue;
use crate::config::ReaderConfig;
use crate::error::ConvertError;
use crate::table::Table;

/// Read a workbook from disk.
///
/// # Errors
///
/// [`ConvertError::InvalidSource`] if the file cannot be opened as a
/// workbook, the sheet is missing, or the header row is absent.
pub fn read_workbook_path(path: &Path, config: &ReaderConfig) -> Result<Table, ConvertError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ConvertError::InvalidSource(format!("{}: {e}", path.display())))?;
    read_sheet(&mut workbook, config)
}

/// Read a workbook held in memory, e.g. an uploaded file.
///
/// # Errors
///
/// Same as [`read_workbook_path`].
pub fn read_workbook_bytes(bytes: Vec<u8>, config: &ReaderConfig) -> Result<Table, ConvertError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ConvertError::InvalidSource(e.to_string()))?;
    read_sheet(&mut workbook, config)
}

fn read_sheet<RS>(workbook: &mut Sheets<RS>, config: &ReaderConfig) -> Result<Table, ConvertError>
where
    RS: Read + Seek,
{
    let sheet = match &config.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ConvertError::InvalidSource("workbook has no sheets".to_string()))?,
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| ConvertError::InvalidSource(format!("sheet '{sheet}': {e}")))?;
    debug!(sheet = %sheet, size = ?range.get_size(), "read worksheet");
    table_from_range(&range, config)
}

/// Build a table from a sheet range, header at `config.header_row`.
pub fn table_from_range(range: &Range<Data>, config: &ReaderConfig) -> Result<Table, ConvertError> {
    let missing_header =
        || ConvertError::InvalidSource(format!("header row {} is empty", config.header_row + 1));

    // calamine ranges start at the first used cell, not at A1.
    let (first_row, first_col) = range.start().ok_or_else(missing_header)?;
    let skip = config
        .header_row
        .checked_sub(first_row as usize)
        .ok_or_else(missing_header)?;

    let mut rows = range.rows().skip(skip);
    let header = rows.next().ok_or_else(missing_header)?;
    if header.iter().all(|c| to_cell_value(c).is_blank()) {
        return Err(missing_header());
    }

    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = to_cell_value(cell).to_string();
            if name.trim().is_empty() {
                format!("Unnamed: {}", first_col as usize + i)
            } else {
                name
            }
        })
        .collect();
    let columns = disambiguate(names, &config.duplicate_aliases);

    let body = rows
        .map(|row| row.iter().map(to_cell_value).collect())
        .collect();
    Ok(Table::new(columns, body))
}

/// Make header names unique after trimming. The first occurrence keeps
/// its name; later ones take the next unused alias for that name, or
/// `name.1`, `name.2`, ... when none is left. Generated names never reuse
/// a name already present in the header or handed out earlier.
pub fn disambiguate(names: Vec<String>, aliases: &[(String, String)]) -> Vec<String> {
    let mut taken: HashSet<String> = names.iter().map(|n| n.trim().to_string()).collect();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut alias_used = vec![false; aliases.len()];

    names
        .into_iter()
        .map(|name| {
            let key = name.trim().to_string();
            let count = seen.entry(key.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                return name;
            }
            let alias = (0..aliases.len()).find(|&i| {
                !alias_used[i]
                    && aliases[i].0.trim() == key
                    && !taken.contains(aliases[i].1.trim())
            });
            let renamed = match alias {
                Some(i) => {
                    alias_used[i] = true;
                    aliases[i].1.clone()
                }
                None => (*count - 1..)
                    .map(|n| format!("{key}.{n}"))
                    .find(|candidate| !taken.contains(candidate))
                    .unwrap_or_default(),
            };
            taken.insert(renamed.trim().to_string());
            renamed
        })
        .collect()
}

fn to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) if s.is_empty() => CellValue::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::Text(s.clone())
        }
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
    }
}
