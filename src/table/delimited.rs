//! Grids from tab- and comma-delimited clipboard text.

use crate::clean::normalize_text;
use crate::error::{Error, Result};
use crate::model::TableGrid;

use super::{check_cell_limit, Delimiter};

/// Split clipboard text into rows, dropping only a trailing empty line.
///
/// Interior blank lines stay: spreadsheets copy empty rows as blank lines.
fn split_rows(text: &str) -> Vec<&str> {
    let mut rows: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if rows.last().is_some_and(|line| line.is_empty()) {
        rows.pop();
    }
    rows
}

/// Build a grid from delimited text.
pub(crate) fn parse_delimited(
    text: &str,
    delimiter: Delimiter,
    limit: usize,
) -> Result<TableGrid> {
    let rows = split_rows(text)
        .into_iter()
        .map(|line| match delimiter {
            Delimiter::Tab => Ok(line.split('\t').map(normalize_text).collect()),
            Delimiter::Comma => split_csv_line(line),
        })
        .collect::<Result<Vec<Vec<String>>>>()?;

    if rows.is_empty() {
        return Err(Error::EmptyTable);
    }

    let grid = TableGrid::from_rows(rows);
    check_cell_limit(grid.cell_count(), limit)?;

    log::debug!(
        "TableBuilder: {:?} grid with {} rows x {} columns",
        delimiter,
        grid.row_count(),
        grid.column_count()
    );
    Ok(grid)
}

/// Split one CSV line, honouring double-quoted fields and `""` escapes.
///
/// Lines are read one at a time so blank rows survive; the csv reader
/// would skip them.
fn split_csv_line(line: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let mut record = csv::StringRecord::new();
    if !reader.read_record(&mut record)? {
        return Ok(vec![String::new()]);
    }
    Ok(record.iter().map(normalize_text).collect())
}
