use crate::dataset::{Column, Dataset};
use crate::error::DatasetError;
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

/// Loads a CSV file whose first row names the columns.
pub fn load_csv(path: &Path) -> Result<Dataset, DatasetError> {
    let file = File::open(path)?;
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("dataset");
    let dataset = from_reader(name, BufReader::new(file))?;
    tracing::info!(path = %path.display(), rows = dataset.row_count(), columns = dataset.columns.len(), "Loaded CSV dataset");
    Ok(dataset)
}

/// Parses CSV from any reader.
///
/// Blank cells become missing values. Any other cell must parse as a decimal,
/// in plain or scientific notation. Rows are numbered from 1, not counting the
/// header.
pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Dataset, DatasetError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut columns: Vec<Column> = headers.iter().map(|h| Column::new(h, Vec::new())).collect();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 1;
        for (column, cell) in columns.iter_mut().zip(record.iter()) {
            column.values.push(parse_cell(cell).ok_or_else(|| DatasetError::Parse {
                row,
                column: column.name.clone(),
                value: cell.to_string(),
            })?);
        }
    }

    let dataset = Dataset::new(name, columns);
    if dataset.row_count() == 0 {
        return Err(DatasetError::Empty(name.to_string()));
    }
    Ok(dataset)
}

/// `Some(None)` for a blank cell, `None` when the cell is not a number.
fn parse_cell(cell: &str) -> Option<Option<Decimal>> {
    if cell.is_empty() {
        return Some(None);
    }
    Decimal::from_str(cell)
        .or_else(|_| Decimal::from_scientific(cell))
        .ok()
        .map(Some)
}
