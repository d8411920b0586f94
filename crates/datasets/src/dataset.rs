use crate::error::DatasetError;
use rust_decimal::Decimal;
use serde::Serialize;

/// One named column. A `None` cell was blank in the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<Decimal>>,
}

/// A table of numeric columns that all have the same number of rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Column {
    pub fn new(name: &str, values: Vec<Option<Decimal>>) -> Self {
        Self {
            name: name.to_string(),
            values,
        }
    }

    /// A column with no blank cells.
    pub fn complete(name: &str, values: &[Decimal]) -> Self {
        Self::new(name, values.iter().copied().map(Some).collect())
    }

    /// The present values, in row order.
    pub fn present(&self) -> Vec<Decimal> {
        self.values.iter().flatten().copied().collect()
    }

    pub fn has_values(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

impl Dataset {
    pub fn new(name: &str, columns: Vec<Column>) -> Self {
        Self {
            name: name.to_string(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Result<&Column, DatasetError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    /// The column's values with blank cells dropped.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Decimal>, DatasetError> {
        Ok(self.column(name)?.present())
    }

    /// Two columns restricted to the rows where both have a value, so that
    /// the results stay paired by row.
    pub fn paired_columns(&self, x: &str, y: &str) -> Result<(Vec<Decimal>, Vec<Decimal>), DatasetError> {
        let xs = self.column(x)?;
        let ys = self.column(y)?;
        Ok(xs
            .values
            .iter()
            .zip(&ys.values)
            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
            .unzip())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn gappy() -> Dataset {
        Dataset::new(
            "gappy",
            vec![
                Column::new("growth", vec![Some(dec!(1.1)), None, Some(dec!(2.3))]),
                Column::new("unemployment", vec![Some(dec!(10.4)), Some(dec!(10.1)), None]),
            ],
        )
    }

    #[test]
    fn numeric_column_drops_blanks() {
        let data = gappy();
        assert_eq!(data.numeric_column("growth").unwrap(), vec![dec!(1.1), dec!(2.3)]);
        assert_eq!(data.row_count(), 3);
        assert_eq!(data.column_names(), vec!["growth", "unemployment"]);
    }

    #[test]
    fn paired_columns_keep_rows_aligned() {
        let (x, y) = gappy().paired_columns("growth", "unemployment").unwrap();
        assert_eq!(x, vec![dec!(1.1)]);
        assert_eq!(y, vec![dec!(10.4)]);
    }

    #[test]
    fn unknown_column_is_reported_by_name() {
        let err = gappy().column("inflation").unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(name) if name == "inflation"));
    }
}
