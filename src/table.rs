use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::types::MetricsDtype;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Text(String),
    Float(f64),
    Int(i64),
}

impl Cell {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    fn convert(&self, column: &str, dtype: MetricsDtype) -> Result<Cell> {
        let Self::Text(raw) = self else {
            return Ok(self.clone());
        };
        let failed = || Error::NumericConversion {
            column: column.to_string(),
            value: raw.clone(),
            dtype: dtype.to_string(),
        };
        match dtype {
            MetricsDtype::String => Ok(self.clone()),
            MetricsDtype::Float64 => raw.trim().parse().map(Cell::Float).map_err(|_| failed()),
            MetricsDtype::Int64 => raw.trim().parse().map(Cell::Int).map_err(|_| failed()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_none(),
            Self::Text(s) => serializer.serialize_str(s),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Int(v) => serializer.serialize_i64(*v),
        }
    }
}

/// Rows under a fixed, ordered column set. Missing cells are [`Cell::Null`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build from `(column, value)` records. Columns are the union over all
    /// records in first-seen order.
    pub fn from_records<'a, R, C>(records: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = Table::default();
        for record in records {
            let mut row = vec![Cell::Null; table.columns.len()];
            for (column, value) in record {
                let idx = match table.column_index(column) {
                    Some(idx) => idx,
                    None => {
                        table.columns.push(column.to_string());
                        row.push(Cell::Null);
                        table.columns.len() - 1
                    }
                };
                row[idx] = Cell::Text(value.to_string());
            }
            table.rows.push(row);
        }
        let width = table.columns.len();
        for row in &mut table.rows {
            row.resize(width, Cell::Null);
        }
        table
    }

    /// Append a row; it is padded with nulls or truncated to the column count.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), Cell::Null);
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }

    /// Convert the text cells of `columns` to `dtype`. Unknown column names are
    /// ignored; a cell that does not parse fails the whole conversion.
    pub fn convert_columns(&mut self, columns: &[String], dtype: MetricsDtype) -> Result<()> {
        if dtype == MetricsDtype::String {
            return Ok(());
        }
        for name in columns {
            let Some(idx) = self.column_index(name) else {
                continue;
            };
            for row in &mut self.rows {
                row[idx] = row[idx].convert(name, dtype)?;
            }
        }
        Ok(())
    }
}

/// Serializes as an array of row objects keyed by column name.
impl Serialize for Table {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows.iter().map(|row| RowRef {
            columns: &self.columns,
            cells: row,
        }))
    }
}

struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl Serialize for RowRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}
