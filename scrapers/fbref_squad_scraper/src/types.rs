use serde::{Serialize, Serializer};
use std::{collections::HashMap, fmt};

use crate::{
    category::Category,
    error::{Result, ScrapeError},
};

/// One parsed table cell. Numbers keep their numeric type so merged tables
/// can be written back out without reformatting.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// Types a trimmed cell text: integers (thousands separators allowed),
    /// then floats, then plain text.
    pub fn parse(raw: &str) -> Self {
        let text = raw.trim();
        if text.is_empty() {
            return Cell::Empty;
        }
        let digits = text.replace(',', "");
        if let Ok(i) = digits.parse::<i64>() {
            return Cell::Int(i);
        }
        match digits.parse::<f64>() {
            Ok(f) if f.is_finite() => Cell::Float(f),
            _ => Cell::Text(text.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Text(s) => f.write_str(s),
            Cell::Empty => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Int(i) => serializer.serialize_i64(*i),
            Cell::Float(x) => serializer.serialize_f64(*x),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Empty => serializer.serialize_none(),
        }
    }
}

/// Row-oriented table with named columns. Rows are dense and zero-indexed by
/// their position in `rows`; every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Builds a table, padding short rows with empty cells and cutting long ones.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
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

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Cell>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Projects onto the requested columns. The result keeps the columns in
    /// the order they appear in this table, not the order requested. A header
    /// name that occurs several times is selected at every position, and a
    /// name requested several times is repeated that many times.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Table> {
        let mut wanted: HashMap<&str, usize> = HashMap::new();
        for name in names {
            let name = name.as_ref();
            if self.column_index(name).is_none() {
                return Err(ScrapeError::missing_column(name));
            }
            *wanted.entry(name).or_default() += 1;
        }

        let indices: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .flat_map(|(i, c)| {
                let times = wanted.get(c.as_str()).copied().unwrap_or(0);
                std::iter::repeat(i).take(times)
            })
            .collect();

        Ok(Table {
            columns: indices.iter().map(|&i| self.columns[i].clone()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Appends a column holding `value` in every row.
    pub fn with_constant_column(mut self, name: &str, value: Cell) -> Self {
        self.columns.push(name.to_string());
        for row in &mut self.rows {
            row.push(value.clone());
        }
        self
    }

    /// Swaps the whole header in one step.
    pub fn rename_columns(&mut self, columns: Vec<String>) -> Result<()> {
        if columns.len() != self.columns.len() {
            return Err(ScrapeError::Parse(format!(
                "Expected {} column names, got {}",
                self.columns.len(),
                columns.len()
            )));
        }
        self.columns = columns;
        Ok(())
    }
}

/// A table whose header went through category normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedTable {
    pub category: Category,
    pub table: Table,
}

impl NormalizedTable {
    pub fn columns(&self) -> &[String] {
        &self.table.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.table.rows
    }

    pub fn into_table(self) -> Table {
        self.table
    }
}
