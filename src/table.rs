//! Row-oriented view of an annotation table.
//!
//! Cells are JSON values: scalars for identifier columns, lists of records
//! (or null) for annotation columns.

use serde_json::{Map, Value};

pub type Row = Map<String, Value>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Builds a table from rows. Columns are the union of the row keys, in
    /// the order they are first seen.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut columns: Vec<String> = vec![];
        for row in rows.iter() {
            for key in row.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Table { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn last_column(&self) -> Option<&str> {
        self.columns.last().map(String::as_str)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for which `keep` holds. The column list is kept as is.
    pub fn filter<F>(&self, keep: F) -> Table
    where
        F: Fn(&Row) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

/// Non-null text of `row[column]`. Numbers are rendered, blanks are `None`.
pub fn cell_text(row: &Row, column: &str) -> Option<String> {
    match row.get(column) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(other.to_string()),
    }
}
