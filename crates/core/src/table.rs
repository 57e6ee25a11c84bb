//! In-memory tabular dataset with named columns and row-wise access.
//!
//! The data source adapter materializes query results into [`Table`]s; the
//! checks only ever read them. Cells are loosely typed ([`Value`]) because
//! the source tables are fetched with `SELECT *` and the whole point of the
//! audit is that their contents cannot be trusted to match the schema.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::AuditError;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A single cell of a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Timestamp(Timestamp),
}

impl Value {
    /// Short type name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether the cell holds a genuine numeric value. Only `Int` and
    /// `Float` qualify; `Null` is not numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// The string representation the alphanumeric check inspects.
    ///
    /// `None` for `Null` (null cells have no representation and are exempt
    /// from the check). Floats always render with a decimal point, so a
    /// float-typed `1.0` reads `"1.0"` and fails an alphanumeric test just
    /// as it did in the legacy auditor.
    pub fn display_string(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int(v) => Some(v.to_string()),
            Value::Float(v) => Some(format!("{v:?}")),
            Value::Bool(v) => Some(v.to_string()),
            Value::Text(v) => Some(v.clone()),
            Value::Timestamp(v) => Some(v.to_rfc3339()),
        }
    }

    /// `Some` for `Timestamp` cells, `None` otherwise.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// A named-column, row-major dataset. Owned exclusively by the audit run
/// that fetched it; checks take `&Table` and never mutate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The cell count must match the column count.
    pub fn push_row(&mut self, cells: Vec<Value>) -> Result<(), AuditError> {
        if cells.len() != self.columns.len() {
            return Err(AuditError::RowArity {
                expected: self.columns.len(),
                got: cells.len(),
            });
        }
        self.rows.push(cells);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a named column, or `MissingColumn` — schema mismatch is
    /// fatal for the run, checks never recover from it.
    pub fn column_index(&self, name: &str) -> Result<usize, AuditError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| AuditError::MissingColumn(name.to_string()))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Distinct non-null display strings of a column, ordered. An empty
    /// table yields an empty set without resolving the column (zero-row
    /// query results carry no column metadata).
    pub fn distinct_text(&self, column: &str) -> Result<BTreeSet<String>, AuditError> {
        if self.is_empty() {
            return Ok(BTreeSet::new());
        }
        let idx = self.column_index(column)?;
        Ok(self
            .rows()
            .filter_map(|row| row[idx].display_string())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
