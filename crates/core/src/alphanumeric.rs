//! Alphanumeric domain check.
//!
//! Identifier and instrument columns are expected to hold purely
//! alphanumeric values; punctuation or whitespace in any of them marks the
//! row as suspect (e.g. a symbol stored as `"EUR/USD"` instead of
//! `"EURUSD"`).

use crate::error::AuditError;
use crate::table::Table;

/// Columns inspected by [`non_alphanumeric_rows`].
pub const CHECKED_COLUMNS: &[&str] = &[
    "login_hash",
    "ticket_hash",
    "server_hash",
    "symbol",
    "digits",
    "cmd",
];

/// Whether a string representation counts as alphanumeric. Empty strings do
/// not (matching `str.isalnum` in the legacy auditor).
fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

/// Indices of trade rows where at least one checked column holds a non-null
/// value whose string representation is not purely alphanumeric. Null cells
/// are exempt, never violations.
pub fn non_alphanumeric_rows(trades: &Table) -> Result<Vec<usize>, AuditError> {
    if trades.is_empty() {
        return Ok(Vec::new());
    }
    let indices = CHECKED_COLUMNS
        .iter()
        .map(|name| trades.column_index(name))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(trades
        .rows()
        .enumerate()
        .filter(|(_, row)| {
            indices.iter().any(|&i| match row[i].display_string() {
                Some(s) => !is_alphanumeric(&s),
                None => false,
            })
        })
        .map(|(row_no, _)| row_no)
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::table::Value;

    fn trades_table() -> Table {
        Table::new([
            "login_hash",
            "ticket_hash",
            "server_hash",
            "symbol",
            "digits",
            "cmd",
        ])
    }

    fn clean_row() -> Vec<Value> {
        vec![
            Value::Text("l1".into()),
            Value::Text("t1".into()),
            Value::Text("s1".into()),
            Value::Text("EURUSD".into()),
            Value::Int(5),
            Value::Int(0),
        ]
    }

    #[test]
    fn clean_rows_are_not_flagged() {
        let mut table = trades_table();
        table.push_row(clean_row()).unwrap();
        assert!(non_alphanumeric_rows(&table).unwrap().is_empty());
    }

    #[test]
    fn symbol_with_punctuation_is_flagged() {
        let mut table = trades_table();
        table.push_row(clean_row()).unwrap();
        let mut bad = clean_row();
        bad[3] = Value::Text("EUR/USD".into());
        table.push_row(bad).unwrap();

        assert_eq!(non_alphanumeric_rows(&table).unwrap(), vec![1]);
    }

    #[test]
    fn whitespace_in_identifier_is_flagged() {
        let mut table = trades_table();
        let mut bad = clean_row();
        bad[0] = Value::Text("l 1".into());
        table.push_row(bad).unwrap();

        assert_eq!(non_alphanumeric_rows(&table).unwrap(), vec![0]);
    }

    #[test]
    fn empty_string_is_flagged() {
        let mut table = trades_table();
        let mut bad = clean_row();
        bad[1] = Value::Text(String::new());
        table.push_row(bad).unwrap();

        assert_eq!(non_alphanumeric_rows(&table).unwrap(), vec![0]);
    }

    #[test]
    fn null_cells_are_exempt() {
        let mut table = trades_table();
        let mut row = clean_row();
        row[4] = Value::Null;
        table.push_row(row).unwrap();

        assert!(non_alphanumeric_rows(&table).unwrap().is_empty());
    }

    #[test]
    fn float_typed_digits_column_is_flagged() {
        // A digits value that came back float-typed reads "5.0".
        let mut table = trades_table();
        let mut row = clean_row();
        row[4] = Value::Float(5.0);
        table.push_row(row).unwrap();

        assert_eq!(non_alphanumeric_rows(&table).unwrap(), vec![0]);
    }

    #[test]
    fn missing_checked_column_is_fatal() {
        let mut table = Table::new(["login_hash"]);
        table.push_row(vec![Value::Text("l1".into())]).unwrap();

        let err = non_alphanumeric_rows(&table).unwrap_err();
        assert_matches!(err, AuditError::MissingColumn(_));
    }

    #[test]
    fn empty_table_yields_no_violations() {
        let table = Table::new(Vec::<String>::new());
        assert!(non_alphanumeric_rows(&table).unwrap().is_empty());
    }
}
