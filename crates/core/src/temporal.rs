//! Temporal consistency checks on trade open/close timestamps.
//!
//! A well-formed trade opens strictly before it closes and stays open less
//! than the bounded number of days. Both checks skip rows with a null
//! timestamp on either side; a non-null, non-timestamp cell in either
//! column is a fatal type mismatch.

use chrono::Duration;

use crate::error::AuditError;
use crate::table::{Table, Timestamp, Value};

pub const OPEN_TIME: &str = "open_time";
pub const CLOSE_TIME: &str = "close_time";

fn timestamp_cell(
    cell: &Value,
    column: &'static str,
) -> Result<Option<Timestamp>, AuditError> {
    match cell {
        Value::Null => Ok(None),
        other => other
            .as_timestamp()
            .map(Some)
            .ok_or_else(|| AuditError::TypeMismatch {
                column: column.to_string(),
                expected: "timestamp",
                found: other.kind(),
            }),
    }
}

/// Indices of trade rows where `open_time >= close_time`.
pub fn invalid_open_time_rows(trades: &Table) -> Result<Vec<usize>, AuditError> {
    if trades.is_empty() {
        return Ok(Vec::new());
    }
    let open_idx = trades.column_index(OPEN_TIME)?;
    let close_idx = trades.column_index(CLOSE_TIME)?;

    let mut flagged = Vec::new();
    for (row_no, row) in trades.rows().enumerate() {
        let open = timestamp_cell(&row[open_idx], OPEN_TIME)?;
        let close = timestamp_cell(&row[close_idx], CLOSE_TIME)?;
        if let (Some(open), Some(close)) = (open, close) {
            if open >= close {
                flagged.push(row_no);
            }
        }
    }
    Ok(flagged)
}

/// Indices of trade rows where `close_time - open_time` reaches
/// `max_day_difference` days. Closed lower bound: a trade open for exactly
/// the threshold is flagged.
pub fn invalid_close_time_rows(
    trades: &Table,
    max_day_difference: i64,
) -> Result<Vec<usize>, AuditError> {
    if trades.is_empty() {
        return Ok(Vec::new());
    }
    let open_idx = trades.column_index(OPEN_TIME)?;
    let close_idx = trades.column_index(CLOSE_TIME)?;
    let bound = Duration::days(max_day_difference);

    let mut flagged = Vec::new();
    for (row_no, row) in trades.rows().enumerate() {
        let open = timestamp_cell(&row[open_idx], OPEN_TIME)?;
        let close = timestamp_cell(&row[close_idx], CLOSE_TIME)?;
        if let (Some(open), Some(close)) = (open, close) {
            if close - open >= bound {
                flagged.push(row_no);
            }
        }
    }
    Ok(flagged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
