//! Numeric-type check.
//!
//! Flags trade rows where NONE of the quantity columns hold a genuine
//! numeric value. This is the literal contract of the legacy auditor (a
//! negated per-column map fed into an any-across-columns test), kept
//! bit-for-bit on purpose: a row with even one numeric quantity column is
//! never flagged, however garbled the rest are. Stakeholders have been
//! flagged that "every checked column must be numeric" was probably the
//! intended rule; do not change the semantics here without a ruling.

use crate::error::AuditError;
use crate::table::Table;

/// Columns inspected by [`non_numeric_rows`].
pub const CHECKED_COLUMNS: &[&str] = &["digits", "cmd", "volume", "open_price", "contractsize"];

/// Indices of trade rows where every checked column is non-numeric.
pub fn non_numeric_rows(trades: &Table) -> Result<Vec<usize>, AuditError> {
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
        .filter(|(_, row)| indices.iter().all(|&i| !row[i].is_numeric()))
        .map(|(row_no, _)| row_no)
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
