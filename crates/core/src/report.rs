//! Audit report assembly and console formatting.
//!
//! [`run_audit`] runs all six checks over the two datasets. The checks are
//! independent and order-free; any per-check failure (missing column, type
//! mismatch) aborts the whole report, there is no partial-success contract.
//! The `Display` output keeps line-for-line wording parity with the legacy
//! auditor so downstream log scrapers keep working.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::alphanumeric;
use crate::error::AuditError;
use crate::numeric;
use crate::referential::{self, ServerIntegrity};
use crate::table::Table;
use crate::temporal;

/// Results of the six integrity checks. Row-level checks carry the indices
/// of violating rows in the trades dataset; key-level checks carry hash
/// sets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditReport {
    pub non_alphanumeric_rows: Vec<usize>,
    pub non_numeric_rows: Vec<usize>,
    pub server_integrity: ServerIntegrity,
    pub logins_only_in_trades: BTreeSet<String>,
    pub invalid_open_time_rows: Vec<usize>,
    pub invalid_close_time_rows: Vec<usize>,
    /// Day bound the duration check ran with.
    pub max_day_difference: i64,
}

/// Run the full battery of checks against the two datasets.
pub fn run_audit(
    trades: &Table,
    users: &Table,
    max_day_difference: i64,
) -> Result<AuditReport, AuditError> {
    Ok(AuditReport {
        non_alphanumeric_rows: alphanumeric::non_alphanumeric_rows(trades)?,
        non_numeric_rows: numeric::non_numeric_rows(trades)?,
        server_integrity: referential::server_integrity(trades, users)?,
        logins_only_in_trades: referential::logins_only_in_trades(trades, users)?,
        invalid_open_time_rows: temporal::invalid_open_time_rows(trades)?,
        invalid_close_time_rows: temporal::invalid_close_time_rows(trades, max_day_difference)?,
        max_day_difference,
    })
}

impl fmt::Display for AuditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "There are {} rows that contain non-alphanumeric values",
            self.non_alphanumeric_rows.len()
        )?;
        writeln!(
            f,
            "There are {} rows that contain non_numeric values",
            self.non_numeric_rows.len()
        )?;
        write!(f, "The following server hash only found in trades")?;
        for hash in &self.server_integrity.only_in_trades {
            write!(f, " {hash}")?;
        }
        writeln!(f)?;
        write!(f, "The following server hash only found in users")?;
        for hash in &self.server_integrity.only_in_users {
            write!(f, " {hash}")?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "There are {} login that can only be found in Trades table",
            self.logins_only_in_trades.len()
        )?;
        writeln!(
            f,
            "There are {} records that have open time greater than or equal to close time",
            self.invalid_open_time_rows.len()
        )?;
        write!(
            f,
            "There are {} records that have close time greater than open time by {} days",
            self.invalid_close_time_rows.len(),
            self.max_day_difference
        )
    }
}
