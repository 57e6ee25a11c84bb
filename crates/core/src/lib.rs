//! Pure audit rules for the trading-records store.
//!
//! Everything in this crate is synchronous and side-effect-free: the six
//! integrity checks consume in-memory [`Table`] datasets and produce
//! violation sets (row indices for intra-table checks, key sets for
//! cross-table checks). Fetching the datasets and printing the report live
//! in `tradeaudit-db` and `tradeaudit-cli` respectively.

pub mod alphanumeric;
pub mod error;
pub mod numeric;
pub mod referential;
pub mod report;
pub mod table;
pub mod temporal;

pub use error::AuditError;
pub use report::{run_audit, AuditReport};
pub use table::{Table, Value};
