//! Referential integrity checks between the trades and users tables.
//!
//! The store does not enforce foreign keys, so a trade's `server_hash` and
//! `login_hash` may reference users that do not exist. These checks work on
//! distinct key sets only; no row-level detail is returned.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::AuditError;
use crate::table::Table;

pub const SERVER_HASH: &str = "server_hash";
pub const LOGIN_HASH: &str = "login_hash";

/// Server hashes present in one table but not the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerIntegrity {
    pub only_in_trades: BTreeSet<String>,
    pub only_in_users: BTreeSet<String>,
}

/// Set differences of the distinct `server_hash` values of both tables.
///
/// The two returned sets are always disjoint, and together with the common
/// hashes they reconstruct the union of both input key sets.
pub fn server_integrity(trades: &Table, users: &Table) -> Result<ServerIntegrity, AuditError> {
    let trade_servers = trades.distinct_text(SERVER_HASH)?;
    let user_servers = users.distinct_text(SERVER_HASH)?;
    Ok(ServerIntegrity {
        only_in_trades: trade_servers.difference(&user_servers).cloned().collect(),
        only_in_users: user_servers.difference(&trade_servers).cloned().collect(),
    })
}

/// Distinct `login_hash` values appearing in trades but never in users.
///
/// Asymmetric on purpose: every trade must belong to a known user, but a
/// user with no trades is unremarkable and is not reported.
pub fn logins_only_in_trades(
    trades: &Table,
    users: &Table,
) -> Result<BTreeSet<String>, AuditError> {
    let trade_logins = trades.distinct_text(LOGIN_HASH)?;
    let user_logins = users.distinct_text(LOGIN_HASH)?;
    Ok(trade_logins.difference(&user_logins).cloned().collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Value;

    fn keyed_table(column: &str, keys: &[&str]) -> Table {
        let mut table = Table::new([column]);
        for key in keys {
            table.push_row(vec![Value::Text((*key).into())]).unwrap();
        }
        table
    }

    fn set(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    // -- server_integrity -----------------------------------------------------

    #[test]
    fn reports_hashes_exclusive_to_each_table() {
        let trades = keyed_table(SERVER_HASH, &["s1", "s2", "s2", "s3"]);
        let users = keyed_table(SERVER_HASH, &["s2", "s3", "s4"]);

        let integrity = server_integrity(&trades, &users).unwrap();
        assert_eq!(integrity.only_in_trades, set(&["s1"]));
        assert_eq!(integrity.only_in_users, set(&["s4"]));
    }

    #[test]
    fn identical_key_sets_produce_empty_differences() {
        let trades = keyed_table(SERVER_HASH, &["s1", "s2"]);
        let users = keyed_table(SERVER_HASH, &["s2", "s1"]);

        let integrity = server_integrity(&trades, &users).unwrap();
        assert!(integrity.only_in_trades.is_empty());
        assert!(integrity.only_in_users.is_empty());
    }

    #[test]
    fn differences_are_disjoint_and_reconstruct_the_union() {
        let trades = keyed_table(SERVER_HASH, &["s1", "s2", "s3"]);
        let users = keyed_table(SERVER_HASH, &["s3", "s4"]);

        let integrity = server_integrity(&trades, &users).unwrap();
        assert!(integrity
            .only_in_trades
            .intersection(&integrity.only_in_users)
            .next()
            .is_none());

        let common: BTreeSet<String> = trades
            .distinct_text(SERVER_HASH)
            .unwrap()
            .intersection(&users.distinct_text(SERVER_HASH).unwrap())
            .cloned()
            .collect();
        let reconstructed: BTreeSet<String> = integrity
            .only_in_trades
            .union(&integrity.only_in_users)
            .chain(&common)
            .cloned()
            .collect();
        assert_eq!(reconstructed, set(&["s1", "s2", "s3", "s4"]));
    }

    #[test]
    fn null_server_hashes_are_ignored() {
        let mut trades = keyed_table(SERVER_HASH, &["s1"]);
        trades.push_row(vec![Value::Null]).unwrap();
        let users = keyed_table(SERVER_HASH, &["s1"]);

        let integrity = server_integrity(&trades, &users).unwrap();
        assert!(integrity.only_in_trades.is_empty());
    }

    // -- logins_only_in_trades ------------------------------------------------

    #[test]
    fn reports_logins_missing_from_users() {
        let trades = keyed_table(LOGIN_HASH, &["l1", "l2", "l1"]);
        let users = keyed_table(LOGIN_HASH, &["l1"]);

        assert_eq!(logins_only_in_trades(&trades, &users).unwrap(), set(&["l2"]));
    }

    #[test]
    fn users_without_trades_are_not_reported() {
        let trades = keyed_table(LOGIN_HASH, &["l1"]);
        let users = keyed_table(LOGIN_HASH, &["l1", "l2", "l3"]);

        assert!(logins_only_in_trades(&trades, &users).unwrap().is_empty());
    }

    #[test]
    fn result_is_disjoint_from_user_logins() {
        let trades = keyed_table(LOGIN_HASH, &["l1", "l2", "l3"]);
        let users = keyed_table(LOGIN_HASH, &["l2"]);

        let orphans = logins_only_in_trades(&trades, &users).unwrap();
        let user_logins = users.distinct_text(LOGIN_HASH).unwrap();
        assert!(orphans.intersection(&user_logins).next().is_none());
        assert!(orphans.is_subset(&trades.distinct_text(LOGIN_HASH).unwrap()));
    }
}
