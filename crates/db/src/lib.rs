//! Data source adapter: connects to PostgreSQL and materializes the
//! `trades` and `users` tables as in-memory [`Table`]s.
//!
//! Connectivity failure is reported as an explicit `Err(DbError)` — never
//! as empty datasets — so the caller can short-circuit the audit with a
//! clear "data unavailable" condition instead of running checks against
//! nothing.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tradeaudit_core::{AuditError, Table};

mod row;

pub use row::DecodeError;

/// The two fixed queries of an audit run.
const TRADES_QUERY: &str = "SELECT * FROM trades";
const USERS_QUERY: &str = "SELECT * FROM users";

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Dataset(#[from] AuditError),
}

/// Connection parameters, positional on the command line.
#[derive(Debug, Clone)]
pub struct ConnectParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub dbname: String,
}

impl ConnectParams {
    fn database_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.dbname
        )
    }
}

/// Create a connection pool. One audit run issues exactly two queries, so
/// the pool is kept small.
pub async fn create_pool(params: &ConnectParams) -> Result<PgPool, DbError> {
    PgPoolOptions::new()
        .max_connections(2)
        .connect(&params.database_url())
        .await
        .map_err(DbError::Connect)
}

/// The two datasets of an audit run, owned by that run.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub trades: Table,
    pub users: Table,
}

/// Fetch both tables in full. Full materialization is fine here; the store
/// is sized to fit in memory and the checks need random row access anyway.
pub async fn fetch_datasets(pool: &PgPool) -> Result<Datasets, DbError> {
    let trades = fetch_table(pool, TRADES_QUERY).await?;
    let users = fetch_table(pool, USERS_QUERY).await?;
    tracing::info!(
        trades = trades.row_count(),
        users = users.row_count(),
        "Data fetch succeeded"
    );
    Ok(Datasets { trades, users })
}

async fn fetch_table(pool: &PgPool, query: &str) -> Result<Table, DbError> {
    let rows = sqlx::query(query).fetch_all(pool).await?;
    tracing::debug!(query, rows = rows.len(), "Fetched table");

    // Zero-row results carry no column metadata; an empty table with no
    // columns is the contract for that case.
    let mut table = match rows.first() {
        Some(first) => Table::new(row::column_names(first)),
        None => Table::new(Vec::<String>::new()),
    };
    for pg_row in &rows {
        table.push_row(row::decode_row(pg_row)?)?;
    }
    Ok(table)
}
