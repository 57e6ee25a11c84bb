//! `tradeaudit` -- data-quality audit of the trading-records store.
//!
//! Fetches the `trades` and `users` tables and prints one report line per
//! integrity check. Exit code reflects process success only, never the
//! violation counts.
//!
//! # Usage
//!
//! ```text
//! tradeaudit <host> <port> <username> <password> <dbname>
//! ```

use tradeaudit_core::report;
use tradeaudit_db::ConnectParams;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fixed audit threshold: trades open for this many days or more are
/// flagged by the duration check. Not externally configurable.
const MAX_DAY_DIFFERENCE: i64 = 30;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tradeaudit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [host, port, username, password, dbname]: [String; 5] = match args.try_into() {
        Ok(args) => args,
        Err(_) => {
            tracing::error!("usage: tradeaudit <host> <port> <username> <password> <dbname>");
            std::process::exit(1);
        }
    };

    // A malformed port is just another way to fail to connect.
    let port: u16 = match port.parse() {
        Ok(port) => port,
        Err(_) => {
            tracing::error!(port = %port, "Port must be a number between 1 and 65535");
            println!("Data unavailable: invalid port '{port}'");
            std::process::exit(1);
        }
    };

    let params = ConnectParams {
        host,
        port,
        username,
        password,
        dbname,
    };

    let pool = match tradeaudit_db::create_pool(&params).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Database connection failed");
            println!("Data unavailable: {e}");
            std::process::exit(1);
        }
    };

    let datasets = match tradeaudit_db::fetch_datasets(&pool).await {
        Ok(datasets) => datasets,
        Err(e) => {
            tracing::error!(error = %e, "Data fetch failed");
            println!("Data unavailable: {e}");
            std::process::exit(1);
        }
    };

    // Schema/type errors inside a check are fatal; no partial report.
    let report = report::run_audit(&datasets.trades, &datasets.users, MAX_DAY_DIFFERENCE)?;
    println!("{report}");

    Ok(())
}
