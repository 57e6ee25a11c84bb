//! Dynamic `PgRow` → [`Value`] materialization.
//!
//! The audit fetches with `SELECT *`, so column order and types are only
//! known at runtime. Cells are decoded by the column's PostgreSQL type
//! name; a column of any type outside the supported set is a fatal
//! schema/type error for the run.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Row, TypeInfo};
use tradeaudit_core::Value;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("Unsupported column type {pg_type} in column '{column}'")]
    UnsupportedColumnType { column: String, pg_type: String },

    #[error("Failed to decode column '{column}': {source}")]
    Column {
        column: String,
        #[source]
        source: sqlx::Error,
    },
}

pub fn column_names(row: &PgRow) -> Vec<String> {
    row.columns().iter().map(|c| c.name().to_string()).collect()
}

pub fn decode_row(row: &PgRow) -> Result<Vec<Value>, DecodeError> {
    row.columns()
        .iter()
        .enumerate()
        .map(|(i, col)| decode_cell(row, i, col))
        .collect()
}

fn decode_cell(row: &PgRow, index: usize, col: &PgColumn) -> Result<Value, DecodeError> {
    let wrap = |source| DecodeError::Column {
        column: col.name().to_string(),
        source,
    };

    let cell = match col.type_info().name() {
        "INT2" => row
            .try_get::<Option<i16>, _>(index)
            .map_err(wrap)?
            .map(|v| Value::Int(v.into())),
        "INT4" => row
            .try_get::<Option<i32>, _>(index)
            .map_err(wrap)?
            .map(|v| Value::Int(v.into())),
        "INT8" => row
            .try_get::<Option<i64>, _>(index)
            .map_err(wrap)?
            .map(Value::Int),
        "FLOAT4" => row
            .try_get::<Option<f32>, _>(index)
            .map_err(wrap)?
            .map(|v| Value::Float(v.into())),
        "FLOAT8" => row
            .try_get::<Option<f64>, _>(index)
            .map_err(wrap)?
            .map(Value::Float),
        // Lossy on purpose: the checks compare and stringify, they do not
        // do arithmetic that needs exact decimals.
        "NUMERIC" => row
            .try_get::<Option<Decimal>, _>(index)
            .map_err(wrap)?
            .map(|d| Value::Float(d.to_f64().unwrap_or(f64::NAN))),
        "BOOL" => row
            .try_get::<Option<bool>, _>(index)
            .map_err(wrap)?
            .map(Value::Bool),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" => row
            .try_get::<Option<String>, _>(index)
            .map_err(wrap)?
            .map(Value::Text),
        // Naive timestamps are assumed UTC, matching how the store writes
        // them.
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)
            .map_err(wrap)?
            .map(|t| Value::Timestamp(t.and_utc())),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)
            .map_err(wrap)?
            .map(Value::Timestamp),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)
            .map_err(wrap)?
            .map(|d| Value::Timestamp(d.and_time(NaiveTime::MIN).and_utc())),
        other => {
            return Err(DecodeError::UnsupportedColumnType {
                column: col.name().to_string(),
                pg_type: other.to_string(),
            })
        }
    };

    Ok(cell.unwrap_or(Value::Null))
}
