// ABOUTME: Column decoding shared by the catalog records
// ABOUTME: Prices stored as decimal text and list columns stored as JSON text

use std::str::FromStr;

use atelier_storage::{list_codec, SqlValue, StorageError, StorageResult};
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

pub(crate) fn price(row: &SqliteRow, column: &str) -> StorageResult<Decimal> {
    let raw: String = row.try_get(column).map_err(StorageError::Sqlx)?;
    Decimal::from_str(&raw)
        .map_err(|e| StorageError::Decode(format!("{} '{}': {}", column, raw, e)))
}

pub(crate) fn price_value(price: Decimal) -> SqlValue {
    SqlValue::Text(price.to_string())
}

pub(crate) fn list(row: &SqliteRow, column: &str) -> StorageResult<Vec<String>> {
    let raw: Option<String> = row.try_get(column).map_err(StorageError::Sqlx)?;
    Ok(list_codec::decode(raw))
}
