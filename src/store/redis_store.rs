use std::collections::HashMap;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

use super::{record_key, stock_key, InventoryStore};
use crate::error::StoreError;
use crate::models::InventoryRecord;

const FIELD_SKU: &str = "sku";
const FIELD_MANUFACTURER: &str = "manufacturer";
const FIELD_MODEL: &str = "model";

/// Redis-backed inventory store.
///
/// Every operation dials its own connection and drops it before returning,
/// on success and error paths alike. Nothing is pooled or shared between
/// calls.
pub struct RedisInventoryStore {
    client: Client,
}

impl RedisInventoryStore {
    pub fn new(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url)?;
        Ok(Self { client })
    }

    async fn connect(&self) -> Result<MultiplexedConnection, StoreError> {
        let conn = self.client.get_multiplexed_async_connection().await?;
        Ok(conn)
    }
}

#[async_trait]
impl InventoryStore for RedisInventoryStore {
    async fn sku_exists(&self, sku: &str) -> Result<bool, StoreError> {
        let mut conn = self.connect().await?;
        let exists: bool = conn.exists(record_key(sku)).await?;
        Ok(exists)
    }

    async fn fetch_record(&self, sku: &str) -> Result<InventoryRecord, StoreError> {
        let mut conn = self.connect().await?;
        let fields: HashMap<String, String> = conn.hgetall(record_key(sku)).await?;
        Ok(record_from_fields(sku, fields))
    }

    async fn fetch_stock(&self, sku: &str) -> Result<i64, StoreError> {
        let key = stock_key(sku);
        let mut conn = self.connect().await?;
        let stock: Option<i64> = conn.get(&key).await?;
        stock.ok_or(StoreError::MissingCounter(key))
    }

    async fn decrement_stock(&self, sku: &str) -> Result<i64, StoreError> {
        let mut conn = self.connect().await?;
        // INCRBY -1 keeps the update atomic on the server.
        let remaining: i64 = conn.incr(stock_key(sku), -1i64).await?;

        tracing::debug!(sku = %sku, remaining = remaining, "Decremented stock counter");

        Ok(remaining)
    }
}

/// Absent hash fields read as empty strings; a missing `sku` field falls back
/// to the SKU that was asked for.
fn record_from_fields(sku: &str, mut fields: HashMap<String, String>) -> InventoryRecord {
    InventoryRecord {
        sku: fields.remove(FIELD_SKU).unwrap_or_else(|| sku.to_string()),
        manufacturer: fields.remove(FIELD_MANUFACTURER).unwrap_or_default(),
        model_number: fields.remove(FIELD_MODEL).unwrap_or_default(),
    }
}
