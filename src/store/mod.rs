// ============================================================================
// Store Module
// ============================================================================
//
// Capability interface over the key-value store that owns inventory state,
// plus the Redis adapter used in production. Services depend on the trait so
// tests can substitute an in-memory double.
//
// Key layout:
// - store:<sku>        hash {sku, manufacturer, model}
// - store:<sku>:stock  integer counter
//
// ============================================================================

mod redis_store;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::InventoryRecord;

pub use redis_store::RedisInventoryStore;

pub fn record_key(sku: &str) -> String {
    format!("store:{sku}")
}

pub fn stock_key(sku: &str) -> String {
    format!("store:{sku}:stock")
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Whether a record exists for the SKU, regardless of stock on hand.
    async fn sku_exists(&self, sku: &str) -> Result<bool, StoreError>;

    async fn fetch_record(&self, sku: &str) -> Result<InventoryRecord, StoreError>;

    async fn fetch_stock(&self, sku: &str) -> Result<i64, StoreError>;

    /// Atomically lowers the stock counter by one and returns the new value.
    /// No lower bound is enforced.
    async fn decrement_stock(&self, sku: &str) -> Result<i64, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        assert_eq!(record_key("111111"), "store:111111");
        assert_eq!(stock_key("111111"), "store:111111:stock");
    }
}
