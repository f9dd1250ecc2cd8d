// ============================================================================
// Inventory Module
// ============================================================================
//
// Owns per-SKU records and stock counters. Two independent paths touch the
// store:
// - service.rs  - synchronous, validated lookup (record + counter)
// - consumer.rs - single background task decrementing stock on shipments
//
// The paths share no in-process state; reads and decrements are not
// synchronized beyond the store's own atomic INCRBY.
//
// ============================================================================

mod consumer;
mod service;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::models::InventoryDetails;

pub use consumer::ShipmentConsumerHandle;
pub use service::InventoryService;

/// Inventory lookup as seen by callers that only need the stock view.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    async fn inventory_details(&self, sku: &str) -> Result<InventoryDetails, ServiceError>;
}
