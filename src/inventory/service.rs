use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;

use super::consumer::{self, ShipmentConsumerHandle};
use super::InventoryClient;
use crate::error::{InventoryError, ServiceError};
use crate::metrics::Metrics;
use crate::models::{DetailsRequest, InventoryDetails, ShipmentEvent, MIN_SKU_LEN};
use crate::store::InventoryStore;

// ============================================================================
// Inventory Service
// ============================================================================

#[derive(Clone)]
pub struct InventoryService {
    store: Arc<dyn InventoryStore>,
    metrics: Arc<Metrics>,
}

impl InventoryService {
    /// Builds the service and starts the shipment consumer draining
    /// `shipments`. The returned handle resolves once the channel closes.
    pub fn new(
        store: Arc<dyn InventoryStore>,
        shipments: UnboundedReceiver<ShipmentEvent>,
        metrics: Arc<Metrics>,
    ) -> (Self, ShipmentConsumerHandle) {
        let handle = consumer::spawn(store.clone(), shipments, metrics.clone());
        (Self { store, metrics }, handle)
    }

    /// Validated lookup of a SKU's record and remaining stock.
    ///
    /// Existence, record and counter are three separate store reads with no
    /// transaction around them; a concurrent decrement may land in between.
    pub async fn lookup_details(
        &self,
        request: Option<&DetailsRequest>,
    ) -> Result<InventoryDetails, InventoryError> {
        let result = self.lookup(request).await;

        let outcome = match &result {
            Ok(_) => "found",
            Err(InventoryError::BadRequest(_)) => "bad_request",
            Err(InventoryError::NotFound { .. }) => "not_found",
            Err(InventoryError::Internal { .. }) => "internal_error",
        };
        self.metrics.record_inventory_lookup(outcome);

        result
    }

    async fn lookup(&self, request: Option<&DetailsRequest>) -> Result<InventoryDetails, InventoryError> {
        let request = request
            .ok_or_else(|| InventoryError::BadRequest("Missing details request".to_string()))?;
        let sku = request.sku.as_str();

        if sku.chars().count() < MIN_SKU_LEN {
            return Err(InventoryError::BadRequest("Invalid SKU".to_string()));
        }

        let exists = self
            .store
            .sku_exists(sku)
            .await
            .map_err(|e| InventoryError::internal(sku, "Failed to check for SKU existence", e))?;
        if !exists {
            tracing::debug!(sku = %sku, "SKU not present in store");
            return Err(InventoryError::NotFound { sku: sku.to_string() });
        }

        let record = self
            .store
            .fetch_record(sku)
            .await
            .map_err(|e| InventoryError::internal(sku, "Failed to query store details", e))?;
        let stock = self
            .store
            .fetch_stock(sku)
            .await
            .map_err(|e| InventoryError::internal(sku, "Failed to query stock count", e))?;

        Ok(InventoryDetails::from_parts(record, stock))
    }
}

#[async_trait]
impl InventoryClient for InventoryService {
    async fn inventory_details(&self, sku: &str) -> Result<InventoryDetails, ServiceError> {
        let request = DetailsRequest::new(sku);
        self.lookup_details(Some(&request)).await.map_err(ServiceError::from)
    }
}
