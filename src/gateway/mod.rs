use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::catalog::CatalogClient;
use crate::error::ServiceError;
use crate::inventory::InventoryClient;
use crate::models::ComposedProductDetails;

// ============================================================================
// Product Gateway - fan-out / asymmetric join
// ============================================================================
//
// Each request spawns the catalog call and the inventory call as independent
// tasks the moment it arrives. The join is asymmetric:
//
//   1. await catalog  -> on failure, return it immediately
//   2. await inventory -> on failure, return it as-is
//   3. compose
//
// When step 1 fails the inventory handle is dropped. Dropping a JoinHandle
// detaches the task rather than aborting it, so the inventory call runs to
// completion and its result is discarded.
//
// ============================================================================

#[derive(Clone)]
pub struct ProductGateway {
    catalog: Arc<dyn CatalogClient>,
    inventory: Arc<dyn InventoryClient>,
}

impl ProductGateway {
    pub fn new(catalog: Arc<dyn CatalogClient>, inventory: Arc<dyn InventoryClient>) -> Self {
        Self { catalog, inventory }
    }

    pub async fn get_product_details(&self, sku: &str) -> Result<ComposedProductDetails, ServiceError> {
        let request_id = Uuid::new_v4();
        tracing::info!(request_id = %request_id, sku = %sku, "Received request for product details");

        let catalog_task = {
            let catalog = self.catalog.clone();
            let sku = sku.to_string();
            tokio::spawn(async move { catalog.product_details(&sku).await })
        };
        let inventory_task = {
            let inventory = self.inventory.clone();
            let sku = sku.to_string();
            tokio::spawn(async move { inventory.inventory_details(&sku).await })
        };

        let product = match join_branch(catalog_task).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(request_id = %request_id, sku = %sku, error = %e, "Catalog lookup failed");
                return Err(e);
            }
        };

        let inventory = match join_branch(inventory_task).await {
            Ok(inventory) => inventory,
            Err(e) => {
                tracing::warn!(request_id = %request_id, sku = %sku, error = %e, "Inventory lookup failed");
                return Err(e);
            }
        };

        tracing::debug!(request_id = %request_id, sku = %sku, "Composed product details");
        Ok(ComposedProductDetails::compose(product, &inventory))
    }
}

async fn join_branch<T>(task: JoinHandle<Result<T, ServiceError>>) -> Result<T, ServiceError> {
    match task.await {
        Ok(result) => result,
        Err(e) => Err(ServiceError::Unclassified(anyhow::anyhow!("backend task failed: {e}"))),
    }
}
