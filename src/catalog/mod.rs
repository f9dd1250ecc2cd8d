// ============================================================================
// Catalog Module
// ============================================================================
//
// The catalog service is an external collaborator owning descriptive and
// pricing data. The gateway only depends on `CatalogClient`; `grpc.rs` holds
// the typed stub used against the real service.
//
// ============================================================================

mod grpc;

use async_trait::async_trait;

use crate::error::ServiceError;
use crate::models::CatalogProduct;

pub use grpc::GrpcCatalogClient;

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn product_details(&self, sku: &str) -> Result<CatalogProduct, ServiceError>;
}
