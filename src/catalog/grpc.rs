use async_trait::async_trait;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};
use tonic::{Request, Status};
use tonic_prost::ProstCodec;

use super::CatalogClient;
use crate::error::{ServiceError, StructuredError};
use crate::models::CatalogProduct;

const GET_PRODUCT_DETAILS: &str = "/catalog.Catalog/GetProductDetails";

// ============================================================================
// Wire Messages (package catalog)
// ============================================================================

#[derive(Clone, PartialEq, prost::Message)]
pub struct DetailRequest {
    #[prost(string, tag = "1")]
    pub sku: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Product {
    #[prost(string, tag = "1")]
    pub sku: String,
    #[prost(string, tag = "2")]
    pub manufacturer: String,
    #[prost(string, tag = "3")]
    pub model: String,
    #[prost(uint32, tag = "4")]
    pub price: u32,
    #[prost(string, tag = "5")]
    pub name: String,
    #[prost(string, tag = "6")]
    pub description: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct DetailResponse {
    #[prost(message, optional, tag = "1")]
    pub product: Option<Product>,
}

impl From<Product> for CatalogProduct {
    fn from(p: Product) -> Self {
        Self {
            sku: p.sku,
            manufacturer: p.manufacturer,
            model: p.model,
            price: p.price,
            name: p.name,
            description: p.description,
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// gRPC stub for the catalog service.
///
/// The channel is created lazily and no deadline is attached to calls, so a
/// stalled catalog holds the calling task until it answers.
#[derive(Clone)]
pub struct GrpcCatalogClient {
    inner: Grpc<Channel>,
}

impl GrpcCatalogClient {
    pub fn connect_lazy(endpoint: &str) -> anyhow::Result<Self> {
        let channel = Endpoint::from_shared(endpoint.to_string())?.connect_lazy();
        Ok(Self {
            inner: Grpc::new(channel),
        })
    }

    async fn get_product_details(&self, sku: &str) -> Result<DetailResponse, Status> {
        let mut grpc = self.inner.clone();
        grpc.ready()
            .await
            .map_err(|e| Status::unknown(format!("Service was not ready: {e}")))?;

        let request = Request::new(DetailRequest {
            sku: sku.to_string(),
        });
        let path = PathAndQuery::from_static(GET_PRODUCT_DETAILS);
        let response = grpc.unary(request, path, ProstCodec::default()).await?;

        Ok(response.into_inner())
    }
}

#[async_trait]
impl CatalogClient for GrpcCatalogClient {
    async fn product_details(&self, sku: &str) -> Result<CatalogProduct, ServiceError> {
        let response = self.get_product_details(sku).await.map_err(classify_status)?;

        response
            .product
            .map(CatalogProduct::from)
            .ok_or_else(|| ServiceError::Unclassified(anyhow::anyhow!("catalog returned no product for {sku}")))
    }
}

/// A status whose message is a JSON structured error keeps its code; any
/// other failure is unclassified.
fn classify_status(status: Status) -> ServiceError {
    match StructuredError::parse(status.message()) {
        Some(structured) => ServiceError::Structured(structured),
        None => ServiceError::Unclassified(anyhow::anyhow!(
            "catalog call failed ({:?}): {}",
            status.code(),
            status.message()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_status_keeps_code() {
        let status = Status::not_found(
            r#"{"id":"go.shopping.srv.catalog","code":404,"detail":"No such product","status":"Not Found"}"#,
        );

        let err = classify_status(status);

        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "No such product");
    }

    #[test]
    fn test_opaque_status_is_unclassified() {
        let err = classify_status(Status::unavailable("connection refused"));

        assert!(matches!(err, ServiceError::Unclassified(_)));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_product_conversion() {
        let product = Product {
            sku: "111111".to_string(),
            manufacturer: "TOSHIBA".to_string(),
            model: "T-1000".to_string(),
            price: 4999,
            name: "Satellite".to_string(),
            description: "Laptop".to_string(),
        };

        let converted = CatalogProduct::from(product);

        assert_eq!(converted.sku, "111111");
        assert_eq!(converted.price, 4999);
        assert_eq!(converted.model, "T-1000");
    }

    #[tokio::test]
    async fn test_invalid_endpoint_rejected() {
        assert!(GrpcCatalogClient::connect_lazy("not a uri").is_err());
    }
}
