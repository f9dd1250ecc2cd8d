// ============================================================================
// HTTP API
// ============================================================================
//
// GET /products/{sku}   - aggregated product details (catalog + inventory)
// GET /inventory/{sku}  - validated inventory lookup
// GET /metrics          - Prometheus exposition
//
// ============================================================================

mod handlers;
mod server;

pub use handlers::routes;
pub use server::start_http_server;
