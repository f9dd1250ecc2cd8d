use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use super::routes;
use crate::gateway::ProductGateway;
use crate::inventory::InventoryService;
use crate::metrics::Metrics;

/// Serve the product, inventory and metrics routes until shutdown.
pub async fn start_http_server(
    host: &str,
    port: u16,
    gateway: ProductGateway,
    inventory: InventoryService,
    metrics: Arc<Metrics>,
) -> std::io::Result<()> {
    tracing::info!("🌐 Starting HTTP server on http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(inventory.clone()))
            .app_data(web::Data::new(metrics.clone()))
            .configure(routes)
    })
    .bind((host, port))?
    .run()
    .await
}
