use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod catalog;
mod config;
mod error;
mod gateway;
mod inventory;
mod messaging;
mod metrics;
mod models;
mod store;

use catalog::GrpcCatalogClient;
use config::Config;
use gateway::ProductGateway;
use inventory::{InventoryService, ShipmentConsumerHandle};
use messaging::ShipmentSubscriber;
use store::RedisInventoryStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging; override with RUST_LOG, e.g. RUST_LOG=debug
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,product_aggregator=debug")),
        )
        .init();

    let config = Config::from_env();
    tracing::info!(?config, "🚀 Starting product aggregator");

    let metrics = Arc::new(metrics::Metrics::new()?);

    // === 1. Inventory store (a fresh Redis connection per operation) ===
    let store = Arc::new(RedisInventoryStore::new(&config.redis_url)?);

    // === 2. Shipment events: Kafka -> channel -> inventory consumer ===
    let (shipments_tx, shipments_rx) = mpsc::unbounded_channel();
    let subscriber = ShipmentSubscriber::new(
        &config.shipments.brokers,
        &config.shipments.consumer_group,
        &config.shipments.topic,
    )?
    .spawn(shipments_tx, metrics.clone());

    let (inventory, consumer): (InventoryService, ShipmentConsumerHandle) =
        InventoryService::new(store, shipments_rx, metrics.clone());

    // === 3. Gateway over catalog + inventory ===
    let catalog = Arc::new(GrpcCatalogClient::connect_lazy(&config.catalog_endpoint)?);
    let gateway = ProductGateway::new(catalog, Arc::new(inventory.clone()));

    api::start_http_server(
        &config.http.host,
        config.http.port,
        gateway,
        inventory,
        metrics,
    )
    .await?;

    // Closing the subscriber drops the channel sender and lets the consumer drain.
    tracing::info!("HTTP server stopped, shutting down shipment consumer");
    subscriber.abort();
    if !consumer.is_finished() {
        tracing::info!("Waiting for shipment consumer to drain");
    }
    consumer.join().await?;

    tracing::info!("👋 Shutdown complete");
    Ok(())
}
