//! Runtime configuration loaded from environment variables with local
//! development defaults.

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpConfig,
    /// Redis connection URL for the inventory store
    pub redis_url: String,
    /// gRPC endpoint of the catalog service
    pub catalog_endpoint: String,
    pub shipments: ShipmentConfig,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
}

/// Kafka subscription feeding item-shipped events
#[derive(Debug, Clone)]
pub struct ShipmentConfig {
    /// Broker addresses (comma-separated)
    pub brokers: String,
    pub topic: String,
    pub consumer_group: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            http: HttpConfig {
                host: env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("HTTP_PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8080),
            },
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
            catalog_endpoint: env::var("CATALOG_ENDPOINT")
                .unwrap_or_else(|_| "http://127.0.0.1:50051".to_string()),
            shipments: ShipmentConfig {
                brokers: env::var("KAFKA_BROKERS").unwrap_or_else(|_| "127.0.0.1:9092".to_string()),
                topic: env::var("SHIPMENT_TOPIC").unwrap_or_else(|_| "item-shipped".to_string()),
                consumer_group: env::var("SHIPMENT_CONSUMER_GROUP")
                    .unwrap_or_else(|_| "inventory-service".to_string()),
            },
        }
    }
}
