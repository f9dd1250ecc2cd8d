// Private module declaration
mod endpoint;

use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

// Re-export for public API
pub use endpoint::metrics_handler;

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Product detail aggregation (outcome by status code, latency)
// - Inventory lookups (outcome)
// - Shipment event consumption and swallowed decrement failures
//
// All metrics are registered with Prometheus and can be scraped via /metrics
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Aggregation Metrics
    pub product_detail_requests: IntCounterVec,
    pub product_detail_duration: HistogramVec,

    // Inventory Lookup Metrics
    pub inventory_lookups: IntCounterVec,

    // Shipment Consumer Metrics
    pub shipment_events_consumed: IntCounter,
    pub shipment_events_rejected: IntCounter,
    pub decrement_failures: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let product_detail_requests = IntCounterVec::new(
            Opts::new("product_detail_requests_total", "Product detail requests by response status"),
            &["status"],
        )?;
        registry.register(Box::new(product_detail_requests.clone()))?;

        let product_detail_duration = HistogramVec::new(
            HistogramOpts::new("product_detail_duration_seconds", "Product detail aggregation duration")
                .buckets(vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
            &["status"],
        )?;
        registry.register(Box::new(product_detail_duration.clone()))?;

        let inventory_lookups = IntCounterVec::new(
            Opts::new("inventory_lookups_total", "Inventory lookups by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(inventory_lookups.clone()))?;

        let shipment_events_consumed = IntCounter::new(
            "shipment_events_consumed_total",
            "Shipment events drained from the event channel",
        )?;
        registry.register(Box::new(shipment_events_consumed.clone()))?;

        let shipment_events_rejected = IntCounter::new(
            "shipment_events_rejected_total",
            "Shipment messages dropped because the payload could not be decoded",
        )?;
        registry.register(Box::new(shipment_events_rejected.clone()))?;

        let decrement_failures = IntCounter::new(
            "inventory_decrement_failures_total",
            "Stock decrements that failed and were not retried",
        )?;
        registry.register(Box::new(decrement_failures.clone()))?;

        Ok(Self {
            registry,
            product_detail_requests,
            product_detail_duration,
            inventory_lookups,
            shipment_events_consumed,
            shipment_events_rejected,
            decrement_failures,
        })
    }

    /// Get the Prometheus registry for exposing metrics via HTTP
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn record_product_detail(&self, status: u16, duration_secs: f64) {
        let status = status.to_string();
        self.product_detail_requests.with_label_values(&[status.as_str()]).inc();
        self.product_detail_duration
            .with_label_values(&[status.as_str()])
            .observe(duration_secs);
    }

    pub fn record_inventory_lookup(&self, outcome: &str) {
        self.inventory_lookups.with_label_values(&[outcome]).inc();
    }

    pub fn record_shipment_consumed(&self, decremented: bool) {
        self.shipment_events_consumed.inc();
        if !decremented {
            self.decrement_failures.inc();
        }
    }

    pub fn record_shipment_rejected(&self) {
        self.shipment_events_rejected.inc();
    }
}
