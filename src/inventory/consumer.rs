use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::{JoinError, JoinHandle};

use crate::metrics::Metrics;
use crate::models::ShipmentEvent;
use crate::store::InventoryStore;

// ============================================================================
// Shipment Consumer
// ============================================================================
//
// One long-lived task per inventory service. Events are handled strictly one
// at a time in arrival order, each producing exactly one atomic decrement.
//
// A failed decrement is logged and counted, then dropped: no retry, no
// requeue, no caller to report to. The stock counter can therefore drift
// from the shipment history when the store is unavailable.
//
// ============================================================================

/// Handle to the running shipment consumer.
pub struct ShipmentConsumerHandle {
    task: JoinHandle<()>,
}

impl ShipmentConsumerHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits until the shipment channel closes and the consumer exits.
    pub async fn join(self) -> Result<(), JoinError> {
        self.task.await
    }
}

pub(super) fn spawn(
    store: Arc<dyn InventoryStore>,
    shipments: UnboundedReceiver<ShipmentEvent>,
    metrics: Arc<Metrics>,
) -> ShipmentConsumerHandle {
    let task = tokio::spawn(consume_shipments(store, shipments, metrics));
    ShipmentConsumerHandle { task }
}

async fn consume_shipments(
    store: Arc<dyn InventoryStore>,
    mut shipments: UnboundedReceiver<ShipmentEvent>,
    metrics: Arc<Metrics>,
) {
    tracing::info!("Shipment consumer started");

    while let Some(event) = shipments.recv().await {
        tracing::info!(
            sku = %event.sku,
            shipping_method = ?event.shipping_method,
            tracking_number = %event.tracking_number,
            "Received item shipped event"
        );

        match store.decrement_stock(&event.sku).await {
            Ok(remaining) => {
                tracing::debug!(sku = %event.sku, remaining = remaining, "Stock decremented");
                metrics.record_shipment_consumed(true);
            }
            Err(e) => {
                tracing::warn!(
                    sku = %event.sku,
                    tracking_number = %event.tracking_number,
                    error = %e,
                    "Stock decrement failed, shipment event dropped"
                );
                metrics.record_shipment_consumed(false);
            }
        }
    }

    tracing::info!("Shipment channel closed, consumer exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::fakes::{FakeStore, StoreOp, KNOWN_SKU};
    use crate::inventory::InventoryService;
    use crate::models::ShippingMethod;
    use tokio::sync::mpsc;

    fn shipped(sku: &str, tracking_number: &str) -> ShipmentEvent {
        ShipmentEvent {
            sku: sku.to_string(),
            shipping_method: ShippingMethod::Fedex,
            tracking_number: tracking_number.to_string(),
        }
    }

    #[tokio::test]
    async fn test_shipment_decrements_its_sku_once() {
        let (store, mut decrements) = FakeStore::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let metrics = Arc::new(Metrics::new().unwrap());
        let (_svc, handle) = InventoryService::new(Arc::new(store), rx, metrics.clone());

        tx.send(shipped(KNOWN_SKU, "abc1233")).unwrap();
        assert_eq!(decrements.recv().await.unwrap(), KNOWN_SKU);

        drop(tx);
        handle.join().await.unwrap();

        assert!(decrements.try_recv().is_err());
        assert_eq!(metrics.shipment_events_consumed.get(), 1);
    }

    #[tokio::test]
    async fn test_shipments_processed_in_arrival_order() {
        let (store, mut decrements) = FakeStore::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let metrics = Arc::new(Metrics::new().unwrap());
        let (_svc, handle) = InventoryService::new(Arc::new(store), rx, metrics);

        for sku in ["111111", "222222", "111111", "333333"] {
            tx.send(shipped(sku, "trk")).unwrap();
        }
        drop(tx);
        handle.join().await.unwrap();

        let mut seen = Vec::new();
        while let Ok(sku) = decrements.try_recv() {
            seen.push(sku);
        }
        assert_eq!(seen, vec!["111111", "222222", "111111", "333333"]);
    }

    #[tokio::test]
    async fn test_failed_decrement_is_swallowed() {
        let (store, mut decrements) = FakeStore::new();
        store.fail_on(StoreOp::Decrement);
        let (tx, rx) = mpsc::unbounded_channel();
        let metrics = Arc::new(Metrics::new().unwrap());
        let (_svc, handle) = InventoryService::new(Arc::new(store), rx, metrics.clone());

        tx.send(shipped(KNOWN_SKU, "first")).unwrap();
        tx.send(shipped(KNOWN_SKU, "second")).unwrap();

        assert_eq!(decrements.recv().await.unwrap(), KNOWN_SKU);
        assert_eq!(decrements.recv().await.unwrap(), KNOWN_SKU);
        assert!(!handle.is_finished());

        drop(tx);
        handle.join().await.unwrap();

        // One attempt per event, nothing retried.
        assert!(decrements.try_recv().is_err());
        assert_eq!(metrics.decrement_failures.get(), 2);
    }

    #[tokio::test]
    async fn test_consumer_exits_when_channel_closes() {
        let (store, _decrements) = FakeStore::new();
        let (tx, rx) = mpsc::unbounded_channel::<ShipmentEvent>();
        let metrics = Arc::new(Metrics::new().unwrap());
        let (_svc, handle) = InventoryService::new(Arc::new(store), rx, metrics);

        drop(tx);

        assert!(handle.join().await.is_ok());
    }
}
