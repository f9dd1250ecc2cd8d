use std::sync::Arc;

use anyhow::Result;
use futures_util::StreamExt;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::metrics::Metrics;
use crate::models::ShipmentEvent;

/// Kafka subscription for item-shipped events.
///
/// Decoded events are forwarded in partition order to an unbounded channel.
/// Offsets are auto-committed; there is no acknowledgement from the
/// inventory consumer and no redelivery of events it failed to apply.
pub struct ShipmentSubscriber {
    consumer: StreamConsumer,
    topic: String,
}

impl ShipmentSubscriber {
    pub fn new(brokers: &str, group_id: &str, topic: &str) -> Result<Self> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "true")
            .set("auto.offset.reset", "latest")
            .set("session.timeout.ms", "6000")
            .set("enable.partition.eof", "false")
            .create()
            .map_err(|e| anyhow::anyhow!("Failed to create shipment consumer: {}", e))?;

        consumer
            .subscribe(&[topic])
            .map_err(|e| anyhow::anyhow!("Failed to subscribe to {}: {}", topic, e))?;

        tracing::info!(topic = %topic, consumer_group = %group_id, "Subscribed to shipment events");

        Ok(Self {
            consumer,
            topic: topic.to_string(),
        })
    }

    /// Starts forwarding events. The task ends when the receiving side of
    /// `events` is dropped, or when aborted through the returned handle.
    pub fn spawn(self, events: UnboundedSender<ShipmentEvent>, metrics: Arc<Metrics>) -> JoinHandle<()> {
        tokio::spawn(self.forward(events, metrics))
    }

    async fn forward(self, events: UnboundedSender<ShipmentEvent>, metrics: Arc<Metrics>) {
        let mut stream = self.consumer.stream();

        while let Some(next) = stream.next().await {
            let message = match next {
                Ok(message) => message,
                Err(e) => {
                    tracing::warn!(topic = %self.topic, error = %e, "Failed to receive shipment message");
                    continue;
                }
            };

            let event = match decode_shipment(message.payload()) {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(
                        topic = %self.topic,
                        partition = message.partition(),
                        offset = message.offset(),
                        error = %e,
                        "Dropping undecodable shipment message"
                    );
                    metrics.record_shipment_rejected();
                    continue;
                }
            };

            tracing::trace!(
                partition = message.partition(),
                offset = message.offset(),
                sku = %event.sku,
                "Forwarding shipment event"
            );

            if events.send(event).is_err() {
                tracing::debug!("Shipment channel receiver dropped, stopping subscriber");
                break;
            }
        }
    }
}

fn decode_shipment(payload: Option<&[u8]>) -> Result<ShipmentEvent> {
    let payload = payload.ok_or_else(|| anyhow::anyhow!("message has no payload"))?;
    let event = serde_json::from_slice(payload)?;
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShippingMethod;

    #[test]
    fn test_decode_valid_payload() {
        let payload = br#"{"sku":"111111","shipping_method":"UPS","tracking_number":"1Z999"}"#;

        let event = decode_shipment(Some(payload)).unwrap();

        assert_eq!(event.sku, "111111");
        assert_eq!(event.shipping_method, ShippingMethod::Ups);
        assert_eq!(event.tracking_number, "1Z999");
    }

    #[test]
    fn test_decode_rejects_missing_payload() {
        assert!(decode_shipment(None).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode_shipment(Some(b"not json")).is_err());
        assert!(decode_shipment(Some(br#"{"sku":"111111"}"#)).is_err());
    }
}
