// ============================================================================
// Messaging
// ============================================================================
//
// Subscription adapter feeding shipment events from the broker into the
// inventory service's in-process channel.
//
// ============================================================================

mod shipments;

pub use shipments::ShipmentSubscriber;
