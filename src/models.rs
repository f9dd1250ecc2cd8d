use serde::{Deserialize, Serialize};

/// Minimum length of a SKU accepted by any inventory operation.
pub const MIN_SKU_LEN: usize = 6;

// ============================================================================
// Catalog Models
// ============================================================================

/// Descriptive and pricing fields owned by the catalog service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CatalogProduct {
    pub sku: String,
    pub manufacturer: String,
    pub model: String,
    /// Price in minor currency units (cents).
    pub price: u32,
    pub name: String,
    pub description: String,
}

// ============================================================================
// Inventory Models
// ============================================================================

/// Descriptive record kept in the `store:<sku>` hash.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InventoryRecord {
    pub sku: String,
    pub manufacturer: String,
    pub model_number: String,
}

/// Result of a validated inventory lookup: the record merged with its counter.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct InventoryDetails {
    pub sku: String,
    pub manufacturer: String,
    pub model_number: String,
    pub stock_remaining: i64,
}

impl InventoryDetails {
    pub fn from_parts(record: InventoryRecord, stock_remaining: i64) -> Self {
        Self {
            sku: record.sku,
            manufacturer: record.manufacturer,
            model_number: record.model_number,
            stock_remaining,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DetailsRequest {
    pub sku: String,
}

impl DetailsRequest {
    pub fn new(sku: impl Into<String>) -> Self {
        Self { sku: sku.into() }
    }
}

// ============================================================================
// Shipment Events
// Published by the shipping service, consumed once by the inventory consumer
// ============================================================================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingMethod {
    Ups,
    Fedex,
    Usps,
    Dhl,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ShipmentEvent {
    pub sku: String,
    pub shipping_method: ShippingMethod,
    pub tracking_number: String,
}

// ============================================================================
// Aggregated Response
// ============================================================================

/// Customer-facing product view composed from the catalog and inventory.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ComposedProductDetails {
    pub sku: String,
    pub stock_remaining: i64,
    pub manufacturer: String,
    pub price: u32,
    pub model: String,
    pub name: String,
    pub description: String,
}

impl ComposedProductDetails {
    /// Identity and descriptive fields come from the catalog; only the stock
    /// count is taken from the inventory.
    pub fn compose(product: CatalogProduct, inventory: &InventoryDetails) -> Self {
        Self {
            sku: product.sku,
            stock_remaining: inventory.stock_remaining,
            manufacturer: product.manufacturer,
            price: product.price,
            model: product.model,
            name: product.name,
            description: product.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipment_event_wire_format() {
        let json = r#"{"sku":"111111","shipping_method":"FEDEX","tracking_number":"abc1233"}"#;
        let event: ShipmentEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.sku, "111111");
        assert_eq!(event.shipping_method, ShippingMethod::Fedex);
        assert_eq!(event.tracking_number, "abc1233");
    }

    #[test]
    fn test_unknown_shipping_method_rejected() {
        let json = r#"{"sku":"111111","shipping_method":"PIGEON","tracking_number":"x"}"#;
        assert!(serde_json::from_str::<ShipmentEvent>(json).is_err());
    }

    #[test]
    fn test_compose_takes_stock_from_inventory_only() {
        let product = CatalogProduct {
            sku: "111111".to_string(),
            manufacturer: "TOSHIBA".to_string(),
            model: "T-1000".to_string(),
            price: 129_999,
            name: "Laptop".to_string(),
            description: "A portable computer".to_string(),
        };
        let inventory = InventoryDetails {
            sku: "ignored".to_string(),
            manufacturer: "ignored".to_string(),
            model_number: "ignored".to_string(),
            stock_remaining: 42,
        };

        let composed = ComposedProductDetails::compose(product, &inventory);

        assert_eq!(composed.sku, "111111");
        assert_eq!(composed.manufacturer, "TOSHIBA");
        assert_eq!(composed.model, "T-1000");
        assert_eq!(composed.price, 129_999);
        assert_eq!(composed.name, "Laptop");
        assert_eq!(composed.description, "A portable computer");
        assert_eq!(composed.stock_remaining, 42);
    }
}
