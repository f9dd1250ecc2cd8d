use serde::{Deserialize, Serialize};

// ============================================================================
// Error Taxonomy
// ============================================================================
//
// StoreError      - failures raised by the key-value store adapter
// InventoryError  - outcome of a validated inventory lookup
// StructuredError - numeric code + detail, as carried across service calls
// ServiceError    - what the gateway sees from either collaborator
//
// ============================================================================

pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const INTERNAL_SERVER_ERROR: u16 = 500;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("stock counter missing at {0}")]
    MissingCounter(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("{0}")]
    BadRequest(String),

    #[error("No such SKU: {sku}")]
    NotFound { sku: String },

    #[error("{message}")]
    Internal { sku: String, message: String },
}

impl InventoryError {
    pub fn internal(sku: &str, context: &str, source: impl std::fmt::Display) -> Self {
        Self::Internal {
            sku: sku.to_string(),
            message: format!("{context}: {source}"),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            InventoryError::BadRequest(_) => BAD_REQUEST,
            InventoryError::NotFound { .. } => NOT_FOUND,
            InventoryError::Internal { .. } => INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error value with a numeric status code and human-readable detail.
///
/// Serialized as `{"id", "code", "detail", "status"}` so that a remote
/// service can embed it in a transport error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{detail}")]
pub struct StructuredError {
    #[serde(default)]
    pub id: String,
    pub code: u16,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub status: String,
}

impl StructuredError {
    pub fn new(id: impl Into<String>, code: u16, detail: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code,
            detail: detail.into(),
            status: status_text(code).to_string(),
        }
    }

    /// Parses a structured error out of an opaque error message.
    ///
    /// Returns `None` when the message is not a JSON structured error or
    /// carries no usable code.
    pub fn parse(message: &str) -> Option<Self> {
        serde_json::from_str::<Self>(message)
            .ok()
            .filter(|e| e.code != 0)
    }
}

fn status_text(code: u16) -> &'static str {
    match code {
        BAD_REQUEST => "Bad Request",
        NOT_FOUND => "Not Found",
        INTERNAL_SERVER_ERROR => "Internal Server Error",
        _ => "",
    }
}

impl From<InventoryError> for StructuredError {
    fn from(err: InventoryError) -> Self {
        let code = err.code();
        let id = match &err {
            InventoryError::BadRequest(_) => String::new(),
            InventoryError::NotFound { sku } | InventoryError::Internal { sku, .. } => sku.clone(),
        };
        StructuredError::new(id, code, err.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Structured(#[from] StructuredError),

    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl ServiceError {
    /// Transport status for this error; unclassified errors map to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Structured(e) => e.code,
            ServiceError::Unclassified(_) => INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<InventoryError> for ServiceError {
    fn from(err: InventoryError) -> Self {
        ServiceError::Structured(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_error_codes() {
        assert_eq!(InventoryError::BadRequest("Invalid SKU".into()).code(), 400);
        assert_eq!(InventoryError::NotFound { sku: "123456".into() }.code(), 404);
        assert_eq!(InventoryError::internal("123456", "boom", "io").code(), 500);
    }

    #[test]
    fn test_not_found_keeps_sku_context() {
        let err: StructuredError = InventoryError::NotFound { sku: "nevergonnahappen".into() }.into();

        assert_eq!(err.id, "nevergonnahappen");
        assert_eq!(err.code, 404);
        assert_eq!(err.status, "Not Found");
        assert!(err.detail.contains("nevergonnahappen"));
    }

    #[test]
    fn test_parse_structured_error() {
        let raw = r#"{"id":"catalog","code":404,"detail":"No such product","status":"Not Found"}"#;
        let err = StructuredError::parse(raw).unwrap();

        assert_eq!(err.code, 404);
        assert_eq!(err.detail, "No such product");
    }

    #[test]
    fn test_parse_rejects_opaque_messages() {
        assert!(StructuredError::parse("connection refused").is_none());
        assert!(StructuredError::parse(r#"{"code":0,"detail":"zero"}"#).is_none());
    }

    #[test]
    fn test_unclassified_maps_to_internal_error() {
        let err = ServiceError::Unclassified(anyhow::anyhow!("socket closed"));
        assert_eq!(err.status_code(), 500);

        let err = ServiceError::from(StructuredError::new("", 503, "unavailable"));
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.to_string(), "unavailable");
    }
}
