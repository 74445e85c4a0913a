//! Order identifier type
//!
//! Ids are opaque string tokens. Clients may supply their own; when they
//! don't, the engine generates a UUID v7 string, which sorts by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an order
///
/// Never empty. Use [`OrderId::parse`] for client-supplied values so that the
/// empty sentinel is mapped to "absent" rather than to a real id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Create a new OrderId from a fresh UUID v7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Parse a client-supplied id, returning None for an empty/blank value
    pub fn parse(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Get the id string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for OrderId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for OrderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_creation() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2, "OrderIds should be unique");
        assert!(Uuid::parse_str(id1.as_str()).is_ok());
    }

    #[test]
    fn test_order_id_parse() {
        assert_eq!(OrderId::parse("abc").unwrap().as_str(), "abc");
        assert_eq!(OrderId::parse("  abc ").unwrap().as_str(), "abc");
        assert!(OrderId::parse("").is_none());
        assert!(OrderId::parse("   ").is_none());
    }

    #[test]
    fn test_order_id_serialization() {
        let id = OrderId::parse("order-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"order-1\"");

        let deserialized: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
