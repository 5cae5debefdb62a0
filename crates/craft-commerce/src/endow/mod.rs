//! Bundled-gift ("endow") sets attached to a variant.
//!
//! An endow set mixes free-text gift entries with weak references to
//! externally-owned product customs. Referenced products are looked up,
//! never owned; their lifetime is independent of the referencing set.

mod authoring;

pub use authoring::{EndowDraft, EndowMutation};

use crate::error::CustomizationError;
use crate::ids::{EndowId, ProductCustomId};
use serde::{Deserialize, Serialize};

/// A free-text gift entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndowEntry {
    /// Unique entry identifier.
    pub id: EndowId,
    /// Display text (e.g., "Handwritten card").
    pub content: String,
    /// Whether the entry is currently offered.
    pub is_active: bool,
    /// Display order.
    pub priority: i32,
}

impl EndowEntry {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            id: EndowId::generate(),
            content: content.into(),
            is_active: true,
            priority: 0,
        }
    }
}

/// A bundled reference to an externally-cataloged product custom.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndowCustomProduct {
    /// Unique entry identifier.
    pub id: EndowId,
    /// The referenced product custom. Weak reference, resolved by id.
    pub product_custom_id: ProductCustomId,
    /// How many units are bundled. At least 1.
    pub quantity: i64,
    /// Whether the entry is currently offered.
    pub is_active: bool,
    /// Display order.
    pub priority: i32,
}

impl EndowCustomProduct {
    /// Create a reference with a quantity clamped to at least 1.
    pub fn new(product_custom_id: ProductCustomId, quantity: i64) -> Self {
        Self {
            id: EndowId::generate(),
            product_custom_id,
            quantity: quantity.max(1),
            is_active: true,
            priority: 0,
        }
    }
}

/// A bundled-gift set attached to a variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EndowSystem {
    /// Free-text gift entries, in display order.
    #[serde(default, rename = "items")]
    pub endows: Vec<EndowEntry>,
    /// Bundled product-custom references.
    #[serde(default)]
    pub custom_products: Vec<EndowCustomProduct>,
    /// Opaque presentation settings, round-tripped uninterpreted.
    #[serde(default)]
    pub display_settings: serde_json::Value,
}

impl EndowSystem {
    /// Create an empty endow set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored payload, failing on malformed input.
    pub fn from_payload(payload: &str) -> Result<Self, CustomizationError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Parse a stored payload, degrading a malformed one to the empty set.
    pub fn parse_or_default(payload: &str) -> Self {
        match Self::from_payload(payload) {
            Ok(system) => system,
            Err(e) => {
                tracing::warn!(error = %e, "stored endow payload unparsable, using empty");
                Self::default()
            }
        }
    }

    /// Serialize to the stored payload format.
    pub fn to_payload(&self) -> Result<String, CustomizationError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Look up a free-text entry by id.
    pub fn endow(&self, id: &EndowId) -> Option<&EndowEntry> {
        self.endows.iter().find(|e| &e.id == id)
    }

    /// Look up a custom-product reference by id.
    pub fn custom_product(&self, id: &EndowId) -> Option<&EndowCustomProduct> {
        self.custom_products.iter().find(|c| &c.id == id)
    }

    /// Whether the set has no entries of either kind.
    pub fn is_empty(&self) -> bool {
        self.endows.is_empty() && self.custom_products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_clamped_to_one() {
        let cp = EndowCustomProduct::new(ProductCustomId::new("pc-1"), 0);
        assert_eq!(cp.quantity, 1);

        let cp = EndowCustomProduct::new(ProductCustomId::new("pc-1"), -5);
        assert_eq!(cp.quantity, 1);
    }

    #[test]
    fn test_payload_round_trip() {
        let mut system = EndowSystem::new();
        system.endows.push(EndowEntry::new("Handwritten card"));
        system
            .custom_products
            .push(EndowCustomProduct::new(ProductCustomId::new("pc-1"), 2));
        system.display_settings = serde_json::json!({ "layout": "grid" });

        let payload = system.to_payload().unwrap();
        let parsed = EndowSystem::from_payload(&payload).unwrap();
        assert_eq!(system, parsed);
    }

    #[test]
    fn test_payload_uses_items_key_for_endows() {
        let mut system = EndowSystem::new();
        system.endows.push(EndowEntry::new("Gift wrap"));
        let payload = system.to_payload().unwrap();
        assert!(payload.contains("\"items\""));
        assert!(payload.contains("\"customProducts\""));
        assert!(payload.contains("\"displaySettings\""));
    }

    #[test]
    fn test_malformed_payload_degrades_to_empty() {
        let system = EndowSystem::parse_or_default("42");
        assert!(system.is_empty());
    }
}
