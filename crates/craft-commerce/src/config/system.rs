//! The serialized configuration attached to a product variant.

use crate::config::{CategoryRule, ConfigurationItem};
use crate::error::CustomizationError;
use crate::ids::{CategoryId, ItemId};
use serde::{Deserialize, Serialize};

/// Aggregate customization configuration for one variant.
///
/// Parsed once at the boundary; internal code never re-validates shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSystem {
    /// Bundled items, in display order.
    #[serde(default)]
    pub items: Vec<ConfigurationItem>,
    /// Variant-scoped category rules enforced against shopper selections.
    #[serde(default)]
    pub variant_category_rules: Vec<CategoryRule>,
    /// Whether shoppers may override item quantities.
    pub allow_custom_quantity: bool,
    /// Lower bound for custom quantities. At least 1.
    pub min_custom_quantity: i64,
    /// Upper bound for custom quantities. Never below the lower bound.
    pub max_custom_quantity: i64,
}

impl Default for ConfigurationSystem {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            variant_category_rules: Vec::new(),
            allow_custom_quantity: false,
            min_custom_quantity: 1,
            max_custom_quantity: 1,
        }
    }
}

impl ConfigurationSystem {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored payload, failing on malformed input.
    pub fn from_payload(payload: &str) -> Result<Self, CustomizationError> {
        let mut system: ConfigurationSystem = serde_json::from_str(payload)?;
        system.normalize_bounds();
        Ok(system)
    }

    /// Parse a stored payload, degrading a malformed one to the empty
    /// configuration. Administrators are expected to notice and re-save.
    pub fn parse_or_default(payload: &str) -> Self {
        match Self::from_payload(payload) {
            Ok(system) => system,
            Err(e) => {
                tracing::warn!(error = %e, "stored configuration unparsable, using empty");
                Self::default()
            }
        }
    }

    /// Serialize to the stored payload format.
    pub fn to_payload(&self) -> Result<String, CustomizationError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Re-establish `1 <= min <= max` after deserializing foreign data.
    fn normalize_bounds(&mut self) {
        self.min_custom_quantity = self.min_custom_quantity.max(1);
        self.max_custom_quantity = self.max_custom_quantity.max(self.min_custom_quantity);
    }

    /// Look up an item by id.
    pub fn item(&self, id: &ItemId) -> Option<&ConfigurationItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Look up a category rule by category.
    pub fn category_rule(&self, category_id: &CategoryId) -> Option<&CategoryRule> {
        self.variant_category_rules
            .iter()
            .find(|r| &r.category_id == category_id)
    }

    /// Items currently offered, in display order.
    pub fn active_items(&self) -> impl Iterator<Item = &ConfigurationItem> {
        self.items.iter().filter(|i| i.is_active)
    }

    /// Clamp a shopper quantity to the custom-quantity bounds.
    ///
    /// When custom quantities are disallowed the item quantity is fixed at
    /// its base and this returns `None`.
    pub fn clamp_custom_quantity(&self, quantity: i64) -> Option<i64> {
        if !self.allow_custom_quantity {
            return None;
        }
        Some(quantity.clamp(self.min_custom_quantity, self.max_custom_quantity))
    }

    /// Whether the configuration has anything for a shopper to customize.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.variant_category_rules.is_empty()
    }
}
