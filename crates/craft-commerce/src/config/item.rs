//! Configuration items bundled with a variant.

use crate::config::PriceRule;
use crate::ids::ItemId;
use serde::{Deserialize, Serialize};

/// A bundled line item attached to a variant (e.g., "Lego pieces").
///
/// `base_quantity` units are included free; tiered price rules charge for
/// quantities the shopper raises beyond the tiers' thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationItem {
    /// Unique item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Quantity included at no charge. Never negative.
    pub base_quantity: i64,
    /// Whether the item must be part of every customization.
    pub is_required: bool,
    /// Whether the item is currently offered.
    pub is_active: bool,
    /// Display order.
    pub priority: i32,
    /// Tiered pricing rules, evaluated by the resolver.
    #[serde(default)]
    pub price_rules: Vec<PriceRule>,
}

impl ConfigurationItem {
    /// Create a new item. `base_quantity` is clamped to zero or above.
    pub fn new(name: impl Into<String>, base_quantity: i64, is_required: bool) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            base_quantity: base_quantity.max(0),
            is_required,
            is_active: true,
            priority: 0,
            price_rules: Vec::new(),
        }
    }

    /// Look up a price rule by id.
    pub fn rule(&self, rule_id: &crate::ids::RuleId) -> Option<&PriceRule> {
        self.price_rules.iter().find(|r| &r.id == rule_id)
    }

    /// Whether the item carries any tiered pricing.
    pub fn has_price_rules(&self) -> bool {
        !self.price_rules.is_empty()
    }
}
