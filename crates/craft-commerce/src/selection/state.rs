//! In-memory shopper selection state.
//!
//! Created when the shopper opens the customization screen and discarded on
//! navigation away or on successful submission; never persisted server-side.
//! The orchestrator owns this state exclusively.

use crate::config::ConfigurationItem;
use crate::ids::{CategoryId, ItemId, OptionId, ProductCustomId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A purchase option the shopper has toggled on, with its price snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectedOption {
    pub id: OptionId,
    pub price: Money,
}

/// One product picked from a category, with a bundled quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPick {
    pub product_custom_id: ProductCustomId,
    pub quantity: i64,
}

/// The shopper's current selections for one customization session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Toggled purchase options.
    pub selected_options: Vec<SelectedOption>,
    /// Per-item custom quantity overrides.
    pub custom_quantities: HashMap<ItemId, i64>,
    /// Picked products per category, in pick order.
    pub selected_category_products: HashMap<CategoryId, Vec<CategoryPick>>,
}

impl SelectionState {
    /// Fresh, empty selection state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an option is currently selected.
    pub fn option_selected(&self, id: &OptionId) -> bool {
        self.selected_options.iter().any(|o| &o.id == id)
    }

    /// The picks for a category. Empty when none were made.
    pub fn picks_for(&self, category_id: &CategoryId) -> &[CategoryPick] {
        self.selected_category_products
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether a product is picked within a category.
    pub fn is_picked(&self, category_id: &CategoryId, product_custom_id: &ProductCustomId) -> bool {
        self.picks_for(category_id)
            .iter()
            .any(|p| &p.product_custom_id == product_custom_id)
    }

    /// The effective quantity for an item: the custom override when one was
    /// made, otherwise the item's base quantity.
    pub fn quantity_for(&self, item: &ConfigurationItem) -> i64 {
        self.custom_quantities
            .get(&item.id)
            .copied()
            .unwrap_or(item.base_quantity)
    }

    /// Total number of picks across every category.
    pub fn pick_count(&self) -> usize {
        self.selected_category_products.values().map(Vec::len).sum()
    }
}
