//! Price synthesis for a customization session.
//!
//! Pure and synchronous: every referenced product price must already be
//! resolved (the catalog session caches them by id); the lookup is injected
//! so the synthesizer never touches I/O.

use crate::config::{charge, ConfigurationSystem};
use crate::error::CustomizationError;
use crate::ids::{ItemId, ProductCustomId};
use crate::money::Money;
use crate::selection::SelectionState;
use serde::{Deserialize, Serialize};

/// Tier charge for a single configuration item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemCharge {
    /// The charged item.
    pub item_id: ItemId,
    /// Effective quantity (custom override or base quantity).
    pub quantity: i64,
    /// Amount charged by the winning tier, zero when no tier matched.
    pub amount: Money,
}

/// Complete pricing breakdown for a customization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationPricing {
    /// The variant's base price.
    pub base_price: Money,
    /// Total of tiered item charges.
    pub item_total: Money,
    /// Total of selected purchase options.
    pub option_total: Money,
    /// Total of selected category products (unit price × quantity).
    pub category_total: Money,
    /// Final total.
    pub grand_total: Money,
    /// Per-item tier charges.
    pub item_charges: Vec<ItemCharge>,
}

/// Compose the total price of a customization.
///
/// `price_of` resolves a product-custom id to its unit price; an
/// unresolved id contributes zero so a failed catalog lookup degrades the
/// total instead of blocking the screen. Inactive items never contribute.
/// Returns an error on arithmetic overflow or mixed currencies.
pub fn compute_total<F>(
    base_price: Money,
    config: &ConfigurationSystem,
    state: &SelectionState,
    price_of: F,
) -> Result<CustomizationPricing, CustomizationError>
where
    F: Fn(&ProductCustomId) -> Option<Money>,
{
    let currency = base_price.currency;

    let item_charges: Vec<ItemCharge> = config
        .active_items()
        .map(|item| {
            let quantity = state.quantity_for(item);
            ItemCharge {
                item_id: item.id.clone(),
                quantity,
                amount: charge(quantity, &item.price_rules, currency),
            }
        })
        .collect();

    let item_total = Money::try_sum(item_charges.iter().map(|c| &c.amount), currency)
        .ok_or(CustomizationError::Overflow)?;

    let option_total = Money::try_sum(
        state.selected_options.iter().map(|o| &o.price),
        currency,
    )
    .ok_or(CustomizationError::Overflow)?;

    let mut category_total = Money::zero(currency);
    for pick in state.selected_category_products.values().flatten() {
        let Some(unit_price) = price_of(&pick.product_custom_id) else {
            continue;
        };
        let line = unit_price
            .try_multiply(pick.quantity)
            .ok_or(CustomizationError::Overflow)?;
        category_total = category_total
            .try_add(&line)
            .ok_or(CustomizationError::Overflow)?;
    }

    let grand_total = base_price
        .try_add(&item_total)
        .and_then(|t| t.try_add(&option_total))
        .and_then(|t| t.try_add(&category_total))
        .ok_or(CustomizationError::Overflow)?;

    Ok(CustomizationPricing {
        base_price,
        item_total,
        option_total,
        category_total,
        grand_total,
        item_charges,
    })
}
