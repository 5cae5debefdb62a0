//! Quantity-tiered price rules and the winning-rule resolver.

use crate::ids::RuleId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Condition under which a price rule applies to a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCondition {
    /// Applies when quantity is strictly greater than the threshold.
    GreaterThan,
    /// Applies when quantity equals the threshold exactly.
    EqualTo,
    /// Applies when quantity falls within [min, max].
    Between,
}

impl RuleCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleCondition::GreaterThan => "greater_than",
            RuleCondition::EqualTo => "equal_to",
            RuleCondition::Between => "between",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "greater_than" => Some(RuleCondition::GreaterThan),
            "equal_to" => Some(RuleCondition::EqualTo),
            "between" => Some(RuleCondition::Between),
            _ => None,
        }
    }
}

/// A tiered pricing condition attached to a configuration item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRule {
    /// Unique rule identifier.
    pub id: RuleId,
    /// Condition kind.
    pub condition: RuleCondition,
    /// Quantity threshold (lower bound for `between`).
    pub min_quantity: i64,
    /// Upper bound, only meaningful for `between`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,
    /// Per-unit price charged when the rule wins.
    pub price_per_unit: Money,
    /// Display description.
    pub description: String,
}

impl PriceRule {
    /// Create a rule with an auto-generated description.
    pub fn new(condition: RuleCondition, min_quantity: i64, price_per_unit: Money) -> Self {
        let description = default_description(condition, min_quantity, &price_per_unit);
        Self {
            id: RuleId::generate(),
            condition,
            min_quantity,
            max_quantity: None,
            price_per_unit,
            description,
        }
    }

    /// Set the upper bound for a `between` rule, clamped to the lower bound.
    pub fn with_max_quantity(mut self, max_quantity: i64) -> Self {
        self.max_quantity = Some(max_quantity.max(self.min_quantity));
        self
    }

    /// Replace the display description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this rule's condition is satisfied by `quantity`.
    ///
    /// A `between` rule without an upper bound never matches.
    pub fn matches(&self, quantity: i64) -> bool {
        match self.condition {
            RuleCondition::GreaterThan => quantity > self.min_quantity,
            RuleCondition::EqualTo => quantity == self.min_quantity,
            RuleCondition::Between => self
                .max_quantity
                .map(|max| self.min_quantity <= quantity && quantity <= max)
                .unwrap_or(false),
        }
    }
}

/// Default display description for an authored rule.
pub(crate) fn default_description(
    condition: RuleCondition,
    min_quantity: i64,
    price_per_unit: &Money,
) -> String {
    let comparator = match condition {
        RuleCondition::GreaterThan => ">",
        RuleCondition::EqualTo => "=",
        RuleCondition::Between => ">=",
    };
    format!(
        "Price {}/unit when {} {}",
        price_per_unit.display(),
        comparator,
        min_quantity
    )
}

/// Resolve the winning rule for a quantity.
///
/// Among satisfied rules the one with the largest `min_quantity` wins (the
/// highest tier is the most specific). Returns `None` when no rule matches,
/// which is not an error: the item is then included at no extra charge.
pub fn resolve(quantity: i64, rules: &[PriceRule]) -> Option<&PriceRule> {
    rules
        .iter()
        .filter(|r| r.matches(quantity))
        .max_by_key(|r| r.min_quantity)
}

/// Price a quantity against a rule set.
///
/// The winning rule's per-unit price is multiplied by the full quantity;
/// no match charges zero. Multiplication saturates rather than wrapping;
/// the synthesizer's checked sums surface the overflow.
pub fn charge(quantity: i64, rules: &[PriceRule], currency: Currency) -> Money {
    match resolve(quantity, rules) {
        Some(rule) => Money::new(
            rule.price_per_unit.amount.saturating_mul(quantity),
            rule.price_per_unit.currency,
        ),
        None => Money::zero(currency),
    }
}
