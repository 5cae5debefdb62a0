//! Flat-priced optional add-ons and their authoring.

use crate::ids::{OptionId, VariantId};
use crate::money::Money;
use craft_cache::{CacheKey, EntityKind};
use serde::{Deserialize, Serialize};

/// A flat-priced optional add-on a shopper may attach to a customization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOption {
    /// Unique option identifier.
    pub id: OptionId,
    /// Display text.
    pub content: String,
    /// Flat price added when selected. Positive.
    pub price: Money,
    /// Whether the option is currently offered.
    pub is_active: bool,
    /// Display order.
    pub priority: i32,
}

impl PurchaseOption {
    pub fn new(content: impl Into<String>, price: Money) -> Self {
        Self {
            id: OptionId::generate(),
            content: content.into(),
            price,
            is_active: true,
            priority: 0,
        }
    }
}

/// The mutation that produced an options draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionMutation {
    OptionAdded(OptionId),
    OptionRemoved(OptionId),
}

impl OptionMutation {
    /// The declared invalidation set for this mutation.
    pub fn invalidation_set(&self, variant_id: &VariantId) -> Vec<CacheKey> {
        let (OptionMutation::OptionAdded(id) | OptionMutation::OptionRemoved(id)) = self;
        vec![
            CacheKey::new(EntityKind::PurchaseOption, id.as_str()),
            CacheKey::new(EntityKind::Statistics, variant_id.as_str()),
        ]
    }
}

/// An authoring draft over a variant's purchase options.
///
/// Snapshot-and-replace: every operation returns a new draft; rejected
/// input leaves the options unchanged with no mutation record.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsDraft {
    variant_id: VariantId,
    options: Vec<PurchaseOption>,
    last_mutation: Option<OptionMutation>,
}

impl OptionsDraft {
    /// Start a fresh draft for a variant.
    pub fn new(variant_id: VariantId) -> Self {
        Self::from_options(variant_id, Vec::new())
    }

    /// Open a draft over existing options.
    pub fn from_options(variant_id: VariantId, options: Vec<PurchaseOption>) -> Self {
        Self {
            variant_id,
            options,
            last_mutation: None,
        }
    }

    /// The current options snapshot, in display order.
    pub fn options(&self) -> &[PurchaseOption] {
        &self.options
    }

    /// Consume the draft, keeping the options.
    pub fn into_options(self) -> Vec<PurchaseOption> {
        self.options
    }

    /// The mutation that produced this draft, `None` after a no-op.
    pub fn last_mutation(&self) -> Option<&OptionMutation> {
        self.last_mutation.as_ref()
    }

    /// Cache keys rendered stale by the mutation that produced this draft.
    pub fn invalidation_set(&self) -> Vec<CacheKey> {
        self.last_mutation
            .as_ref()
            .map(|m| m.invalidation_set(&self.variant_id))
            .unwrap_or_default()
    }

    fn rejected(&self, reason: &str) -> Self {
        tracing::debug!(variant = %self.variant_id, reason, "option mutation rejected");
        let mut next = self.clone();
        next.last_mutation = None;
        next
    }

    /// Append an option. Rejects blank content or a non-positive price.
    pub fn add_option(&self, content: &str, price: Money) -> Self {
        let content = content.trim();
        if content.is_empty() {
            return self.rejected("blank option content");
        }
        if !price.is_positive() {
            return self.rejected("non-positive option price");
        }
        let mut options = self.options.clone();
        let mut option = PurchaseOption::new(content, price);
        option.priority = options.len() as i32 + 1;
        let id = option.id.clone();
        options.push(option);
        Self {
            variant_id: self.variant_id.clone(),
            options,
            last_mutation: Some(OptionMutation::OptionAdded(id)),
        }
    }

    /// Remove an option by id. Tolerant of unknown ids.
    pub fn remove_option(&self, id: &OptionId) -> Self {
        if !self.options.iter().any(|o| &o.id == id) {
            return self.rejected("unknown option id");
        }
        let mut options = self.options.clone();
        options.retain(|o| &o.id != id);
        Self {
            variant_id: self.variant_id.clone(),
            options,
            last_mutation: Some(OptionMutation::OptionRemoved(id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn draft() -> OptionsDraft {
        OptionsDraft::new(VariantId::new("variant-1"))
    }

    #[test]
    fn test_add_option() {
        let d = draft().add_option("Premium gift box", Money::new(20000, Currency::VND));
        assert_eq!(d.options().len(), 1);
        assert_eq!(d.options()[0].priority, 1);
        assert!(d.options()[0].is_active);
    }

    #[test]
    fn test_blank_content_rejected() {
        let d = draft().add_option("  ", Money::new(20000, Currency::VND));
        assert!(d.options().is_empty());
        assert!(d.last_mutation().is_none());
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        let d = draft().add_option("Free sticker", Money::zero(Currency::VND));
        assert!(d.options().is_empty());
        assert!(d.last_mutation().is_none());
    }

    #[test]
    fn test_remove_option_tolerant() {
        let d = draft().add_option("Premium gift box", Money::new(20000, Currency::VND));
        let id = d.options()[0].id.clone();

        let removed = d.remove_option(&id);
        assert!(removed.options().is_empty());

        let again = removed.remove_option(&id);
        assert_eq!(again.options(), removed.options());
        assert!(again.last_mutation().is_none());
    }

    #[test]
    fn test_invalidation_set() {
        let d = draft().add_option("Premium gift box", Money::new(20000, Currency::VND));
        let id = d.options()[0].id.clone();
        let keys = d.invalidation_set();
        assert!(keys.contains(&CacheKey::new(EntityKind::PurchaseOption, id.as_str())));
        assert!(keys.contains(&CacheKey::new(EntityKind::Statistics, "variant-1")));
    }
}
