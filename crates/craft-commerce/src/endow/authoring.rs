//! Authoring over a variant's endow set.
//!
//! Same snapshot-and-replace discipline as configuration authoring: each
//! operation returns a new draft; rejected input leaves the set unchanged
//! with no mutation record.

use crate::endow::{EndowCustomProduct, EndowEntry, EndowSystem};
use crate::ids::{EndowId, ProductCustomId, VariantId};
use craft_cache::{CacheKey, EntityKind};

/// The mutation that produced an endow draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndowMutation {
    EndowAdded(EndowId),
    EndowRemoved(EndowId),
    CustomProductAdded(EndowId),
    CustomProductRemoved(EndowId),
}

impl EndowMutation {
    /// The declared invalidation set for this mutation.
    pub fn invalidation_set(&self, variant_id: &VariantId) -> Vec<CacheKey> {
        let (EndowMutation::EndowAdded(id)
        | EndowMutation::EndowRemoved(id)
        | EndowMutation::CustomProductAdded(id)
        | EndowMutation::CustomProductRemoved(id)) = self;
        vec![
            CacheKey::new(EntityKind::Endow, id.as_str()),
            CacheKey::new(EntityKind::Statistics, variant_id.as_str()),
        ]
    }
}

/// An authoring draft of one variant's [`EndowSystem`].
#[derive(Debug, Clone, PartialEq)]
pub struct EndowDraft {
    variant_id: VariantId,
    system: EndowSystem,
    last_mutation: Option<EndowMutation>,
}

impl EndowDraft {
    /// Start a fresh draft for a variant.
    pub fn new(variant_id: VariantId) -> Self {
        Self::from_system(variant_id, EndowSystem::new())
    }

    /// Open a draft over an existing endow set.
    pub fn from_system(variant_id: VariantId, system: EndowSystem) -> Self {
        Self {
            variant_id,
            system,
            last_mutation: None,
        }
    }

    /// The current endow snapshot.
    pub fn system(&self) -> &EndowSystem {
        &self.system
    }

    /// Consume the draft, keeping the endow set.
    pub fn into_system(self) -> EndowSystem {
        self.system
    }

    /// The mutation that produced this draft, `None` after a no-op.
    pub fn last_mutation(&self) -> Option<&EndowMutation> {
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
        tracing::debug!(variant = %self.variant_id, reason, "endow mutation rejected");
        let mut next = self.clone();
        next.last_mutation = None;
        next
    }

    fn accepted(&self, system: EndowSystem, mutation: EndowMutation) -> Self {
        Self {
            variant_id: self.variant_id.clone(),
            system,
            last_mutation: Some(mutation),
        }
    }

    /// Append a free-text gift entry. Blank content is rejected.
    pub fn add_endow_text(&self, content: &str) -> Self {
        let content = content.trim();
        if content.is_empty() {
            return self.rejected("blank endow content");
        }
        let mut system = self.system.clone();
        let mut entry = EndowEntry::new(content);
        entry.priority = system.endows.len() as i32 + 1;
        let id = entry.id.clone();
        system.endows.push(entry);
        self.accepted(system, EndowMutation::EndowAdded(id))
    }

    /// Remove a free-text entry. Tolerant of unknown ids.
    pub fn remove_endow(&self, id: &EndowId) -> Self {
        if self.system.endow(id).is_none() {
            return self.rejected("unknown endow id");
        }
        let mut system = self.system.clone();
        system.endows.retain(|e| &e.id != id);
        self.accepted(system, EndowMutation::EndowRemoved(id.clone()))
    }

    /// Append a bundled product-custom reference. Rejects a blank product
    /// id; a missing quantity defaults to 1 and is clamped to at least 1.
    pub fn add_custom_product(
        &self,
        product_custom_id: ProductCustomId,
        quantity: Option<i64>,
    ) -> Self {
        if product_custom_id.is_blank() {
            return self.rejected("blank product custom id");
        }
        let mut system = self.system.clone();
        let mut entry = EndowCustomProduct::new(product_custom_id, quantity.unwrap_or(1));
        entry.priority = system.custom_products.len() as i32 + 1;
        let id = entry.id.clone();
        system.custom_products.push(entry);
        self.accepted(system, EndowMutation::CustomProductAdded(id))
    }

    /// Remove a product-custom reference. Tolerant of unknown ids.
    pub fn remove_custom_product(&self, id: &EndowId) -> Self {
        if self.system.custom_product(id).is_none() {
            return self.rejected("unknown custom product id");
        }
        let mut system = self.system.clone();
        system.custom_products.retain(|c| &c.id != id);
        self.accepted(system, EndowMutation::CustomProductRemoved(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EndowDraft {
        EndowDraft::new(VariantId::new("variant-1"))
    }

    #[test]
    fn test_add_endow_text() {
        let d = draft().add_endow_text("Handwritten card");
        assert_eq!(d.system().endows.len(), 1);
        assert_eq!(d.system().endows[0].content, "Handwritten card");
        assert_eq!(d.system().endows[0].priority, 1);
    }

    #[test]
    fn test_blank_endow_rejected() {
        let d = draft().add_endow_text("  ");
        assert!(d.system().endows.is_empty());
        assert!(d.last_mutation().is_none());
    }

    #[test]
    fn test_custom_product_defaults_quantity() {
        let d = draft().add_custom_product(ProductCustomId::new("pc-1"), None);
        assert_eq!(d.system().custom_products[0].quantity, 1);

        let d = d.add_custom_product(ProductCustomId::new("pc-2"), Some(-3));
        assert_eq!(d.system().custom_products[1].quantity, 1);
    }

    #[test]
    fn test_blank_product_custom_rejected() {
        let d = draft().add_custom_product(ProductCustomId::new(""), Some(2));
        assert!(d.system().custom_products.is_empty());
        assert!(d.last_mutation().is_none());
    }

    #[test]
    fn test_removals_are_tolerant() {
        let d = draft().add_endow_text("Gift wrap");
        let id = d.system().endows[0].id.clone();

        let removed = d.remove_endow(&id);
        assert!(removed.system().endows.is_empty());

        let again = removed.remove_endow(&id);
        assert_eq!(again.system(), removed.system());
        assert!(again.last_mutation().is_none());

        let ghost = removed.remove_custom_product(&EndowId::new("ghost"));
        assert!(ghost.last_mutation().is_none());
    }

    #[test]
    fn test_invalidation_set_names_endow_and_statistics() {
        let d = draft().add_endow_text("Gift wrap");
        let id = d.system().endows[0].id.clone();
        let keys = d.invalidation_set();
        assert!(keys.contains(&CacheKey::new(EntityKind::Endow, id.as_str())));
        assert!(keys.contains(&CacheKey::new(EntityKind::Statistics, "variant-1")));
    }
}
