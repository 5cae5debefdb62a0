//! Administrator-facing authoring over a variant's configuration.
//!
//! Every operation follows a snapshot-and-replace discipline: it returns a
//! new draft value instead of mutating in place, so the authoring UI and any
//! undo/redo layer can diff cleanly. Invalid input is rejected as a silent
//! no-op (the UI disables the triggering control); the produced draft then
//! carries no mutation record.

use crate::config::price_rule::default_description;
use crate::config::{CategoryRule, ConfigurationItem, ConfigurationSystem, PriceRule, RuleCondition};
use crate::ids::{CategoryId, CategoryRuleId, ItemId, RuleId, VariantId};
use crate::money::Money;
use craft_cache::{CacheKey, EntityKind};

/// The mutation that produced a draft, if any.
///
/// Each kind declares the cache keys it renders stale; callers hand the set
/// to `craft_cache::Store::invalidate` instead of invalidating ad hoc.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigMutation {
    ItemAdded(ItemId),
    ItemUpdated(ItemId),
    ItemRemoved(ItemId),
    PriceRuleAdded { item: ItemId, rule: RuleId },
    PriceRuleRemoved { item: ItemId, rule: RuleId },
    CategoryRuleAdded { rule: CategoryRuleId, category: CategoryId },
    CategoryRuleRemoved { rule: CategoryRuleId, category: CategoryId },
    CustomQuantityPolicyChanged,
}

impl ConfigMutation {
    /// The declared invalidation set for this mutation, scoped to the
    /// owning variant.
    pub fn invalidation_set(&self, variant_id: &VariantId) -> Vec<CacheKey> {
        let item_list = CacheKey::new(EntityKind::ItemList, variant_id.as_str());
        let statistics = CacheKey::new(EntityKind::Statistics, variant_id.as_str());
        match self {
            ConfigMutation::ItemAdded(id)
            | ConfigMutation::ItemUpdated(id)
            | ConfigMutation::ItemRemoved(id) => vec![
                CacheKey::new(EntityKind::ConfigurationItem, id.as_str()),
                item_list,
                statistics,
            ],
            ConfigMutation::PriceRuleAdded { item, .. }
            | ConfigMutation::PriceRuleRemoved { item, .. } => vec![
                CacheKey::new(EntityKind::ConfigurationItem, item.as_str()),
                item_list,
                statistics,
            ],
            ConfigMutation::CategoryRuleAdded { rule, category }
            | ConfigMutation::CategoryRuleRemoved { rule, category } => vec![
                CacheKey::new(EntityKind::CategoryRule, rule.as_str()),
                CacheKey::new(EntityKind::CategoryIndex, category.as_str()),
                statistics,
            ],
            ConfigMutation::CustomQuantityPolicyChanged => vec![item_list, statistics],
        }
    }
}

/// An authoring draft of one variant's [`ConfigurationSystem`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationDraft {
    variant_id: VariantId,
    system: ConfigurationSystem,
    editing: Option<ItemId>,
    last_mutation: Option<ConfigMutation>,
}

impl ConfigurationDraft {
    /// Start a fresh draft for a variant.
    pub fn new(variant_id: VariantId) -> Self {
        Self::from_system(variant_id, ConfigurationSystem::new())
    }

    /// Open a draft over an existing configuration.
    pub fn from_system(variant_id: VariantId, system: ConfigurationSystem) -> Self {
        Self {
            variant_id,
            system,
            editing: None,
            last_mutation: None,
        }
    }

    /// The variant this draft belongs to.
    pub fn variant_id(&self) -> &VariantId {
        &self.variant_id
    }

    /// The current configuration snapshot.
    pub fn system(&self) -> &ConfigurationSystem {
        &self.system
    }

    /// Consume the draft, keeping the configuration.
    pub fn into_system(self) -> ConfigurationSystem {
        self.system
    }

    /// The item currently open for editing, if any.
    pub fn editing(&self) -> Option<&ItemId> {
        self.editing.as_ref()
    }

    /// The mutation that produced this draft. `None` after a rejected or
    /// no-op call.
    pub fn last_mutation(&self) -> Option<&ConfigMutation> {
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
        tracing::debug!(variant = %self.variant_id, reason, "authoring mutation rejected");
        let mut next = self.clone();
        next.last_mutation = None;
        next
    }

    fn accepted(&self, system: ConfigurationSystem, mutation: ConfigMutation) -> Self {
        Self {
            variant_id: self.variant_id.clone(),
            system,
            editing: self.editing.clone(),
            last_mutation: Some(mutation),
        }
    }

    /// Append a new item. Blank names are rejected; the new item's priority
    /// is the item count after insertion.
    pub fn add_item(&self, name: &str, base_quantity: i64, is_required: bool) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return self.rejected("blank item name");
        }
        let mut system = self.system.clone();
        let mut item = ConfigurationItem::new(name, base_quantity, is_required);
        item.priority = system.items.len() as i32 + 1;
        let id = item.id.clone();
        system.items.push(item);
        self.accepted(system, ConfigMutation::ItemAdded(id))
    }

    /// Replace an item's mutable fields. No-op if the id is unknown or the
    /// new name is blank.
    pub fn update_item(
        &self,
        id: &ItemId,
        name: &str,
        base_quantity: i64,
        is_required: bool,
    ) -> Self {
        let name = name.trim();
        if name.is_empty() {
            return self.rejected("blank item name");
        }
        if self.system.item(id).is_none() {
            return self.rejected("unknown item id");
        }
        let mut system = self.system.clone();
        for item in system.items.iter_mut().filter(|i| &i.id == id) {
            item.name = name.to_string();
            item.base_quantity = base_quantity.max(0);
            item.is_required = is_required;
        }
        self.accepted(system, ConfigMutation::ItemUpdated(id.clone()))
    }

    /// Open an item for editing. No-op on unknown id.
    pub fn edit_item(&self, id: &ItemId) -> Self {
        if self.system.item(id).is_none() {
            return self.rejected("unknown item id");
        }
        let mut next = self.clone();
        next.editing = Some(id.clone());
        next.last_mutation = None;
        next
    }

    /// Leave edit mode.
    pub fn cancel_editing(&self) -> Self {
        let mut next = self.clone();
        next.editing = None;
        next.last_mutation = None;
        next
    }

    /// Remove an item, exiting edit mode if it was the one being edited.
    /// A second removal of the same id is a no-op.
    pub fn remove_item(&self, id: &ItemId) -> Self {
        if self.system.item(id).is_none() {
            return self.rejected("unknown item id");
        }
        let mut system = self.system.clone();
        system.items.retain(|i| &i.id != id);
        let mut next = self.accepted(system, ConfigMutation::ItemRemoved(id.clone()));
        if next.editing.as_ref() == Some(id) {
            next.editing = None;
        }
        next
    }

    /// Attach a price rule to an item. Rejects a non-positive unit price or
    /// an unknown item. A missing description is auto-generated; a
    /// `between` rule's upper bound is clamped to its lower bound.
    pub fn add_price_rule(
        &self,
        item_id: &ItemId,
        condition: RuleCondition,
        min_quantity: i64,
        max_quantity: Option<i64>,
        price_per_unit: Money,
        description: Option<&str>,
    ) -> Self {
        if !price_per_unit.is_positive() {
            return self.rejected("non-positive price per unit");
        }
        if self.system.item(item_id).is_none() {
            return self.rejected("unknown item id");
        }
        let mut rule = PriceRule::new(condition, min_quantity, price_per_unit);
        if let Some(max) = max_quantity {
            rule = rule.with_max_quantity(max);
        }
        match description {
            Some(d) if !d.trim().is_empty() => rule.description = d.trim().to_string(),
            _ => rule.description = default_description(condition, min_quantity, &price_per_unit),
        }
        let rule_id = rule.id.clone();
        let mut system = self.system.clone();
        for item in system.items.iter_mut().filter(|i| &i.id == item_id) {
            item.price_rules.push(rule.clone());
        }
        self.accepted(
            system,
            ConfigMutation::PriceRuleAdded {
                item: item_id.clone(),
                rule: rule_id,
            },
        )
    }

    /// Detach a price rule. Tolerant of unknown item or rule ids.
    pub fn remove_price_rule(&self, item_id: &ItemId, rule_id: &RuleId) -> Self {
        let found = self
            .system
            .item(item_id)
            .map(|i| i.rule(rule_id).is_some())
            .unwrap_or(false);
        if !found {
            return self.rejected("unknown price rule");
        }
        let mut system = self.system.clone();
        for item in system.items.iter_mut().filter(|i| &i.id == item_id) {
            item.price_rules.retain(|r| &r.id != rule_id);
        }
        self.accepted(
            system,
            ConfigMutation::PriceRuleRemoved {
                item: item_id.clone(),
                rule: rule_id.clone(),
            },
        )
    }

    /// Add a variant-scoped category rule. Rejects a blank category id;
    /// clamps a present cap to at least 1.
    pub fn add_variant_category_rule(
        &self,
        category_id: CategoryId,
        category_name: &str,
        is_required: bool,
        max_selections: Option<i64>,
    ) -> Self {
        if category_id.is_blank() {
            return self.rejected("blank category id");
        }
        let rule = CategoryRule::new(category_id.clone(), category_name, is_required, max_selections);
        let rule_id = rule.id.clone();
        let mut system = self.system.clone();
        system.variant_category_rules.push(rule);
        self.accepted(
            system,
            ConfigMutation::CategoryRuleAdded {
                rule: rule_id,
                category: category_id,
            },
        )
    }

    /// Remove a variant-scoped category rule. Tolerant of unknown ids.
    pub fn remove_variant_category_rule(&self, rule_id: &CategoryRuleId) -> Self {
        let Some(rule) = self
            .system
            .variant_category_rules
            .iter()
            .find(|r| &r.id == rule_id)
        else {
            return self.rejected("unknown category rule");
        };
        let category = rule.category_id.clone();
        let mut system = self.system.clone();
        system.variant_category_rules.retain(|r| &r.id != rule_id);
        self.accepted(
            system,
            ConfigMutation::CategoryRuleRemoved {
                rule: rule_id.clone(),
                category,
            },
        )
    }

    /// Toggle whether shoppers may override item quantities.
    pub fn set_allow_custom_quantity(&self, allow: bool) -> Self {
        let mut system = self.system.clone();
        system.allow_custom_quantity = allow;
        self.accepted(system, ConfigMutation::CustomQuantityPolicyChanged)
    }

    /// Set the lower custom-quantity bound. The floor is always 1; the
    /// upper bound is raised if the new minimum exceeds it.
    pub fn set_min_custom_quantity(&self, min: i64) -> Self {
        let mut system = self.system.clone();
        system.min_custom_quantity = min.max(1);
        system.max_custom_quantity = system.max_custom_quantity.max(system.min_custom_quantity);
        self.accepted(system, ConfigMutation::CustomQuantityPolicyChanged)
    }

    /// Set the upper custom-quantity bound. The floor is always 1; the
    /// lower bound is brought down if it would exceed the new maximum.
    pub fn set_max_custom_quantity(&self, max: i64) -> Self {
        let mut system = self.system.clone();
        system.max_custom_quantity = max.max(1);
        system.min_custom_quantity = system.min_custom_quantity.min(system.max_custom_quantity);
        self.accepted(system, ConfigMutation::CustomQuantityPolicyChanged)
    }
}
