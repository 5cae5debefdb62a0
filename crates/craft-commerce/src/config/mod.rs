//! Customization configuration module.
//!
//! Contains the per-variant configuration model (items, tiered price rules,
//! category rules), the winning-rule resolver, and the authoring layer.

mod authoring;
mod category_rule;
mod item;
mod price_rule;
mod system;

pub use authoring::{ConfigMutation, ConfigurationDraft};
pub use category_rule::CategoryRule;
pub use item::ConfigurationItem;
pub use price_rule::{charge, resolve, PriceRule, RuleCondition};
pub use system::ConfigurationSystem;
