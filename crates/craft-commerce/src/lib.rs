//! Product customization configuration and pricing engine for Craft Commerce.
//!
//! This crate provides the rules that let an administrator define, for a
//! product variant, quantity-tiered pricing for bundled items, category-based
//! "pick N products" constraints, flat-priced add-on options, and bundled-gift
//! (endow) entries, plus the shopper-facing machinery that validates
//! selections against those rules and synthesizes a total price:
//!
//! - **Config**: configuration items, tiered price rules, category rules,
//!   and the administrator authoring layer
//! - **Endow / Options**: bundled gifts and flat-priced add-ons
//! - **Selection**: shopper selection state, validation, orchestration
//! - **Pricing**: total synthesis from the independently-varying components
//! - **Catalog**: contracts for the external product-custom catalog
//!
//! # Example
//!
//! ```rust,ignore
//! use craft_commerce::prelude::*;
//!
//! // Author a configuration
//! let draft = ConfigurationDraft::new(VariantId::new("variant-1"))
//!     .add_item("Lego pieces", 2, true);
//! let item_id = draft.system().items[0].id.clone();
//! let draft = draft.add_price_rule(
//!     &item_id,
//!     RuleCondition::GreaterThan,
//!     5,
//!     None,
//!     Money::new(1000, Currency::VND),
//!     None,
//! );
//!
//! // Drive a shopper session
//! let mut session = SelectionOrchestrator::new(draft.into_system());
//! session.set_custom_quantity(&item_id, 6);
//! let outcome = session.continue_checkout(false)?;
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod notify;

pub mod catalog;
pub mod config;
pub mod endow;
pub mod options;
pub mod pricing;
pub mod selection;

pub use error::CustomizationError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CustomizationError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Config
    pub use crate::config::{
        CategoryRule, ConfigMutation, ConfigurationDraft, ConfigurationItem,
        ConfigurationSystem, PriceRule, RuleCondition,
    };

    // Endow and options
    pub use crate::endow::{EndowCustomProduct, EndowDraft, EndowEntry, EndowSystem};
    pub use crate::options::{OptionsDraft, PurchaseOption};

    // Selection
    pub use crate::selection::{
        CategoryPick, CategoryViolation, Continuation, ContinueOutcome, SelectedOption,
        SelectionOrchestrator, SelectionPhase, SelectionState,
    };

    // Pricing
    pub use crate::pricing::{compute_total, CustomizationPricing, ItemCharge};

    // Catalog
    pub use crate::catalog::{
        CatalogError, CatalogPage, CatalogSession, ProductCustom, ProductCustomCatalog,
        ProductCustomStatus, StockRecord,
    };

    // Notification capability
    pub use crate::notify::{Notifier, NotifyKind, NullNotifier};
}
