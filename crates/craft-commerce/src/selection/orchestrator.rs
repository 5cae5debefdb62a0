//! Shopper-facing selection orchestration.
//!
//! Holds the in-memory selection state for one customization session and
//! drives validation before allowing checkout continuation. Cap and bound
//! checks here are UI-time guards: a refused toggle is silently ignored,
//! not an error.

use crate::config::ConfigurationSystem;
use crate::error::CustomizationError;
use crate::ids::{CategoryId, ItemId, ProductCustomId};
use crate::options::PurchaseOption;
use crate::selection::{validate, CategoryPick, CategoryViolation, SelectedOption, SelectionState};
use serde::{Deserialize, Serialize};

/// Phases of a customization session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionPhase {
    /// Shopper is adjusting selections. Initial phase.
    Browsing,
    /// Validation is running for a continue action.
    Validating,
    /// Validation found unmet requirements; shopper must acknowledge.
    Blocked,
    /// All required categories are satisfied; ready to hand off.
    Ready,
    /// Handed off to the next screen. Terminal.
    Submitted,
}

impl SelectionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPhase::Browsing => "browsing",
            SelectionPhase::Validating => "validating",
            SelectionPhase::Blocked => "blocked",
            SelectionPhase::Ready => "ready",
            SelectionPhase::Submitted => "submitted",
        }
    }
}

/// Where a ready session hands control next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Continuation {
    /// The product supports background customization; continue there.
    BackgroundCustomization,
    /// Straight to the cart flow.
    Cart,
}

/// Result of a continue action.
#[derive(Debug, Clone, PartialEq)]
pub enum ContinueOutcome {
    /// Validation failed; every violation is surfaced at once.
    Blocked(Vec<CategoryViolation>),
    /// Validation passed; hand off to the chosen continuation.
    Ready(Continuation),
}

/// Drives one shopper's customization session over a fixed configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOrchestrator {
    config: ConfigurationSystem,
    phase: SelectionPhase,
    state: SelectionState,
    violations: Vec<CategoryViolation>,
}

impl SelectionOrchestrator {
    /// Open a session over a variant's configuration.
    pub fn new(config: ConfigurationSystem) -> Self {
        Self {
            config,
            phase: SelectionPhase::Browsing,
            state: SelectionState::new(),
            violations: Vec::new(),
        }
    }

    /// The configuration this session runs against.
    pub fn config(&self) -> &ConfigurationSystem {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Current selections.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Violations from the most recent continue action.
    pub fn violations(&self) -> &[CategoryViolation] {
        &self.violations
    }

    fn browsing(&self) -> bool {
        if self.phase != SelectionPhase::Browsing {
            tracing::debug!(phase = self.phase.as_str(), "selection change ignored");
            return false;
        }
        true
    }

    /// Toggle a product within a category.
    ///
    /// Removes the pick if present; otherwise adds it with quantity 1 when
    /// the category's cap allows. A toggle past the cap is silently ignored.
    pub fn toggle_category_product(
        &mut self,
        category_id: &CategoryId,
        product_custom_id: &ProductCustomId,
    ) {
        if !self.browsing() {
            return;
        }
        let picks = self
            .state
            .selected_category_products
            .entry(category_id.clone())
            .or_default();

        if let Some(pos) = picks
            .iter()
            .position(|p| &p.product_custom_id == product_custom_id)
        {
            picks.remove(pos);
            return;
        }

        let under_cap = self
            .config
            .category_rule(category_id)
            .map(|rule| rule.allows_another_selection(picks.len()))
            .unwrap_or(true);
        if !under_cap {
            tracing::debug!(category = %category_id, "selection cap reached, toggle ignored");
            return;
        }
        picks.push(CategoryPick {
            product_custom_id: product_custom_id.clone(),
            quantity: 1,
        });
    }

    /// Adjust the bundled quantity of an existing pick. Clamped to at
    /// least 1; ignored if the product is not picked.
    pub fn set_pick_quantity(
        &mut self,
        category_id: &CategoryId,
        product_custom_id: &ProductCustomId,
        quantity: i64,
    ) {
        if !self.browsing() {
            return;
        }
        if let Some(picks) = self.state.selected_category_products.get_mut(category_id) {
            for pick in picks
                .iter_mut()
                .filter(|p| &p.product_custom_id == product_custom_id)
            {
                pick.quantity = quantity.max(1);
            }
        }
    }

    /// Toggle a purchase option by id, snapshotting its price on add.
    /// Inactive options are ignored.
    pub fn toggle_option(&mut self, option: &PurchaseOption) {
        if !self.browsing() {
            return;
        }
        if let Some(pos) = self
            .state
            .selected_options
            .iter()
            .position(|o| o.id == option.id)
        {
            self.state.selected_options.remove(pos);
            return;
        }
        if !option.is_active {
            tracing::debug!(option = %option.id, "inactive option ignored");
            return;
        }
        self.state.selected_options.push(SelectedOption {
            id: option.id.clone(),
            price: option.price,
        });
    }

    /// Set a custom quantity for an item, clamped to the configured
    /// bounds. Ignored when custom quantities are disallowed (the item
    /// quantity stays fixed at its base) or the item is unknown.
    pub fn set_custom_quantity(&mut self, item_id: &ItemId, quantity: i64) {
        if !self.browsing() {
            return;
        }
        if self.config.item(item_id).is_none() {
            tracing::debug!(item = %item_id, "unknown item, quantity ignored");
            return;
        }
        match self.config.clamp_custom_quantity(quantity) {
            Some(clamped) => {
                self.state.custom_quantities.insert(item_id.clone(), clamped);
            }
            None => {
                tracing::debug!(item = %item_id, "custom quantity disallowed, ignored");
            }
        }
    }

    /// Run validation for a continue action.
    ///
    /// On violations the session lands in `Blocked` with every message
    /// retained for display; otherwise it lands in `Ready` with the
    /// continuation chosen by the product's background-customization
    /// capability (an external fact fetched once per product).
    pub fn continue_checkout(
        &mut self,
        has_background_customization: bool,
    ) -> Result<ContinueOutcome, CustomizationError> {
        if self.phase != SelectionPhase::Browsing {
            return Err(self.invalid_transition("validating"));
        }
        self.phase = SelectionPhase::Validating;
        self.violations = validate(
            &self.config.variant_category_rules,
            &self.state.selected_category_products,
        );

        if self.violations.is_empty() {
            self.phase = SelectionPhase::Ready;
            let continuation = if has_background_customization {
                Continuation::BackgroundCustomization
            } else {
                Continuation::Cart
            };
            Ok(ContinueOutcome::Ready(continuation))
        } else {
            self.phase = SelectionPhase::Blocked;
            Ok(ContinueOutcome::Blocked(self.violations.clone()))
        }
    }

    /// Acknowledge the surfaced violations, returning to browsing.
    pub fn acknowledge(&mut self) -> Result<(), CustomizationError> {
        if self.phase != SelectionPhase::Blocked {
            return Err(self.invalid_transition("browsing"));
        }
        self.phase = SelectionPhase::Browsing;
        Ok(())
    }

    /// Hand off to the next screen. Terminal.
    pub fn submit(&mut self) -> Result<(), CustomizationError> {
        if self.phase != SelectionPhase::Ready {
            return Err(self.invalid_transition("submitted"));
        }
        self.phase = SelectionPhase::Submitted;
        Ok(())
    }

    fn invalid_transition(&self, to: &str) -> CustomizationError {
        CustomizationError::InvalidTransition {
            from: self.phase.as_str().to_string(),
            to: to.to_string(),
        }
    }
}
