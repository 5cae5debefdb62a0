//! Shopper selection module.
//!
//! Contains the ephemeral selection state, the category-selection
//! validator, and the orchestrator that drives a customization session.

mod orchestrator;
mod state;
mod validator;

pub use orchestrator::{
    Continuation, ContinueOutcome, SelectionOrchestrator, SelectionPhase,
};
pub use state::{CategoryPick, SelectedOption, SelectionState};
pub use validator::{validate, CategoryViolation};
