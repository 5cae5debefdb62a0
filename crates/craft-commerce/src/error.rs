//! Customization error types.
//!
//! Authoring input problems are not errors here: the authoring layer
//! rejects them as silent no-ops, and selection constraint violations are
//! surfaced as values through the `Blocked` phase. What remains fatal to an
//! operation is a bad phase transition, broken arithmetic, or an
//! unparsable stored payload.

use thiserror::Error;

/// Errors that can occur in the customization engine.
#[derive(Error, Debug)]
pub enum CustomizationError {
    /// Invalid selection phase transition.
    #[error("Invalid selection transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Arithmetic overflow or mixed currencies in a price calculation.
    #[error("Arithmetic overflow in price calculation")]
    Overflow,

    /// Stored payload could not be parsed.
    #[error("Malformed configuration payload: {0}")]
    MalformedPayload(String),
}

impl From<serde_json::Error> for CustomizationError {
    fn from(e: serde_json::Error) -> Self {
        CustomizationError::MalformedPayload(e.to_string())
    }
}
