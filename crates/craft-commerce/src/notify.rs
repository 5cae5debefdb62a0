//! Notification capability.
//!
//! Core logic returns result values; whether and how to surface them is the
//! caller's decision, injected through this interface. Keeps pricing and
//! validation side-effect-free and independently testable.

use std::cell::RefCell;
use std::fmt;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotifyKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotifyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotifyKind::Info => "info",
            NotifyKind::Success => "success",
            NotifyKind::Warning => "warning",
            NotifyKind::Error => "error",
        }
    }
}

impl fmt::Display for NotifyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Something that can surface a message to the user.
pub trait Notifier {
    fn notify(&self, message: &str, kind: NotifyKind);
}

/// A notifier that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str, _kind: NotifyKind) {}
}

/// A notifier that records messages, for tests and headless callers.
#[derive(Debug, Default)]
pub struct BufferNotifier {
    messages: RefCell<Vec<(String, NotifyKind)>>,
}

impl BufferNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far.
    pub fn drain(&self) -> Vec<(String, NotifyKind)> {
        self.messages.borrow_mut().drain(..).collect()
    }
}

impl Notifier for BufferNotifier {
    fn notify(&self, message: &str, kind: NotifyKind) {
        self.messages.borrow_mut().push((message.to_string(), kind));
    }
}

/// Surface each validation violation through a notifier.
pub fn notify_violations(
    notifier: &dyn Notifier,
    violations: &[crate::selection::CategoryViolation],
) {
    for violation in violations {
        notifier.notify(&violation.message, NotifyKind::Warning);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CategoryId;
    use crate::selection::CategoryViolation;

    #[test]
    fn test_buffer_notifier_records() {
        let notifier = BufferNotifier::new();
        notifier.notify("saved", NotifyKind::Success);

        let messages = notifier.drain();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].0, "saved");
        assert_eq!(messages[0].1, NotifyKind::Success);
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn test_notify_violations_surfaces_each() {
        let notifier = BufferNotifier::new();
        let violations = vec![
            CategoryViolation {
                category_id: CategoryId::new("lego"),
                category_name: "Lego".to_string(),
                message: "Please select at least one product from category Lego".to_string(),
            },
            CategoryViolation {
                category_id: CategoryId::new("card"),
                category_name: "Cards".to_string(),
                message: "Please select at least one product from category Cards".to_string(),
            },
        ];

        notify_violations(&notifier, &violations);
        assert_eq!(notifier.drain().len(), 2);
    }
}
