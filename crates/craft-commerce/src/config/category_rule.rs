//! Category constraints on shopper selections.

use crate::ids::{CategoryId, CategoryRuleId};
use serde::{Deserialize, Serialize};

/// A constraint tying a variant's configuration to a product category.
///
/// Variant-scoped rules are the ones enforced against shopper selections;
/// the category name is denormalized for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    /// Unique rule identifier.
    pub id: CategoryRuleId,
    /// The constrained category.
    pub category_id: CategoryId,
    /// Category name, denormalized for display.
    pub category_name: String,
    /// Whether at least one product must be picked from the category.
    pub is_required: bool,
    /// Cap on picks from this category. Absent means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<i64>,
}

impl CategoryRule {
    /// Create a rule. A present `max_selections` is clamped to at least 1.
    pub fn new(
        category_id: CategoryId,
        category_name: impl Into<String>,
        is_required: bool,
        max_selections: Option<i64>,
    ) -> Self {
        Self {
            id: CategoryRuleId::generate(),
            category_id,
            category_name: category_name.into(),
            is_required,
            max_selections: max_selections.map(|m| m.max(1)),
        }
    }

    /// Whether `count` selections are still under this rule's cap.
    pub fn allows_another_selection(&self, count: usize) -> bool {
        match self.max_selections {
            Some(max) => (count as i64) < max,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_clamped_to_one() {
        let rule = CategoryRule::new(CategoryId::new("lego"), "Lego", true, Some(0));
        assert_eq!(rule.max_selections, Some(1));
    }

    #[test]
    fn test_allows_another_selection() {
        let capped = CategoryRule::new(CategoryId::new("lego"), "Lego", true, Some(2));
        assert!(capped.allows_another_selection(0));
        assert!(capped.allows_another_selection(1));
        assert!(!capped.allows_another_selection(2));

        let unlimited = CategoryRule::new(CategoryId::new("card"), "Cards", false, None);
        assert!(unlimited.allows_another_selection(10_000));
    }
}
