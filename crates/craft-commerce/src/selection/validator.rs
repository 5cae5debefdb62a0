//! Category-selection validation.

use crate::config::CategoryRule;
use crate::ids::CategoryId;
use crate::selection::CategoryPick;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A required category the shopper has not picked from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryViolation {
    /// The unmet category.
    pub category_id: CategoryId,
    /// Category name, for display.
    pub category_name: String,
    /// Human-readable message shown to the shopper.
    pub message: String,
}

/// Validate shopper selections against the variant's category rules.
///
/// Emits one violation per required category whose selection set is absent
/// or empty, in rule order, so the UI can display every unmet requirement
/// at once. The selection cap is an orchestrator-time guard, not re-checked
/// here: an over-cap set still satisfies the required check. Pure and
/// side-effect-free.
pub fn validate(
    rules: &[CategoryRule],
    selections: &HashMap<CategoryId, Vec<CategoryPick>>,
) -> Vec<CategoryViolation> {
    rules
        .iter()
        .filter(|rule| rule.is_required)
        .filter(|rule| {
            selections
                .get(&rule.category_id)
                .map(|picks| picks.is_empty())
                .unwrap_or(true)
        })
        .map(|rule| CategoryViolation {
            category_id: rule.category_id.clone(),
            category_name: rule.category_name.clone(),
            message: format!(
                "Please select at least one product from category {}",
                rule.category_name
            ),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductCustomId;

    fn rule(category: &str, required: bool, cap: Option<i64>) -> CategoryRule {
        CategoryRule::new(CategoryId::new(category), category.to_uppercase(), required, cap)
    }

    fn pick(id: &str) -> CategoryPick {
        CategoryPick {
            product_custom_id: ProductCustomId::new(id),
            quantity: 1,
        }
    }

    #[test]
    fn test_required_empty_category_violates() {
        let rules = vec![rule("lego", true, Some(2))];
        let violations = validate(&rules, &HashMap::new());

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].category_id, CategoryId::new("lego"));
        assert!(violations[0].message.contains("LEGO"));
    }

    #[test]
    fn test_one_violation_per_unmet_category() {
        let rules = vec![
            rule("lego", true, None),
            rule("card", true, None),
            rule("sticker", false, None),
        ];
        let violations = validate(&rules, &HashMap::new());

        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_selection_clears_violation() {
        let rules = vec![rule("lego", true, Some(2))];
        let mut selections = HashMap::new();
        selections.insert(CategoryId::new("lego"), vec![pick("pc-1")]);

        assert!(validate(&rules, &selections).is_empty());
    }

    #[test]
    fn test_adding_selections_is_monotonic() {
        // Adding a pick to an unrelated category never creates a new
        // required-category violation.
        let rules = vec![rule("lego", true, None)];
        let mut selections = HashMap::new();
        selections.insert(CategoryId::new("card"), vec![pick("pc-9")]);

        let before = validate(&rules, &selections);
        selections
            .get_mut(&CategoryId::new("card"))
            .unwrap()
            .push(pick("pc-10"));
        let after = validate(&rules, &selections);

        assert_eq!(before.len(), after.len());
    }

    #[test]
    fn test_empty_pick_list_still_violates() {
        let rules = vec![rule("lego", true, None)];
        let mut selections = HashMap::new();
        selections.insert(CategoryId::new("lego"), Vec::new());

        assert_eq!(validate(&rules, &selections).len(), 1);
    }

    #[test]
    fn test_over_cap_set_satisfies_required_check() {
        let rules = vec![rule("lego", true, Some(1))];
        let mut selections = HashMap::new();
        selections.insert(
            CategoryId::new("lego"),
            vec![pick("pc-1"), pick("pc-2"), pick("pc-3")],
        );

        assert!(validate(&rules, &selections).is_empty());
    }
}
