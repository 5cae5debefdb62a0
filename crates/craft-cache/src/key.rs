//! Cache keys addressed by entity kind and id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of cached entities the commerce layer works with.
///
/// List-shaped entries (item lists, category indexes, statistics) are
/// cached under a well-known id per owning scope, so they participate in
/// invalidation the same way single entities do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A product-custom entity from the external catalog.
    ProductCustom,
    /// A configuration item attached to a variant.
    ConfigurationItem,
    /// The item list of a variant's configuration.
    ItemList,
    /// A variant-scoped category rule.
    CategoryRule,
    /// The category index (products grouped per category).
    CategoryIndex,
    /// A flat-priced purchase option.
    PurchaseOption,
    /// A bundled-gift entry.
    Endow,
    /// Aggregate statistics for a variant's configuration.
    Statistics,
    /// Background-customization capability per product.
    BackgroundCapability,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::ProductCustom => "product_custom",
            EntityKind::ConfigurationItem => "configuration_item",
            EntityKind::ItemList => "item_list",
            EntityKind::CategoryRule => "category_rule",
            EntityKind::CategoryIndex => "category_index",
            EntityKind::PurchaseOption => "purchase_option",
            EntityKind::Endow => "endow",
            EntityKind::Statistics => "statistics",
            EntityKind::BackgroundCapability => "background_capability",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cache key: entity kind plus entity id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    /// The kind of entity stored under this key.
    pub kind: EntityKind,
    /// The entity id within its kind.
    pub id: String,
}

impl CacheKey {
    /// Create a key for an entity kind and id.
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Helper to build a [`CacheKey`] from a kind and any displayable id.
///
/// # Example
///
/// ```rust,ignore
/// let key = cache_key!(EntityKind::ProductCustom, product_id);
/// ```
#[macro_export]
macro_rules! cache_key {
    ($kind:expr, $id:expr) => {
        $crate::CacheKey::new($kind, $id.to_string())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_display() {
        let key = CacheKey::new(EntityKind::ProductCustom, "pc-1");
        assert_eq!(key.to_string(), "product_custom:pc-1");
    }

    #[test]
    fn test_key_equality() {
        let a = CacheKey::new(EntityKind::ItemList, "variant-1");
        let b = cache_key!(EntityKind::ItemList, "variant-1");
        let c = CacheKey::new(EntityKind::Statistics, "variant-1");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
