//! Externally-cataloged product customs referenced by id.

use crate::ids::{CategoryId, ProductCustomId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Catalog visibility status of a product custom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductCustomStatus {
    Draft,
    #[default]
    Active,
    Archived,
}

impl ProductCustomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCustomStatus::Draft => "draft",
            ProductCustomStatus::Active => "active",
            ProductCustomStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(ProductCustomStatus::Draft),
            "active" => Some(ProductCustomStatus::Active),
            "archived" => Some(ProductCustomStatus::Archived),
            _ => None,
        }
    }
}

/// Stock numbers for one inventory location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StockRecord {
    /// Units on hand.
    pub current_stock: i64,
    /// Units reserved for pending orders.
    pub reserved_stock: i64,
}

impl StockRecord {
    pub fn new(current_stock: i64, reserved_stock: i64) -> Self {
        Self {
            current_stock,
            reserved_stock,
        }
    }

    /// Units available to sell (on hand minus reserved).
    pub fn available(&self) -> i64 {
        self.current_stock - self.reserved_stock
    }
}

/// A customizable product entity owned by the external catalog.
///
/// Referenced by id from endow and category selections; never owned here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCustom {
    /// Unique identifier in the catalog.
    pub id: ProductCustomId,
    /// Display name.
    pub name: String,
    /// Unit price, parsed from the wire's decimal string.
    pub price: Money,
    /// Display image, if any.
    pub image_url: Option<String>,
    /// Categories the product belongs to.
    pub category_ids: Vec<CategoryId>,
    /// Per-location stock records.
    pub inventories: Vec<StockRecord>,
}

impl ProductCustom {
    /// Total units available across every location.
    pub fn available_stock(&self) -> i64 {
        self.inventories.iter().map(StockRecord::available).sum()
    }

    /// Whether any location can sell a unit.
    pub fn is_in_stock(&self) -> bool {
        self.available_stock() > 0
    }
}

/// The catalog's wire representation of a product custom.
///
/// Prices arrive as decimal strings; [`RawProductCustom::parse`] converts
/// them exactly once at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawProductCustom {
    pub id: String,
    pub name: String,
    /// Price as a decimal string, e.g. "15000" or "49.99".
    pub price: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub inventories: Vec<StockRecord>,
}

impl RawProductCustom {
    /// Parse the wire form. `None` when the price string is not a number.
    pub fn parse(self, currency: Currency) -> Option<ProductCustom> {
        let price = Money::from_decimal_str(&self.price, currency)?;
        Some(ProductCustom {
            id: ProductCustomId::new(self.id),
            name: self.name,
            price,
            image_url: self.image_url,
            category_ids: self.category_ids.into_iter().map(CategoryId::new).collect(),
            inventories: self.inventories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: &str, price: &str) -> RawProductCustom {
        RawProductCustom {
            id: id.to_string(),
            name: format!("Product {id}"),
            price: price.to_string(),
            image_url: None,
            category_ids: vec!["lego".to_string()],
            inventories: vec![StockRecord::new(10, 3)],
        }
    }

    #[test]
    fn test_parse_decimal_string_price() {
        let product = raw("pc-1", "15000").parse(Currency::VND).unwrap();
        assert_eq!(product.price.amount, 15000);
        assert_eq!(product.category_ids, vec![CategoryId::new("lego")]);
    }

    #[test]
    fn test_parse_rejects_bad_price() {
        assert!(raw("pc-1", "free").parse(Currency::VND).is_none());
    }

    #[test]
    fn test_available_stock() {
        let mut product = raw("pc-1", "15000").parse(Currency::VND).unwrap();
        assert_eq!(product.available_stock(), 7);
        assert!(product.is_in_stock());

        product.inventories = vec![StockRecord::new(5, 5)];
        assert!(!product.is_in_stock());
    }

    #[test]
    fn test_status_round_trip() {
        assert_eq!(
            ProductCustomStatus::from_str("active"),
            Some(ProductCustomStatus::Active)
        );
        assert_eq!(ProductCustomStatus::Active.as_str(), "active");
        assert_eq!(ProductCustomStatus::from_str("retired"), None);
    }
}
