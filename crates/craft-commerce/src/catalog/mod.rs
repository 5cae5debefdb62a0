//! External catalog module.
//!
//! Contains the product-custom types, the async lookup contracts the
//! embedding application implements, and the per-screen session cache.

mod lookup;
mod product_custom;
mod session;

pub use lookup::{CatalogError, CatalogPage, ProductCustomCatalog};
pub use product_custom::{ProductCustom, ProductCustomStatus, RawProductCustom, StockRecord};
pub use session::CatalogSession;
