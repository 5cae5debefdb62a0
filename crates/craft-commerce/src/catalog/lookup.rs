//! Catalog lookup contracts consumed by the engine.

use crate::catalog::{ProductCustom, ProductCustomStatus};
use crate::ids::{ProductCustomId, ProductId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the external catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport failure reaching the catalog.
    #[error("Catalog request failed: {0}")]
    Request(String),

    /// The referenced entity does not exist.
    #[error("Product custom not found: {0}")]
    NotFound(String),

    /// The catalog returned a payload the boundary could not parse.
    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

/// One page of catalog results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    pub data: Vec<ProductCustom>,
}

/// The external product-custom catalog.
///
/// Implemented by the embedding application over its HTTP client; the
/// engine only consumes the interface.
#[async_trait]
pub trait ProductCustomCatalog: Send + Sync {
    /// Fetch catalog products for category grouping, filtered by status.
    async fn product_customs_by_category(
        &self,
        status: ProductCustomStatus,
        limit: usize,
    ) -> Result<CatalogPage, CatalogError>;

    /// Fetch a single product custom by id.
    async fn product_custom_by_id(
        &self,
        id: &ProductCustomId,
    ) -> Result<ProductCustom, CatalogError>;

    /// Whether a product exposes background customization.
    async fn has_background_customization(
        &self,
        product_id: &ProductId,
    ) -> Result<bool, CatalogError>;
}
