//! Per-screen catalog session cache.
//!
//! Results of the screen's fire-and-forget catalog requests are merged here
//! as they resolve. Entries are keyed by id, so a slow response can only
//! ever overwrite the entry for its own key (last-resolved-wins per key,
//! not per request). Closing the session discards anything that resolves
//! after teardown.

use crate::catalog::{CatalogError, CatalogPage, ProductCustom, ProductCustomCatalog, ProductCustomStatus};
use crate::ids::{CategoryId, ProductCustomId, ProductId};
use crate::money::Money;
use craft_cache::{CacheKey, EntityKind, Store};
use std::collections::HashMap;

/// Cached catalog state for one customization screen.
#[derive(Debug, Default)]
pub struct CatalogSession {
    store: Store,
    groups: HashMap<CategoryId, Vec<ProductCustom>>,
    closed: bool,
}

impl CatalogSession {
    /// Open a session for a fresh screen.
    pub fn new() -> Self {
        Self::default()
    }

    fn price_key(id: &ProductCustomId) -> CacheKey {
        CacheKey::new(EntityKind::ProductCustom, id.as_str())
    }

    fn capability_key(id: &ProductId) -> CacheKey {
        CacheKey::new(EntityKind::BackgroundCapability, id.as_str())
    }

    /// Merge one resolved catalog page, grouping products per category and
    /// caching each product's price by id.
    pub fn merge_catalog(&mut self, page: CatalogPage) {
        if self.closed {
            return;
        }
        for product in page.data {
            self.merge_price(&product.id, product.price);
            for category in &product.category_ids {
                let group = self.groups.entry(category.clone()).or_default();
                match group.iter_mut().find(|p| p.id == product.id) {
                    Some(existing) => *existing = product.clone(),
                    None => group.push(product.clone()),
                }
            }
        }
    }

    /// Merge one resolved price. Overwrites only this id's entry.
    pub fn merge_price(&mut self, id: &ProductCustomId, price: Money) {
        if self.closed {
            return;
        }
        // Store writes are infallible for Money; a serialization failure
        // here would mean a bug in the type itself.
        let _ = self.store.set(&Self::price_key(id), &price);
    }

    /// Merge the background-customization capability for a product.
    pub fn merge_background_capability(&mut self, product_id: &ProductId, capable: bool) {
        if self.closed {
            return;
        }
        let _ = self.store.set(&Self::capability_key(product_id), &capable);
    }

    /// The resolved price for a product custom, if one has arrived.
    pub fn price_of(&self, id: &ProductCustomId) -> Option<Money> {
        self.store.get(&Self::price_key(id)).ok().flatten()
    }

    /// The cached capability flag for a product, if resolved.
    pub fn background_capability(&self, product_id: &ProductId) -> Option<bool> {
        self.store.get(&Self::capability_key(product_id)).ok().flatten()
    }

    /// Products grouped under a category. Empty until the catalog resolves.
    pub fn products_in(&self, category_id: &CategoryId) -> &[ProductCustom] {
        self.groups
            .get(category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// A price lookup closure for [`crate::pricing::compute_total`].
    pub fn price_lookup(&self) -> impl Fn(&ProductCustomId) -> Option<Money> + '_ {
        move |id| self.price_of(id)
    }

    /// Fetch the screen's initial data: the category-grouped catalog and
    /// the product's background-customization capability, each once.
    pub async fn load(
        &mut self,
        catalog: &dyn ProductCustomCatalog,
        product_id: &ProductId,
        limit: usize,
    ) -> Result<(), CatalogError> {
        let page = catalog
            .product_customs_by_category(ProductCustomStatus::Active, limit)
            .await?;
        let capable = catalog.has_background_customization(product_id).await?;
        self.merge_catalog(page);
        self.merge_background_capability(product_id, capable);
        Ok(())
    }

    /// Resolve and cache the price of one referenced product custom.
    ///
    /// A lookup failure leaves the entry absent; the referencing row shows
    /// an id-only placeholder and prices as zero until re-resolved.
    pub async fn ensure_price(
        &mut self,
        catalog: &dyn ProductCustomCatalog,
        id: &ProductCustomId,
    ) {
        if self.price_of(id).is_some() {
            return;
        }
        match catalog.product_custom_by_id(id).await {
            Ok(product) => self.merge_price(id, product.price),
            Err(e) => {
                tracing::warn!(product_custom = %id, error = %e, "price lookup failed");
            }
        }
    }

    /// Discard in-flight results from now on; the screen has unmounted.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
