//! Product catalog with a case-insensitive search filter.
//!
//! DESIGN
//! ======
//! The catalog is fetched once per session and never mutated afterwards.
//! The filtered view is cached and recomputed synchronously whenever the
//! product list or the query changes, so readers never see a stale list.
//!
//! A failed load is a soft failure: the catalog stays empty, the failure is
//! logged, and manual text entry keeps working.

use serde::{Deserialize, Serialize};

use crate::api::{AnalysisApi, CatalogLoadError};

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

/// A product the user can pick for one-click analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
}

impl Product {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of the one-time catalog fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatalogStatus {
    #[default]
    NotLoaded,
    Loaded,
    /// The fetch failed; the catalog is empty for the rest of the session.
    Unavailable,
}

/// Return the products whose name contains `query`, ignoring case.
///
/// An empty query matches everything. Catalog order is preserved.
#[must_use]
pub fn filter_products(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Catalog state: the full product list, the search text, and the derived
/// filtered view.
#[derive(Clone, Debug, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    query: String,
    filtered: Vec<Product>,
    status: CatalogStatus,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Products matching the current query, in catalog order.
    #[must_use]
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    #[must_use]
    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// Record the result of the catalog fetch.
    ///
    /// Only the first result is applied; the catalog is read-only once a
    /// load has been recorded.
    pub fn apply_load(&mut self, result: Result<Vec<Product>, CatalogLoadError>) {
        if self.status != CatalogStatus::NotLoaded {
            log::debug!("catalog: ignoring repeated load result");
            return;
        }
        match result {
            Ok(products) => {
                log::info!("catalog: loaded {} products", products.len());
                self.products = products;
                self.status = CatalogStatus::Loaded;
            }
            Err(e) => {
                log::warn!("catalog: {e}; continuing with an empty catalog");
                self.products.clear();
                self.status = CatalogStatus::Unavailable;
            }
        }
        self.refilter();
    }

    /// Fetch the catalog through `api` and record the result.
    pub async fn load<A>(&mut self, api: &A)
    where
        A: AnalysisApi + ?Sized,
    {
        if self.status != CatalogStatus::NotLoaded {
            return;
        }
        let result = api.fetch_products().await;
        self.apply_load(result);
    }

    fn refilter(&mut self) {
        self.filtered = filter_products(&self.products, &self.query);
    }
}
