use super::*;
use crate::api::RequestFailure;

fn sample() -> Vec<Product> {
    vec![Product::new("Peanut Bar"), Product::new("Rice Cake")]
}

// =============================================================
// filter_products
// =============================================================

#[test]
fn filter_matches_substring_case_insensitively() {
    let filtered = filter_products(&sample(), "pea");
    assert_eq!(filtered, vec![Product::new("Peanut Bar")]);

    let filtered = filter_products(&sample(), "CAKE");
    assert_eq!(filtered, vec![Product::new("Rice Cake")]);
}

#[test]
fn filter_empty_query_returns_all_in_order() {
    assert_eq!(filter_products(&sample(), ""), sample());
}

#[test]
fn filter_preserves_catalog_order() {
    let products = vec![Product::new("Oat Bar"), Product::new("Almond Milk"), Product::new("Barley Tea")];
    let names: Vec<_> = filter_products(&products, "bar").into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Oat Bar", "Barley Tea"]);
}

#[test]
fn filter_is_idempotent() {
    let products = sample();
    assert_eq!(filter_products(&products, "e"), filter_products(&products, "e"));
}

#[test]
fn filter_without_match_is_empty() {
    assert!(filter_products(&sample(), "quinoa").is_empty());
}

// =============================================================
// CatalogStore
// =============================================================

#[test]
fn store_starts_empty_and_not_loaded() {
    let store = CatalogStore::new();
    assert!(store.products().is_empty());
    assert!(store.filtered().is_empty());
    assert_eq!(store.query(), "");
    assert_eq!(store.status(), CatalogStatus::NotLoaded);
}

#[test]
fn store_query_recomputes_filtered_view() {
    let mut store = CatalogStore::new();
    store.apply_load(Ok(sample()));
    assert_eq!(store.filtered(), sample().as_slice());

    store.set_query("pea");
    assert_eq!(store.filtered(), &[Product::new("Peanut Bar")]);

    store.set_query("");
    assert_eq!(store.filtered().len(), 2);
}

#[test]
fn store_query_set_before_load_applies_after_load() {
    let mut store = CatalogStore::new();
    store.set_query("rice");
    assert!(store.filtered().is_empty());

    store.apply_load(Ok(sample()));
    assert_eq!(store.filtered(), &[Product::new("Rice Cake")]);
}

#[test]
fn store_failed_load_degrades_to_empty() {
    let mut store = CatalogStore::new();
    store.apply_load(Err(CatalogLoadError(RequestFailure::Network("connection refused".into()))));
    assert!(store.products().is_empty());
    assert!(store.filtered().is_empty());
    assert_eq!(store.status(), CatalogStatus::Unavailable);
}

#[test]
fn store_ignores_second_load() {
    let mut store = CatalogStore::new();
    store.apply_load(Ok(sample()));
    store.apply_load(Ok(vec![Product::new("Other")]));
    assert_eq!(store.products(), sample().as_slice());
    assert_eq!(store.status(), CatalogStatus::Loaded);
}
