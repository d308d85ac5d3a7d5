//! Catalog lookup seam.
//!
//! The cart and the request layer never own product data; they look it up
//! through [`Catalog`]. [`MemoryCatalog`] is the in-memory implementation
//! used in tests and embeddings without an external product source.

use crate::catalog::{InventoryLevel, Product, Variation};
use crate::ids::{ProductId, VariationId};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Result of resolving a raw id that may name a product or a variation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalogEntry<'a> {
    Product(&'a Product),
    Variation(&'a Variation),
}

/// Read-only product, variation, and coupon lookups.
pub trait Catalog {
    /// Look up a product by id.
    fn product(&self, id: &ProductId) -> Option<&Product>;

    /// Look up a variation by id.
    fn variation(&self, id: &VariationId) -> Option<&Variation>;

    /// Best-effort match of posted attributes to one of the product's
    /// variations. Wildcard attributes match any posted value.
    fn match_variation(
        &self,
        product_id: &ProductId,
        posted: &BTreeMap<String, String>,
    ) -> Option<VariationId>;

    /// Whether a coupon code is known.
    fn coupon_exists(&self, code: &str) -> bool;

    /// Resolve a raw id that may name either a product or a variation.
    fn resolve(&self, id: &str) -> Option<CatalogEntry<'_>> {
        if let Some(product) = self.product(&ProductId::new(id)) {
            return Some(CatalogEntry::Product(product));
        }
        self.variation(&VariationId::new(id)).map(CatalogEntry::Variation)
    }

    /// Inventory for a line: the variation's if one is set, else the
    /// product's.
    fn inventory_for(
        &self,
        product_id: &ProductId,
        variation_id: Option<&VariationId>,
    ) -> Option<InventoryLevel> {
        match variation_id {
            Some(vid) => self.variation(vid).map(|v| v.inventory.clone()),
            None => self.product(product_id).map(|p| p.inventory.clone()),
        }
    }
}

/// In-memory catalog backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    products: HashMap<String, Product>,
    variations: HashMap<String, Variation>,
    coupons: HashSet<String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, product: Product) -> Self {
        self.products.insert(product.id.as_str().to_string(), product);
        self
    }

    pub fn with_variation(mut self, variation: Variation) -> Self {
        self.variations
            .insert(variation.id.as_str().to_string(), variation);
        self
    }

    pub fn with_coupon(mut self, code: impl Into<String>) -> Self {
        self.coupons.insert(code.into());
        self
    }
}

impl Catalog for MemoryCatalog {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id.as_str())
    }

    fn variation(&self, id: &VariationId) -> Option<&Variation> {
        self.variations.get(id.as_str())
    }

    fn match_variation(
        &self,
        product_id: &ProductId,
        posted: &BTreeMap<String, String>,
    ) -> Option<VariationId> {
        // Sort candidates so matching is deterministic across runs.
        let mut candidates: Vec<&Variation> = self
            .variations
            .values()
            .filter(|v| &v.product_id == product_id)
            .collect();
        candidates.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));

        candidates
            .into_iter()
            .find(|v| v.matches(posted))
            .map(|v| v.id.clone())
    }

    fn coupon_exists(&self, code: &str) -> bool {
        self.coupons.contains(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::AttributeValue;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_product(Product::variable("prod-1", "Hoodie"))
            .with_variation(
                Variation::new("var-red", "prod-1")
                    .with_attribute("color", AttributeValue::Value("red".into())),
            )
            .with_variation(
                Variation::new("var-blue", "prod-1")
                    .with_attribute("color", AttributeValue::Value("blue".into())),
            )
            .with_coupon("SAVE10")
    }

    #[test]
    fn test_resolve_product_and_variation() {
        let catalog = catalog();
        assert!(matches!(
            catalog.resolve("prod-1"),
            Some(CatalogEntry::Product(_))
        ));
        assert!(matches!(
            catalog.resolve("var-red"),
            Some(CatalogEntry::Variation(_))
        ));
        assert!(catalog.resolve("nope").is_none());
    }

    #[test]
    fn test_match_variation_by_attributes() {
        let catalog = catalog();
        let mut posted = BTreeMap::new();
        posted.insert("color".to_string(), "blue".to_string());

        let matched = catalog.match_variation(&ProductId::new("prod-1"), &posted);
        assert_eq!(matched, Some(VariationId::new("var-blue")));
    }

    #[test]
    fn test_match_variation_no_candidate() {
        let catalog = catalog();
        let mut posted = BTreeMap::new();
        posted.insert("color".to_string(), "green".to_string());

        assert!(catalog
            .match_variation(&ProductId::new("prod-1"), &posted)
            .is_none());
    }

    #[test]
    fn test_inventory_prefers_variation() {
        let catalog = MemoryCatalog::new()
            .with_product(
                Product::variable("prod-2", "Tee").with_inventory(InventoryLevel::new(3)),
            )
            .with_variation(
                Variation::new("var-s", "prod-2").with_inventory(InventoryLevel::new(7)),
            );

        let inv = catalog
            .inventory_for(&ProductId::new("prod-2"), Some(&VariationId::new("var-s")))
            .unwrap();
        assert_eq!(inv.available(), 7);
    }

    #[test]
    fn test_coupon_exists() {
        let catalog = catalog();
        assert!(catalog.coupon_exists("SAVE10"));
        assert!(!catalog.coupon_exists("SAVE20"));
    }
}
