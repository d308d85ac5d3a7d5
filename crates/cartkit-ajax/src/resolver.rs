//! Variable-product resolution.
//!
//! Turns a posted product id, optional variation id, and raw
//! `attribute_<slug>` selections into a validated (product, variation,
//! attributes) triple, or a typed failure. No mutation happens here.

use crate::sanitize::{clean, decode_entities, format_list, slugify};
use cartkit_commerce::catalog::{AttributeValue, Catalog, CatalogEntry};
use cartkit_commerce::{ProductId, VariationId};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a posted selection could not be resolved to a purchasable variation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VariationError {
    /// Posted product id is unknown.
    #[error("Product not found: {0}")]
    UnknownProduct(String),

    /// Posted or matched variation id is unknown, or belongs to another
    /// product.
    #[error("Variation not found: {0}")]
    UnknownVariation(String),

    /// No variation id posted and none matched the posted attributes.
    #[error("Please choose product options.")]
    ChooseOptions,

    /// Variation-defining attributes unposted, mismatched, or invalid,
    /// listed by human label.
    #[error("{}", required_fields_message(.0))]
    MissingAttributes(Vec<String>),
}

fn required_fields_message(labels: &[String]) -> String {
    if labels.len() == 1 {
        format!("{} is a required field", labels[0])
    } else {
        format!("{} are required fields", format_list(labels))
    }
}

/// A fully validated selection, ready to add to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub product_id: ProductId,
    pub variation_id: VariationId,
    /// Validated attribute values, keyed by attribute slug.
    pub attributes: BTreeMap<String, String>,
}

/// Resolve a posted selection against the catalog.
///
/// The posted product id may actually name a variation; the true parent is
/// derived in that case. When no variation id is posted, the catalog is
/// asked to match one from the posted attributes.
pub fn resolve_selection(
    catalog: &dyn Catalog,
    raw_product_id: &str,
    posted_variation: Option<&VariationId>,
    posted: &BTreeMap<String, String>,
) -> Result<ResolvedSelection, VariationError> {
    // Normalize: a variation id posted in the product id slot yields its
    // parent product.
    let (product_id, derived_variation) = match catalog.resolve(raw_product_id) {
        Some(CatalogEntry::Product(product)) => (product.id.clone(), None),
        Some(CatalogEntry::Variation(variation)) => {
            (variation.product_id.clone(), Some(variation.id.clone()))
        }
        None => return Err(VariationError::UnknownProduct(raw_product_id.to_string())),
    };
    let product = catalog
        .product(&product_id)
        .ok_or_else(|| VariationError::UnknownProduct(product_id.to_string()))?;

    // Sanitized posted value per variation-defining attribute.
    let mut posted_values: BTreeMap<String, String> = BTreeMap::new();
    for attribute in product.variation_attributes() {
        if let Some(raw) = posted.get(&attribute.name) {
            let value = if attribute.taxonomy {
                slugify(raw)
            } else {
                decode_entities(&clean(raw))
            };
            posted_values.insert(attribute.name.clone(), value);
        }
    }

    let variation_id = posted_variation
        .cloned()
        .or(derived_variation)
        .or_else(|| catalog.match_variation(&product_id, &posted_values))
        .ok_or(VariationError::ChooseOptions)?;

    let variation = catalog
        .variation(&variation_id)
        .filter(|v| v.product_id == product_id)
        .ok_or_else(|| VariationError::UnknownVariation(variation_id.to_string()))?;

    let mut validated: BTreeMap<String, String> = BTreeMap::new();
    let mut missing: Vec<String> = Vec::new();
    for attribute in product.variation_attributes() {
        let Some(value) = posted_values.get(&attribute.name) else {
            missing.push(attribute.label.clone());
            continue;
        };

        // A declared concrete value must match exactly; a wildcard (or an
        // undeclared attribute) accepts only globally valid slugs.
        let accepted = match variation
            .attributes
            .get(&attribute.name)
            .and_then(AttributeValue::expected)
        {
            Some(expected) => expected == value,
            None => attribute.has_option(value),
        };

        if accepted {
            validated.insert(attribute.name.clone(), value.clone());
        } else {
            missing.push(attribute.label.clone());
        }
    }

    if !missing.is_empty() {
        return Err(VariationError::MissingAttributes(missing));
    }

    Ok(ResolvedSelection {
        product_id,
        variation_id,
        attributes: validated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartkit_commerce::catalog::{MemoryCatalog, Product, ProductAttribute, Variation};

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_product(
                Product::variable("hoodie", "Zip Hoodie")
                    .with_attribute(
                        ProductAttribute::new("color", "Color", true, true)
                            .with_options(["red", "blue"]),
                    )
                    .with_attribute(
                        ProductAttribute::new("size", "Size", true, true)
                            .with_options(["s", "m", "l"]),
                    )
                    .with_attribute(ProductAttribute::new("material", "Material", true, false)),
            )
            .with_variation(
                Variation::new("hoodie-red", "hoodie")
                    .with_attribute("color", AttributeValue::Value("red".into()))
                    .with_attribute("size", AttributeValue::Any),
            )
            .with_variation(
                Variation::new("hoodie-blue", "hoodie")
                    .with_attribute("color", AttributeValue::Value("blue".into()))
                    .with_attribute("size", AttributeValue::Any),
            )
    }

    fn posted(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_resolves_with_explicit_variation() {
        let catalog = catalog();
        let selection = resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("hoodie-red")),
            &posted(&[("color", "red"), ("size", "m")]),
        )
        .unwrap();

        assert_eq!(selection.variation_id, VariationId::new("hoodie-red"));
        assert_eq!(selection.attributes["color"], "red");
        assert_eq!(selection.attributes["size"], "m");
    }

    #[test]
    fn test_matches_variation_from_attributes() {
        let catalog = catalog();
        let selection = resolve_selection(
            &catalog,
            "hoodie",
            None,
            &posted(&[("color", "blue"), ("size", "s")]),
        )
        .unwrap();

        assert_eq!(selection.variation_id, VariationId::new("hoodie-blue"));
    }

    #[test]
    fn test_variation_id_in_product_slot_is_normalized() {
        let catalog = catalog();
        let selection = resolve_selection(
            &catalog,
            "hoodie-red",
            None,
            &posted(&[("color", "red"), ("size", "l")]),
        )
        .unwrap();

        assert_eq!(selection.product_id, ProductId::new("hoodie"));
        assert_eq!(selection.variation_id, VariationId::new("hoodie-red"));
    }

    #[test]
    fn test_no_match_asks_for_options() {
        let catalog = catalog();
        let err = resolve_selection(
            &catalog,
            "hoodie",
            None,
            &posted(&[("color", "green")]),
        )
        .unwrap_err();
        assert_eq!(err, VariationError::ChooseOptions);
        assert_eq!(err.to_string(), "Please choose product options.");
    }

    #[test]
    fn test_missing_attributes_lists_variation_ones_only() {
        let catalog = catalog();
        let err = resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("hoodie-red")),
            &posted(&[("color", "red"), ("material", "fleece")]),
        )
        .unwrap_err();

        assert_eq!(err, VariationError::MissingAttributes(vec!["Size".into()]));
        assert_eq!(err.to_string(), "Size is a required field");
    }

    #[test]
    fn test_missing_attributes_pluralizes() {
        let catalog = catalog();
        let err = resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("hoodie-red")),
            &posted(&[]),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Color and Size are required fields"
        );
    }

    #[test]
    fn test_mismatch_is_recorded_as_missing() {
        let catalog = catalog();
        let err = resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("hoodie-red")),
            &posted(&[("color", "blue"), ("size", "m")]),
        )
        .unwrap_err();

        assert_eq!(err, VariationError::MissingAttributes(vec!["Color".into()]));
    }

    #[test]
    fn test_wildcard_requires_globally_valid_slug() {
        let catalog = catalog();

        // "m" is a known size slug.
        assert!(resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("hoodie-red")),
            &posted(&[("color", "red"), ("size", "m")]),
        )
        .is_ok());

        // "xxl" is not, even though the variation declares size as Any.
        let err = resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("hoodie-red")),
            &posted(&[("color", "red"), ("size", "xxl")]),
        )
        .unwrap_err();
        assert_eq!(err, VariationError::MissingAttributes(vec!["Size".into()]));
    }

    #[test]
    fn test_taxonomy_values_are_slug_normalized() {
        let catalog = catalog();
        let selection = resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("hoodie-red")),
            &posted(&[("color", "Red"), ("size", " M ")]),
        )
        .unwrap();

        assert_eq!(selection.attributes["color"], "red");
        assert_eq!(selection.attributes["size"], "m");
    }

    #[test]
    fn test_foreign_variation_rejected() {
        let catalog = catalog().with_variation(Variation::new("other-var", "other-product"));
        let err = resolve_selection(
            &catalog,
            "hoodie",
            Some(&VariationId::new("other-var")),
            &posted(&[("color", "red"), ("size", "m")]),
        )
        .unwrap_err();
        assert_eq!(err, VariationError::UnknownVariation("other-var".into()));
    }

    #[test]
    fn test_unknown_product() {
        let catalog = catalog();
        let err = resolve_selection(&catalog, "ghost", None, &posted(&[])).unwrap_err();
        assert_eq!(err, VariationError::UnknownProduct("ghost".into()));
    }
}
