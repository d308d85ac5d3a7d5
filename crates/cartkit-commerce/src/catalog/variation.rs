//! Concrete purchasable variations of a variable product.

use crate::catalog::InventoryLevel;
use crate::ids::{ProductId, VariationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The value a variation expects for one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A fixed value the posted selection must match exactly.
    Value(String),
    /// Wildcard: the variation accepts any valid value for the attribute.
    Any,
}

impl AttributeValue {
    /// The expected concrete value. Wildcards expect nothing fixed; the
    /// resolver falls back to the attribute's globally valid slugs.
    pub fn expected(&self) -> Option<&str> {
        match self {
            AttributeValue::Value(v) => Some(v),
            AttributeValue::Any => None,
        }
    }
}

/// A concrete purchasable child of a variable product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variation {
    /// Unique variation identifier.
    pub id: VariationId,
    /// Parent product ID.
    pub product_id: ProductId,
    /// Expected value per attribute slug.
    pub attributes: BTreeMap<String, AttributeValue>,
    /// Inventory level for this variation.
    pub inventory: InventoryLevel,
}

impl Variation {
    pub fn new(id: impl Into<VariationId>, product_id: impl Into<ProductId>) -> Self {
        Self {
            id: id.into(),
            product_id: product_id.into(),
            attributes: BTreeMap::new(),
            inventory: InventoryLevel::untracked(),
        }
    }

    /// Declare an expected attribute value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Set the inventory level.
    pub fn with_inventory(mut self, inventory: InventoryLevel) -> Self {
        self.inventory = inventory;
        self
    }

    /// Whether the posted attribute map satisfies every declared attribute.
    /// Used for best-effort matching when no variation id was posted.
    pub fn matches(&self, posted: &BTreeMap<String, String>) -> bool {
        self.attributes.iter().all(|(name, value)| match value {
            AttributeValue::Any => true,
            AttributeValue::Value(v) => posted.get(name).map(String::as_str) == Some(v.as_str()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_value() {
        let value = AttributeValue::Value("red".into());
        assert_eq!(value.expected(), Some("red"));
        assert_eq!(AttributeValue::Any.expected(), None);
    }

    #[test]
    fn test_matches_posted_attributes() {
        let variation = Variation::new("var-1", "prod-1")
            .with_attribute("color", AttributeValue::Value("red".into()))
            .with_attribute("size", AttributeValue::Any);

        let mut posted = BTreeMap::new();
        posted.insert("color".to_string(), "red".to_string());
        assert!(variation.matches(&posted));

        posted.insert("color".to_string(), "blue".to_string());
        assert!(!variation.matches(&posted));
    }
}
