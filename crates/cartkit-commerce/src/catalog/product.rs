//! Product and attribute types.

use crate::catalog::InventoryLevel;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Product type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProductType {
    /// Simple product with no variations.
    #[default]
    Simple,
    /// Product purchased as one of its variations.
    Variable,
}

impl ProductType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::Simple => "simple",
            ProductType::Variable => "variable",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" => Some(ProductType::Simple),
            "variable" => Some(ProductType::Variable),
            _ => None,
        }
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Type of product.
    pub product_type: ProductType,
    /// Attributes, only meaningful for variable products.
    pub attributes: Vec<ProductAttribute>,
    /// Inventory level. Variations carry their own.
    pub inventory: InventoryLevel,
}

impl Product {
    /// Create a new simple product with untracked stock.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            product_type: ProductType::Simple,
            attributes: Vec::new(),
            inventory: InventoryLevel::untracked(),
        }
    }

    /// Create a new variable product.
    pub fn variable(id: impl Into<ProductId>, name: impl Into<String>) -> Self {
        let mut product = Self::new(id, name);
        product.product_type = ProductType::Variable;
        product
    }

    /// Set the inventory level.
    pub fn with_inventory(mut self, inventory: InventoryLevel) -> Self {
        self.inventory = inventory;
        self
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, attribute: ProductAttribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Check if this product is purchased through variations.
    pub fn is_variable(&self) -> bool {
        self.product_type == ProductType::Variable
    }

    /// Attributes that define variations, in declaration order.
    pub fn variation_attributes(&self) -> impl Iterator<Item = &ProductAttribute> {
        self.attributes.iter().filter(|a| a.variation)
    }
}

/// An attribute of a variable product (e.g., "color").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductAttribute {
    /// Attribute slug, as used in posted `attribute_<slug>` fields.
    pub name: String,
    /// Human-readable label (e.g., "Color").
    pub label: String,
    /// Taxonomy-backed attributes hold slugs; others hold free text.
    pub taxonomy: bool,
    /// Whether this attribute participates in variation selection.
    pub variation: bool,
    /// Globally known valid slugs for this attribute.
    pub options: Vec<String>,
}

impl ProductAttribute {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        taxonomy: bool,
        variation: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            taxonomy,
            variation,
            options: Vec::new(),
        }
    }

    /// Set the globally valid option slugs.
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Check whether a value is one of the globally valid slugs.
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }
}
