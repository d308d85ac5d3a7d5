//! Extension points.
//!
//! Hosts extend the handler with ordered closure lists. Validators short
//! circuit: the first rejection wins and its notice becomes the response
//! message. Listeners are side effects only.

use cartkit_commerce::{ItemKey, Notice, ProductId, VariationId};
use std::collections::BTreeMap;

/// Input to add-to-cart validators.
#[derive(Debug)]
pub struct AddCheck<'a> {
    pub product_id: &'a ProductId,
    pub variation_id: Option<&'a VariationId>,
    pub quantity: i64,
    pub attributes: &'a BTreeMap<String, String>,
}

/// Input to update-cart validators.
#[derive(Debug)]
pub struct QuantityCheck<'a> {
    pub item_key: &'a ItemKey,
    pub product_id: &'a ProductId,
    pub quantity: i64,
}

/// Details of a completed add, passed to listeners.
#[derive(Debug)]
pub struct AddedToCart<'a> {
    pub item_key: &'a ItemKey,
    pub product_id: &'a ProductId,
    pub quantity: i64,
}

pub type AddValidator = Box<dyn Fn(&AddCheck<'_>) -> Result<(), Notice> + Send + Sync>;
pub type QuantityValidator = Box<dyn Fn(&QuantityCheck<'_>) -> Result<(), Notice> + Send + Sync>;
pub type AddedListener = Box<dyn Fn(&AddedToCart<'_>) + Send + Sync>;
