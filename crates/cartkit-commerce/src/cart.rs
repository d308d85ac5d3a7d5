//! Cart and line item types.

use crate::catalog::Catalog;
use crate::error::CartError;
use crate::ids::{ItemKey, ProductId, VariationId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// A session shopping cart.
///
/// The cart holds line items and applied coupon codes and nothing else;
/// prices, taxes, and shipping belong to the surrounding storefront. Owned
/// by a per-request context, so the single-writer-per-session assumption is
/// visible in the `&mut` borrows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Cart {
    /// Items in the cart, in insertion order.
    items: Vec<LineItem>,
    /// Applied coupon codes, in application order.
    coupons: Vec<String>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to the cart, merging quantities when the same selection
    /// is already present.
    ///
    /// Returns an error if:
    /// - Quantity is not positive
    /// - The product or variation is unknown to the catalog
    /// - Tracked stock cannot cover the cart total after the add
    pub fn add_item(
        &mut self,
        catalog: &dyn Catalog,
        product_id: &ProductId,
        variation_id: Option<&VariationId>,
        attributes: BTreeMap<String, String>,
        quantity: i64,
    ) -> Result<ItemKey, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        if catalog.product(product_id).is_none() {
            return Err(CartError::ProductNotFound(product_id.to_string()));
        }

        if let Some(vid) = variation_id {
            let variation = catalog
                .variation(vid)
                .ok_or_else(|| CartError::VariationNotFound(vid.to_string()))?;
            if &variation.product_id != product_id {
                return Err(CartError::VariationNotFound(vid.to_string()));
            }
        }

        let key = LineItem::key_for(product_id, variation_id, &attributes);
        let in_cart = self
            .get_item(&key)
            .map(|item| item.quantity)
            .unwrap_or(0);

        // Stock is checked against the cart total for this item, not the
        // increment alone.
        if let Some(inventory) = catalog.inventory_for(product_id, variation_id) {
            if inventory.track_inventory && !inventory.can_fulfill(in_cart + quantity) {
                return Err(CartError::NotEnoughStock {
                    available: inventory.available(),
                    in_cart,
                });
            }
        }

        if let Some(existing) = self.items.iter_mut().find(|item| item.key == key) {
            existing.quantity += quantity;
        } else {
            self.items.push(LineItem {
                key: key.clone(),
                product_id: product_id.clone(),
                variation_id: variation_id.cloned(),
                attributes,
                quantity,
            });
        }

        Ok(key)
    }

    /// Remove an item by key. Removing an absent key is a no-op.
    pub fn remove_item(&mut self, key: &ItemKey) -> bool {
        let len_before = self.items.len();
        self.items.retain(|item| &item.key != key);
        self.items.len() < len_before
    }

    /// Set an item's quantity. Zero or less removes the item. Returns
    /// whether a matching item was found.
    pub fn set_quantity(&mut self, key: &ItemKey, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(key);
        }

        if let Some(item) = self.items.iter_mut().find(|item| &item.key == key) {
            item.quantity = quantity;
            true
        } else {
            false
        }
    }

    /// Get an item by key.
    pub fn get_item(&self, key: &ItemKey) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.key == key)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply a coupon code.
    pub fn apply_coupon(&mut self, catalog: &dyn Catalog, code: &str) -> Result<(), CartError> {
        if !catalog.coupon_exists(code) {
            return Err(CartError::CouponNotFound(code.to_string()));
        }
        if self.has_coupon(code) {
            return Err(CartError::CouponAlreadyApplied(code.to_string()));
        }
        self.coupons.push(code.to_string());
        Ok(())
    }

    /// Remove a coupon by code. Returns whether the code was applied.
    pub fn remove_coupon(&mut self, code: &str) -> bool {
        let len_before = self.coupons.len();
        self.coupons.retain(|c| c != code);
        self.coupons.len() < len_before
    }

    /// Whether a coupon code is applied.
    pub fn has_coupon(&self, code: &str) -> bool {
        self.coupons.iter().any(|c| c == code)
    }

    /// Applied coupon codes, in application order.
    pub fn coupons(&self) -> &[String] {
        &self.coupons
    }

    /// The session-relevant view of the cart, keyed by item key.
    ///
    /// This is the canonical form fed to the fragment hash: a sorted map of
    /// everything that matters for rendering, nothing else.
    pub fn session_view(&self) -> BTreeMap<String, SessionLineItem> {
        self.items
            .iter()
            .map(|item| {
                (
                    item.key.as_str().to_string(),
                    SessionLineItem {
                        product_id: item.product_id.as_str().to_string(),
                        variation_id: item.variation_id.as_ref().map(|v| v.as_str().to_string()),
                        quantity: item.quantity,
                        attributes: item.attributes.clone(),
                    },
                )
            })
            .collect()
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Key identifying this selection, stable within a session.
    pub key: ItemKey,
    /// Product being purchased.
    pub product_id: ProductId,
    /// Variation, for variable products.
    pub variation_id: Option<VariationId>,
    /// Validated attribute selection, keyed by attribute slug.
    pub attributes: BTreeMap<String, String>,
    /// Quantity, always positive while stored.
    pub quantity: i64,
}

impl LineItem {
    /// Derive the item key for a selection.
    ///
    /// The key is a digest of product, variation, and the canonical
    /// attribute map, so identical selections always land on the same line.
    pub fn key_for(
        product_id: &ProductId,
        variation_id: Option<&VariationId>,
        attributes: &BTreeMap<String, String>,
    ) -> ItemKey {
        let mut hasher = Sha256::new();
        hasher.update(product_id.as_str().as_bytes());
        hasher.update([0u8]);
        if let Some(vid) = variation_id {
            hasher.update(vid.as_str().as_bytes());
        }
        hasher.update([0u8]);
        for (name, value) in attributes {
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(value.as_bytes());
            hasher.update([0u8]);
        }
        ItemKey::new(hex::encode(hasher.finalize()))
    }
}

/// The hash-relevant projection of one line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionLineItem {
    pub product_id: String,
    pub variation_id: Option<String>,
    pub quantity: i64,
    pub attributes: BTreeMap<String, String>,
}
