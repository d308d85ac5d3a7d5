//! Cart error types.

use thiserror::Error;

/// Errors that can occur while mutating a cart.
///
/// Messages are written to be shown to shoppers as-is; the request layer
/// turns them into notices.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Variation not found, or not a child of the given product.
    #[error("Variation not found: {0}")]
    VariationNotFound(String),

    /// Line item not present in the cart.
    #[error("Cart item not found: {0}")]
    ItemNotFound(String),

    /// Quantity must be positive for an add.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Requested quantity exceeds tracked stock. `available` is the stock
    /// level, `in_cart` the quantity already held for the same item.
    #[error("You cannot add that amount to the cart. We have {available} in stock and you already have {in_cart} in your cart.")]
    NotEnoughStock { available: i64, in_cart: i64 },

    /// Coupon code unknown to the catalog.
    #[error("Coupon \"{0}\" does not exist.")]
    CouponNotFound(String),

    /// Coupon code already applied to this cart.
    #[error("Coupon code already applied.")]
    CouponAlreadyApplied(String),
}
