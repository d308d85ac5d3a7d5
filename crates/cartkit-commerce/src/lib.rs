//! Cart, catalog, and coupon domain types for CartKit.
//!
//! This crate provides the storefront-side cart engine:
//!
//! - **Catalog**: products, variable-product attributes, variations, inventory
//! - **Cart**: session cart with line items and applied coupon codes
//! - **Notices**: human-readable messages returned from mutation attempts
//!
//! The cart is a plain value owned by the caller (typically a per-request
//! session context). Mutations that can fail return `Result` with a typed
//! [`CartError`]; nothing is accumulated in process-wide state.

pub mod cart;
pub mod catalog;
pub mod currency;
pub mod error;
pub mod ids;
pub mod notice;

pub use cart::{Cart, LineItem};
pub use currency::Currency;
pub use error::CartError;
pub use ids::*;
pub use notice::{Notice, NoticeList};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem, SessionLineItem};
    pub use crate::catalog::{
        AttributeValue, Catalog, CatalogEntry, InventoryLevel, MemoryCatalog, Product,
        ProductAttribute, ProductType, Variation,
    };
    pub use crate::currency::Currency;
    pub use crate::error::CartError;
    pub use crate::ids::*;
    pub use crate::notice::{Notice, NoticeList};
}
