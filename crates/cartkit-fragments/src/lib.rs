//! Cart fragment rendering and hash-based cache invalidation.
//!
//! Clients patch their DOM from named fragments and keep the last fragment
//! hash; when the hash changes, their cached markup is stale. The hash is a
//! digest over everything render-relevant: line items, coupons, identity,
//! and currency.

mod cookie;
mod fragments;
mod hash;
mod view;

pub use cookie::{HashCookie, FRAGMENTS_HASH_COOKIE};
pub use fragments::{FragmentRenderer, FragmentSet};
pub use hash::FragmentHasher;
pub use view::StateView;
