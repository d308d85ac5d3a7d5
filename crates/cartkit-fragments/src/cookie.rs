//! Fragment hash cookie.
//!
//! Non-AJAX page loads read the last-known hash from a cookie and compare
//! it to the current one to detect stale cached markup without refetching
//! fragments.

use crate::hash::FragmentHasher;
use crate::view::StateView;
use serde::Serialize;

/// Cookie name carrying the last-known fragment hash.
pub const FRAGMENTS_HASH_COOKIE: &str = "cart_fragments_hash";

/// The fragment hash cookie as set at the end of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashCookie {
    pub name: &'static str,
    pub value: String,
}

impl HashCookie {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            name: FRAGMENTS_HASH_COOKIE,
            value: hash.into(),
        }
    }

    /// Compute the cookie for the current state.
    pub fn refresh(view: &StateView<'_>, hasher: &FragmentHasher) -> Self {
        Self::new(hasher.hash(view))
    }

    /// Whether the cookie no longer matches the current hash.
    pub fn is_stale(&self, current_hash: &str) -> bool {
        self.value != current_hash
    }

    /// The `name=value` pair for a Set-Cookie style header.
    pub fn pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartkit_commerce::prelude::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_staleness_detection() {
        let catalog = MemoryCatalog::new().with_product(Product::new("prod-1", "Test Product"));
        let hasher = FragmentHasher::new();

        let mut cart = Cart::new();
        let cookie = HashCookie::refresh(&StateView::new(&cart, None, Currency::USD), &hasher);
        assert!(!cookie.is_stale(&cookie.value));

        cart.add_item(
            &catalog,
            &ProductId::new("prod-1"),
            None,
            BTreeMap::new(),
            1,
        )
        .unwrap();
        let current = hasher.hash(&StateView::new(&cart, None, Currency::USD));
        assert!(cookie.is_stale(&current));
    }

    #[test]
    fn test_pair_format() {
        let cookie = HashCookie::new("abc123");
        assert_eq!(cookie.pair(), "cart_fragments_hash=abc123");
    }
}
