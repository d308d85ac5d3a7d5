//! Fragment cache key computation.

use crate::view::StateView;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Extender rewriting or adding entries of the hashed payload.
pub type HashExtendFn = Box<dyn Fn(&StateView<'_>, &mut BTreeMap<String, Value>) + Send + Sync>;

/// Computes the digest clients use to decide whether cached fragments are
/// still current.
///
/// The payload is a sorted map of the cart's session view, the applied
/// coupons, the identity, and the currency. `BTreeMap` at every level makes
/// the serialization canonical, so the digest is independent of insertion
/// order. Identical logical state always produces an identical hash.
#[derive(Default)]
pub struct FragmentHasher {
    extenders: Vec<HashExtendFn>,
}

impl FragmentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a payload extender.
    pub fn with_extender(
        mut self,
        extender: impl Fn(&StateView<'_>, &mut BTreeMap<String, Value>) + Send + Sync + 'static,
    ) -> Self {
        self.extenders.push(Box::new(extender));
        self
    }

    /// Compute the hex digest for the current state.
    pub fn hash(&self, view: &StateView<'_>) -> String {
        let mut payload: BTreeMap<String, Value> = BTreeMap::new();
        payload.insert(
            "cart_data".to_string(),
            serde_json::to_value(view.cart.session_view()).unwrap_or(Value::Null),
        );
        payload.insert(
            "cart_coupons".to_string(),
            serde_json::to_value(view.cart.coupons()).unwrap_or(Value::Null),
        );
        payload.insert(
            "user".to_string(),
            match view.user_id {
                Some(id) => Value::String(id.as_str().to_string()),
                None => Value::Null,
            },
        );
        payload.insert(
            "currency".to_string(),
            Value::String(view.currency.code().to_string()),
        );

        for extender in &self.extenders {
            extender(view, &mut payload);
        }

        let bytes = serde_json::to_vec(&payload).unwrap_or_default();
        hex::encode(Sha256::digest(bytes))
    }
}
