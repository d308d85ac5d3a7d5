//! Request parameter parsing.

use cartkit_commerce::{ItemKey, ProductId, VariationId};
use std::collections::BTreeMap;

/// Prefix of posted variable-product attribute fields.
pub const ATTRIBUTE_FIELD_PREFIX: &str = "attribute_";

/// Endpoints served by the cart handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    AddToCart,
    RemoveFromCart,
    SetQuantity,
    AddCoupon,
    RemoveCoupon,
    Fragments,
}

impl Endpoint {
    /// Wire name of the endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::AddToCart => "add_to_cart",
            Endpoint::RemoveFromCart => "remove_from_cart",
            Endpoint::SetQuantity => "cart_set_quantity",
            Endpoint::AddCoupon => "add_coupon",
            Endpoint::RemoveCoupon => "remove_coupon",
            Endpoint::Fragments => "cart_fragments",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "add_to_cart" => Some(Endpoint::AddToCart),
            "remove_from_cart" => Some(Endpoint::RemoveFromCart),
            "cart_set_quantity" => Some(Endpoint::SetQuantity),
            "add_coupon" => Some(Endpoint::AddCoupon),
            "remove_coupon" => Some(Endpoint::RemoveCoupon),
            "cart_fragments" => Some(Endpoint::Fragments),
            _ => None,
        }
    }
}

/// Posted request fields (body or query), with typed accessors.
#[derive(Debug, Clone, Default)]
pub struct AjaxRequest {
    params: BTreeMap<String, String>,
}

impl AjaxRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator of key/value pairs.
    pub fn from_params<K, V>(params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a single field.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Raw field access.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.param(key).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn product_id(&self) -> Option<ProductId> {
        self.non_empty("product_id").map(ProductId::new)
    }

    pub fn variation_id(&self) -> Option<VariationId> {
        self.non_empty("variation_id").map(VariationId::new)
    }

    pub fn item_key(&self) -> Option<ItemKey> {
        self.non_empty("item_key").map(ItemKey::new)
    }

    pub fn coupon_code(&self) -> Option<String> {
        self.non_empty("coupon_code").map(str::to_string)
    }

    /// Posted quantity, clamped at zero. Absent or unparsable reads as
    /// zero; the add path substitutes its default of one, the set-quantity
    /// path treats zero as removal.
    pub fn quantity(&self) -> i64 {
        self.non_empty("quantity")
            .and_then(|v| v.parse::<i64>().ok())
            .map(|q| q.max(0))
            .unwrap_or(0)
    }

    /// Every `attribute_<slug>` field, keyed by bare slug, values raw.
    pub fn posted_attributes(&self) -> BTreeMap<String, String> {
        self.params
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(ATTRIBUTE_FIELD_PREFIX)
                    .filter(|slug| !slug.is_empty())
                    .map(|slug| (slug.to_string(), value.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_round_trip() {
        for endpoint in [
            Endpoint::AddToCart,
            Endpoint::RemoveFromCart,
            Endpoint::SetQuantity,
            Endpoint::AddCoupon,
            Endpoint::RemoveCoupon,
            Endpoint::Fragments,
        ] {
            assert_eq!(Endpoint::from_str(endpoint.as_str()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_str("checkout"), None);
    }

    #[test]
    fn test_empty_fields_read_as_absent() {
        let req = AjaxRequest::new()
            .with_param("product_id", "  ")
            .with_param("coupon_code", "");
        assert!(req.product_id().is_none());
        assert!(req.coupon_code().is_none());
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(AjaxRequest::new().quantity(), 0);
        assert_eq!(
            AjaxRequest::new().with_param("quantity", "3").quantity(),
            3
        );
        assert_eq!(
            AjaxRequest::new().with_param("quantity", "abc").quantity(),
            0
        );
        assert_eq!(
            AjaxRequest::new().with_param("quantity", "-2").quantity(),
            0
        );
    }

    #[test]
    fn test_posted_attributes() {
        let req = AjaxRequest::from_params([
            ("product_id", "prod-1"),
            ("attribute_color", "red"),
            ("attribute_size", "m"),
            ("attribute_", "ignored"),
        ]);

        let attrs = req.posted_attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs["color"], "red");
        assert_eq!(attrs["size"], "m");
    }
}
