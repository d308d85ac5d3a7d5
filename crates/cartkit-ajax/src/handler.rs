//! Cart mutation endpoints.

use crate::context::SessionContext;
use crate::hooks::{
    AddCheck, AddValidator, AddedListener, AddedToCart, QuantityCheck, QuantityValidator,
};
use crate::request::{AjaxRequest, Endpoint};
use crate::resolver::resolve_selection;
use crate::response::AjaxResponse;
use crate::sanitize::strip_tags;
use cartkit_commerce::catalog::CatalogEntry;
use cartkit_commerce::{CartError, Notice, NoticeList, ProductId, VariationId};
use cartkit_fragments::{FragmentHasher, FragmentRenderer, StateView};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Fallback for failures that produced no notice of their own.
pub const GENERIC_FAILURE_MESSAGE: &str = "The operation could not be completed.";

/// Link text some engine notices append; always removed before responding.
const VIEW_CART_BOILERPLATE: &str = "View Cart";

const COUPON_APPLY_FAILED: &str = "Coupon could not be applied.";
const COUPON_REMOVE_FAILED: &str = "Coupon could not be removed.";

/// The cart request handler.
///
/// One instance serves many requests; per-request state arrives through the
/// [`SessionContext`]. Extension points and fragment providers are
/// registered at construction.
#[derive(Default)]
pub struct CartAjax {
    add_validators: Vec<AddValidator>,
    update_validators: Vec<QuantityValidator>,
    added_listeners: Vec<AddedListener>,
    renderer: FragmentRenderer,
    hasher: FragmentHasher,
}

impl CartAjax {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an add-to-cart validator. First rejection wins.
    pub fn with_add_validator(
        mut self,
        validator: impl Fn(&AddCheck<'_>) -> Result<(), Notice> + Send + Sync + 'static,
    ) -> Self {
        self.add_validators.push(Box::new(validator));
        self
    }

    /// Register an update-cart validator. First rejection wins.
    pub fn with_update_validator(
        mut self,
        validator: impl Fn(&QuantityCheck<'_>) -> Result<(), Notice> + Send + Sync + 'static,
    ) -> Self {
        self.update_validators.push(Box::new(validator));
        self
    }

    /// Register a listener fired after a successful add.
    pub fn on_item_added(
        mut self,
        listener: impl Fn(&AddedToCart<'_>) + Send + Sync + 'static,
    ) -> Self {
        self.added_listeners.push(Box::new(listener));
        self
    }

    /// Register an html fragment provider.
    pub fn with_html_fragment(
        mut self,
        provider: impl Fn(&StateView<'_>, &mut BTreeMap<String, String>) + Send + Sync + 'static,
    ) -> Self {
        self.renderer = self.renderer.with_html(provider);
        self
    }

    /// Register a data fragment provider.
    pub fn with_data_fragment(
        mut self,
        provider: impl Fn(&StateView<'_>, &mut BTreeMap<String, serde_json::Value>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.renderer = self.renderer.with_data(provider);
        self
    }

    /// Register a hash payload extender.
    pub fn with_hash_extender(
        mut self,
        extender: impl Fn(&StateView<'_>, &mut BTreeMap<String, serde_json::Value>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.hasher = self.hasher.with_extender(extender);
        self
    }

    /// The hasher, for hosts that set the hash cookie themselves.
    pub fn hasher(&self) -> &FragmentHasher {
        &self.hasher
    }

    /// Route a request to its endpoint.
    pub fn dispatch(
        &self,
        ctx: &mut SessionContext<'_>,
        endpoint: Endpoint,
        req: &AjaxRequest,
    ) -> AjaxResponse {
        debug!(endpoint = endpoint.as_str(), "handling cart request");
        match endpoint {
            Endpoint::AddToCart => self.add_to_cart(ctx, req),
            Endpoint::RemoveFromCart => self.remove_from_cart(ctx, req),
            Endpoint::SetQuantity => self.cart_set_quantity(ctx, req),
            Endpoint::AddCoupon => self.add_coupon(ctx, req),
            Endpoint::RemoveCoupon => self.remove_coupon(ctx, req),
            Endpoint::Fragments => self.cart_fragments(ctx),
        }
    }

    /// Add one item. Variable products (and anything posted with a
    /// variation id) go through the resolver first.
    pub fn add_to_cart(&self, ctx: &mut SessionContext<'_>, req: &AjaxRequest) -> AjaxResponse {
        let Some(product_id) = req.product_id() else {
            return AjaxResponse::error(GENERIC_FAILURE_MESSAGE);
        };
        let quantity = match req.quantity() {
            0 => 1,
            q => q,
        };
        let posted_variation = req.variation_id();

        let needs_resolution = posted_variation.is_some()
            || match ctx.catalog.resolve(product_id.as_str()) {
                Some(CatalogEntry::Product(product)) => product.is_variable(),
                Some(CatalogEntry::Variation(_)) => true,
                None => false,
            };

        if needs_resolution {
            let selection = match resolve_selection(
                ctx.catalog,
                product_id.as_str(),
                posted_variation.as_ref(),
                &req.posted_attributes(),
            ) {
                Ok(selection) => selection,
                Err(err) => {
                    debug!(product = %product_id, error = %err, "variation resolution failed");
                    return Self::failure(Notice::new(err.to_string()).into());
                }
            };
            self.add_resolved(
                ctx,
                selection.product_id,
                Some(selection.variation_id),
                selection.attributes,
                quantity,
            )
        } else {
            self.add_resolved(ctx, product_id, None, BTreeMap::new(), quantity)
        }
    }

    /// Remove one item by key. Absent keys are a no-op, not an error.
    pub fn remove_from_cart(&self, ctx: &mut SessionContext<'_>, req: &AjaxRequest) -> AjaxResponse {
        let Some(key) = req.item_key() else {
            return AjaxResponse::error(GENERIC_FAILURE_MESSAGE);
        };

        let removed = ctx.cart.remove_item(&key);
        debug!(item_key = %key, removed, "remove from cart");
        self.success(ctx)
    }

    /// Set an item's quantity; zero removes it.
    pub fn cart_set_quantity(
        &self,
        ctx: &mut SessionContext<'_>,
        req: &AjaxRequest,
    ) -> AjaxResponse {
        let Some(key) = req.item_key() else {
            return AjaxResponse::error(GENERIC_FAILURE_MESSAGE);
        };

        let quantity = req.quantity();
        if quantity == 0 {
            ctx.cart.remove_item(&key);
            return self.success(ctx);
        }

        let Some(item) = ctx.cart.get_item(&key) else {
            return Self::failure(CartError::ItemNotFound(key.to_string()).into());
        };
        let product_id = item.product_id.clone();
        let variation_id = item.variation_id.clone();
        let in_cart = item.quantity;

        let check = QuantityCheck {
            item_key: &key,
            product_id: &product_id,
            quantity,
        };
        for validator in &self.update_validators {
            if let Err(notice) = validator(&check) {
                return Self::failure(notice.into());
            }
        }

        // The requested quantity replaces what is in cart, so it is checked
        // against available stock as a total, not as an increment.
        if let Some(inventory) = ctx.catalog.inventory_for(&product_id, variation_id.as_ref()) {
            if inventory.track_inventory && !inventory.can_fulfill(quantity) {
                warn!(
                    item_key = %key,
                    requested = quantity,
                    available = inventory.available(),
                    "quantity change exceeds stock"
                );
                return Self::failure_from_cart(CartError::NotEnoughStock {
                    available: inventory.available(),
                    in_cart,
                });
            }
        }

        ctx.cart.set_quantity(&key, quantity);
        self.success(ctx)
    }

    /// Apply a coupon code.
    pub fn add_coupon(&self, ctx: &mut SessionContext<'_>, req: &AjaxRequest) -> AjaxResponse {
        let Some(code) = req.coupon_code() else {
            return AjaxResponse::error(COUPON_APPLY_FAILED);
        };

        match ctx.cart.apply_coupon(ctx.catalog, &code) {
            Ok(()) => self.success(ctx),
            Err(err) => Self::failure_from_cart(err),
        }
    }

    /// Remove a coupon code.
    pub fn remove_coupon(&self, ctx: &mut SessionContext<'_>, req: &AjaxRequest) -> AjaxResponse {
        let Some(code) = req.coupon_code() else {
            return AjaxResponse::error(COUPON_REMOVE_FAILED);
        };

        if ctx.cart.remove_coupon(&code) {
            self.success(ctx)
        } else {
            // The engine reports nothing here; the generic message stands in.
            Self::failure(NoticeList::new())
        }
    }

    /// Refresh fragments without mutating anything.
    pub fn cart_fragments(&self, ctx: &mut SessionContext<'_>) -> AjaxResponse {
        self.success(ctx)
    }

    fn add_resolved(
        &self,
        ctx: &mut SessionContext<'_>,
        product_id: ProductId,
        variation_id: Option<VariationId>,
        attributes: BTreeMap<String, String>,
        quantity: i64,
    ) -> AjaxResponse {
        let check = AddCheck {
            product_id: &product_id,
            variation_id: variation_id.as_ref(),
            quantity,
            attributes: &attributes,
        };
        for validator in &self.add_validators {
            if let Err(notice) = validator(&check) {
                return Self::failure(notice.into());
            }
        }

        match ctx
            .cart
            .add_item(ctx.catalog, &product_id, variation_id.as_ref(), attributes, quantity)
        {
            Ok(key) => {
                let added = AddedToCart {
                    item_key: &key,
                    product_id: &product_id,
                    quantity,
                };
                for listener in &self.added_listeners {
                    listener(&added);
                }
                self.success(ctx)
            }
            Err(err) => Self::failure_from_cart(err),
        }
    }

    /// Fragments are computed after the mutation, so the envelope always
    /// reflects the post-mutation cart.
    fn success(&self, ctx: &SessionContext<'_>) -> AjaxResponse {
        let view = ctx.view();
        AjaxResponse::success(self.renderer.render(&view), self.hasher.hash(&view))
    }

    fn failure_from_cart(err: CartError) -> AjaxResponse {
        if let CartError::NotEnoughStock { available, in_cart } = err {
            let message = Self::clean_notice(&Notice::from(err.clone()));
            return AjaxResponse::not_enough_stock(message, available, in_cart);
        }
        Self::failure(err.into())
    }

    /// First-notice policy: one message per failure, the rest discarded.
    fn failure(notices: NoticeList) -> AjaxResponse {
        match notices.first() {
            Some(notice) => AjaxResponse::error(Self::clean_notice(notice)),
            None => AjaxResponse::error(GENERIC_FAILURE_MESSAGE),
        }
    }

    fn clean_notice(notice: &Notice) -> String {
        strip_tags(notice.text())
            .replace(VIEW_CART_BOILERPLATE, "")
            .trim()
            .to_string()
    }
}
