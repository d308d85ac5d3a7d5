//! Per-request session context.

use cartkit_commerce::catalog::Catalog;
use cartkit_commerce::{Cart, Currency, UserId};
use cartkit_fragments::StateView;

/// Everything one request may touch: the session's cart, the catalog, the
/// identity, and the active currency.
///
/// The exclusive borrow on the cart is the single-writer-per-session
/// guarantee; the hosting layer decides how sessions are loaded and stored.
pub struct SessionContext<'a> {
    pub cart: &'a mut Cart,
    pub catalog: &'a dyn Catalog,
    pub user_id: Option<UserId>,
    pub currency: Currency,
}

impl<'a> SessionContext<'a> {
    pub fn new(cart: &'a mut Cart, catalog: &'a dyn Catalog) -> Self {
        Self {
            cart,
            catalog,
            user_id: None,
            currency: Currency::default(),
        }
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Read-only view for fragment rendering and hashing.
    pub fn view(&self) -> StateView<'_> {
        StateView::new(self.cart, self.user_id.as_ref(), self.currency)
    }
}
