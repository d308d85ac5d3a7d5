//! Read-only view of the render-relevant session state.

use cartkit_commerce::{Cart, Currency, UserId};

/// Everything fragment rendering and hashing may observe: the cart, the
/// identity, and the active currency. Borrowed for one request.
#[derive(Debug, Clone, Copy)]
pub struct StateView<'a> {
    pub cart: &'a Cart,
    pub user_id: Option<&'a UserId>,
    pub currency: Currency,
}

impl<'a> StateView<'a> {
    pub fn new(cart: &'a Cart, user_id: Option<&'a UserId>, currency: Currency) -> Self {
        Self {
            cart,
            user_id,
            currency,
        }
    }
}
