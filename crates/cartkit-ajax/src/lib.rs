//! Cart mutation endpoints for CartKit.
//!
//! One request, one mutation, one response: every endpoint validates its
//! input, applies a single change to the session cart, and answers with
//! either the fragment envelope (fragments plus hash) or the first error
//! notice. The surrounding host owns request dispatch and session loading;
//! this crate owns everything between parsed parameters and the response
//! body.

mod context;
mod handler;
mod hooks;
mod request;
mod resolver;
mod response;
mod sanitize;

pub use context::SessionContext;
pub use handler::{CartAjax, GENERIC_FAILURE_MESSAGE};
pub use hooks::{AddCheck, AddedToCart, QuantityCheck};
pub use request::{AjaxRequest, Endpoint, ATTRIBUTE_FIELD_PREFIX};
pub use resolver::{resolve_selection, ResolvedSelection, VariationError};
pub use response::AjaxResponse;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::context::SessionContext;
    pub use crate::handler::CartAjax;
    pub use crate::request::{AjaxRequest, Endpoint};
    pub use crate::response::AjaxResponse;
    pub use cartkit_commerce::prelude::*;
    pub use cartkit_fragments::{FragmentRenderer, FragmentSet, HashCookie, StateView};
}
