//! Fragment rendering.

use crate::view::StateView;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Provider extending the html fragment group.
pub type HtmlFragmentFn = Box<dyn Fn(&StateView<'_>, &mut BTreeMap<String, String>) + Send + Sync>;

/// Provider extending the data fragment group.
pub type DataFragmentFn =
    Box<dyn Fn(&StateView<'_>, &mut BTreeMap<String, serde_json::Value>) + Send + Sync>;

/// Named fragments returned to the client for DOM patching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FragmentSet {
    /// Named HTML blocks.
    pub html: BTreeMap<String, String>,
    /// Structured values; always carries the active currency.
    pub data: BTreeMap<String, serde_json::Value>,
}

/// Renders the current fragment set from a [`StateView`].
///
/// Providers run in registration order over an html group that starts empty
/// and a data group seeded with the currency. Rendering is a pure function
/// of the view; nothing is cached.
#[derive(Default)]
pub struct FragmentRenderer {
    html_fns: Vec<HtmlFragmentFn>,
    data_fns: Vec<DataFragmentFn>,
}

impl FragmentRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an html fragment provider.
    pub fn with_html(
        mut self,
        provider: impl Fn(&StateView<'_>, &mut BTreeMap<String, String>) + Send + Sync + 'static,
    ) -> Self {
        self.html_fns.push(Box::new(provider));
        self
    }

    /// Register a data fragment provider.
    pub fn with_data(
        mut self,
        provider: impl Fn(&StateView<'_>, &mut BTreeMap<String, serde_json::Value>)
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.data_fns.push(Box::new(provider));
        self
    }

    /// Produce the fragment set for the current state.
    pub fn render(&self, view: &StateView<'_>) -> FragmentSet {
        let mut html = BTreeMap::new();
        let mut data = BTreeMap::new();
        data.insert(
            "currency".to_string(),
            serde_json::Value::String(view.currency.code().to_string()),
        );

        for provider in &self.html_fns {
            provider(view, &mut html);
        }
        for provider in &self.data_fns {
            provider(view, &mut data);
        }

        FragmentSet { html, data }
    }
}
