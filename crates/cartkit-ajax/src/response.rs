//! Response envelopes.

use cartkit_fragments::FragmentSet;
use serde::Serialize;

/// Response body for one cart request.
///
/// Success carries the full fragment envelope so the client can patch its
/// DOM and remember the new hash; failure carries one message, plus stock
/// numbers when the failure was an insufficient-stock check.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum AjaxResponse {
    Success {
        fragments: FragmentSet,
        hash: String,
    },
    Failure {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        available: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        in_cart: Option<i64>,
    },
}

impl AjaxResponse {
    pub fn success(fragments: FragmentSet, hash: impl Into<String>) -> Self {
        Self::Success {
            fragments,
            hash: hash.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            available: None,
            in_cart: None,
        }
    }

    pub fn not_enough_stock(message: impl Into<String>, available: i64, in_cart: i64) -> Self {
        Self::Failure {
            message: message.into(),
            available: Some(available),
            in_cart: Some(in_cart),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure message, if this is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Failure { message, .. } => Some(message),
            Self::Success { .. } => None,
        }
    }

    /// The fragment hash, if this is a success.
    pub fn hash(&self) -> Option<&str> {
        match self {
            Self::Success { hash, .. } => Some(hash),
            Self::Failure { .. } => None,
        }
    }

    /// The fragments, if this is a success.
    pub fn fragments(&self) -> Option<&FragmentSet> {
        match self {
            Self::Success { fragments, .. } => Some(fragments),
            Self::Failure { .. } => None,
        }
    }
}
