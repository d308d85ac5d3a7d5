//! Human-readable notices returned from mutation attempts.
//!
//! Notices are plain values handed back to the request layer, which keeps
//! only the first one. There is no shared queue to clear between requests.

use crate::error::CartError;
use serde::{Deserialize, Serialize};

/// One human-readable message. May contain markup; the request layer strips
/// it before responding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    text: String,
}

impl Notice {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl From<CartError> for Notice {
    fn from(err: CartError) -> Self {
        Notice::new(err.to_string())
    }
}

/// An ordered list of notices from one mutation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoticeList(Vec<Notice>);

impl NoticeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notice: Notice) {
        self.0.push(notice);
    }

    /// The first notice, which is the only one ever surfaced to a caller.
    pub fn first(&self) -> Option<&Notice> {
        self.0.first()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Notice> for NoticeList {
    fn from(notice: Notice) -> Self {
        Self(vec![notice])
    }
}

impl From<CartError> for NoticeList {
    fn from(err: CartError) -> Self {
        Notice::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_of_empty_list() {
        let notices = NoticeList::new();
        assert!(notices.first().is_none());
        assert!(notices.is_empty());
    }

    #[test]
    fn test_first_keeps_order() {
        let mut notices = NoticeList::new();
        notices.push(Notice::new("first"));
        notices.push(Notice::new("second"));

        assert_eq!(notices.len(), 2);
        assert_eq!(notices.first().unwrap().text(), "first");
    }

    #[test]
    fn test_from_cart_error() {
        let notices = NoticeList::from(CartError::CouponNotFound("SAVE10".into()));
        assert_eq!(
            notices.first().unwrap().text(),
            "Coupon \"SAVE10\" does not exist."
        );
    }
}
