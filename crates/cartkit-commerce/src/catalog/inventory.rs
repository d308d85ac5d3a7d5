//! Inventory tracking.

use serde::{Deserialize, Serialize};

/// Inventory level for a product or variation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct InventoryLevel {
    /// Quantity in stock.
    pub quantity: i64,
    /// Whether stock is tracked for this item.
    pub track_inventory: bool,
}

impl InventoryLevel {
    /// Create a new inventory level with tracking enabled.
    pub fn new(quantity: i64) -> Self {
        Self {
            quantity,
            track_inventory: true,
        }
    }

    /// Create an inventory level with no tracking (infinite stock).
    pub fn untracked() -> Self {
        Self {
            quantity: 0,
            track_inventory: false,
        }
    }

    /// Available quantity.
    pub fn available(&self) -> i64 {
        self.quantity
    }

    /// Check if a specific quantity can be fulfilled.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        if !self.track_inventory {
            return true;
        }
        self.available() >= quantity
    }
}
