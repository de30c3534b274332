//! Per-price-level aggregates for the depth-of-book view.

use crate::utils::{Price, Quantity};

/// One resting price level: its price, total resting size, and order count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthLevel<Sz, Px> {
    /// The price of this level.
    pub price: Px,
    /// Sum of `size` over every order resting at this price.
    pub volume: Sz,
    /// Number of orders resting at this price.
    pub order_count: usize,
}

impl<Sz: Quantity, Px: Price> DepthLevel<Sz, Px> {
    pub(crate) fn new(price: Px, volume: Sz, order_count: usize) -> Self {
        DepthLevel {
            price,
            volume,
            order_count,
        }
    }
}
