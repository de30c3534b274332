//! The immutable [`Order`] value and the flags that select matching behavior.

use crate::utils::{Price, Quantity};
use std::fmt;

/// Which book an order rests in: `Buy` orders rest in the bid side, `Sell`
/// orders rest in the ask side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderSide {
    /// A resting buy order; lives in the bid book.
    Buy,
    /// A resting sell order; lives in the ask book.
    Sell,
}

impl OrderSide {
    /// The side an incoming order of this side matches against.
    pub fn opposite(self) -> OrderSide {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSide::Buy => write!(f, "BUY"),
            OrderSide::Sell => write!(f, "SELL"),
        }
    }
}

/// Immutable triple of flags that select matching behavior for one order.
///
/// | flag | effect |
/// |---|---|
/// | `all_or_none` | matching aborts with zero fills if available liquidity within the price constraint is strictly less than requested size |
/// | `immediate_or_cancel` | any residual size after matching is discarded rather than resting |
/// | `allow_cross` | a limit order whose price crosses the opposite best is permitted to match against the opposite book; if false, a crossing limit is refused |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderTraits {
    /// Abort with zero fills unless the full requested size can be filled
    /// within the price constraint.
    pub all_or_none: bool,
    /// Discard any residual after matching instead of resting it.
    pub immediate_or_cancel: bool,
    /// Permit a crossing limit order to match against the opposite book.
    pub allow_cross: bool,
}

impl OrderTraits {
    /// Plain limit order: no AON, no IOC, crossing allowed.
    pub const VANILLA: OrderTraits = OrderTraits {
        all_or_none: false,
        immediate_or_cancel: false,
        allow_cross: true,
    };

    /// Immediate-or-cancel: crossing allowed, any residual is discarded.
    pub const IOC: OrderTraits = OrderTraits {
        all_or_none: false,
        immediate_or_cancel: true,
        allow_cross: true,
    };

    /// Fill-or-kill: all-or-none and immediate-or-cancel together.
    pub const FILL_OR_KILL: OrderTraits = OrderTraits {
        all_or_none: true,
        immediate_or_cancel: true,
        allow_cross: true,
    };
}

impl Default for OrderTraits {
    fn default() -> Self {
        OrderTraits::VANILLA
    }
}

/// An immutable resting (or incoming) limit order.
///
/// Invariants: `size > 0`, `price > 0`, and `order_id` is unique within the
/// containing [`crate::OrderBook`] at all times the order is resting. A
/// residual produced during matching is a *new* `Order` sharing every field
/// except `size` (see [`Order::with_size`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order<Sz, Px, Oid, Aid> {
    /// Which side this order rests on.
    pub side: OrderSide,
    /// The (remaining) size of this order.
    pub size: Sz,
    /// The limit price of this order.
    pub price: Px,
    /// Unique identifier of this order within its book.
    pub order_id: Oid,
    /// Owning account, if this order is tracked in the account map.
    pub account_id: Option<Aid>,
}

impl<Sz, Px, Oid, Aid> Order<Sz, Px, Oid, Aid>
where
    Sz: Quantity,
    Px: Price,
    Oid: Copy,
    Aid: Copy,
{
    /// A copy of this order with every field identical except `size`.
    ///
    /// Used both for the residual left behind by a split match and for the
    /// filled portion appended to a match list.
    pub fn with_size(&self, size: Sz) -> Self {
        Order {
            side: self.side,
            size,
            price: self.price,
            order_id: self.order_id,
            account_id: self.account_id,
        }
    }
}
