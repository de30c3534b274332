//! Prelude module that re-exports commonly used types and traits.
//!
//! This module provides a convenient way to import the most commonly used
//! types, traits, and functions from this crate. Instead of importing each
//! type individually, you can use:
//!
//! ```rust
//! use orderbook_core::prelude::*;
//! ```
//!
//! This will import all the essential types needed for working with the order book.

pub use crate::orderbook::{
    BookConfig, DepthLevel, Order, OrderBook, OrderBookError, OrderSide, OrderTraits,
    write_resting_orders,
};
pub use crate::utils::current_time_millis;
