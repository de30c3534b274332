//! # orderbook-core
//!
//! A single-symbol limit order book matching engine for backtesting and
//! market simulation: price-time (FIFO) priority, limit and market order
//! submission, and per-account order tracking.
//!
//! ## Key Features
//!
//! - **Price-time priority matching**: orders at a better price always match
//!   first; orders at the same price match in arrival order.
//! - **Limit and market orders**: [`OrderBook::submit_limit_order`] rests a
//!   residual on the book; [`OrderBook::submit_market_order`] and
//!   [`OrderBook::submit_market_order_by_funds`] consume resting liquidity
//!   without resting anything themselves.
//! - **Order traits**: all-or-none, immediate-or-cancel, and allow-cross are
//!   independent flags on every order (see [`OrderTraits`]).
//! - **Per-account tracking**: every resting order with an account id
//!   attached can be looked up by [`OrderBook::get_account`].
//! - **Aggregate statistics**: best bid/ask, per-side volume, notional
//!   funds, order counts, and depth-by-level are all O(1) or O(depth) reads.
//!
//! ## Design Goals
//!
//! This is a single-threaded, synchronous engine: there is no internal
//! locking and no concurrency model to reason about. Every operation takes
//! `&mut self` and returns once fully applied. This choice trades away
//! multi-threaded throughput for a much simpler mental model, which is the
//! right trade for a backtesting/simulation engine driven by a single event
//! loop replaying a deterministic order sequence.
//!
//! ## Status
//!
//! This crate covers one symbol at a time; running a simulation across many
//! symbols means owning one [`OrderBook`] per symbol. There is no built-in
//! persistence, network transport, or trade-event bus — those are concerns
//! for whatever host process embeds this crate.

pub mod orderbook;
pub mod prelude;
mod utils;

pub use orderbook::{
    BookConfig, DepthLevel, Order, OrderBook, OrderBookError, OrderSide, OrderTraits,
    write_resting_orders,
};
pub use utils::current_time_millis;
