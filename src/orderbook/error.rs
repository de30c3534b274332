//! Order book error types.
//!
//! Only programmer errors are hard failures here. A crossing limit refused
//! for `allow_cross == false`, a cancel of a non-resting order, and an
//! under-filled market or all-or-none order are all surfaced through normal
//! return values (see [`crate::orderbook::operations`]), not through this
//! enum.

use thiserror::Error;

/// Errors that can occur within the [`crate::OrderBook`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrderBookError {
    /// A non-positive size or price was passed to a public operation. The
    /// book's state is left unchanged.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
