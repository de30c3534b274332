//! Core [`OrderBook`] type: a pair of [`SideBook`]s plus account tracking.

use crate::orderbook::accounts::AccountMap;
use crate::orderbook::depth::DepthLevel;
use crate::orderbook::order::{Order, OrderSide};
use crate::orderbook::side_book::SideBook;
use crate::utils::{Price, Quantity};
use std::hash::Hash;

/// Configuration carried alongside an [`OrderBook`] instance.
///
/// The core never reads these fields itself; they exist so a host can store
/// rendering/reporting knobs next to the book they describe (see spec §6).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BookConfig {
    /// Maximum number of ticks an external bar-chart renderer should plot
    /// away from the best price. `None` means "no preference".
    pub plot_tick_max: Option<u32>,
}

/// A single-symbol limit order book: a bid [`SideBook`], an ask `SideBook`,
/// and an [`AccountMap`] tying account ids to their open orders.
///
/// `Sz` is the order size type, `Px` the price type, `Oid` the order id
/// type, and `Aid` the account id type. See [`crate::utils::Quantity`] and
/// [`crate::utils::Price`] for the bounds each must satisfy.
pub struct OrderBook<Sz, Px, Oid, Aid> {
    pub(crate) bid: SideBook<Sz, Px, Oid, Aid>,
    pub(crate) ask: SideBook<Sz, Px, Oid, Aid>,
    pub(crate) accounts: AccountMap<Aid, Oid, Sz, Px>,
    /// Configuration carried alongside this book; never consulted by the
    /// core itself.
    pub config: BookConfig,
}

impl<Sz, Px, Oid, Aid> OrderBook<Sz, Px, Oid, Aid>
where
    Sz: Quantity,
    Px: Price,
    Oid: Copy + Eq + Hash,
    Aid: Copy + Eq + Hash,
{
    /// An empty book with default configuration.
    pub fn new() -> Self {
        Self::with_config(BookConfig::default())
    }

    /// An empty book with the given configuration.
    pub fn with_config(config: BookConfig) -> Self {
        OrderBook {
            bid: SideBook::new(true),
            ask: SideBook::new(false),
            accounts: AccountMap::new(),
            config,
        }
    }

    fn side_book(&self, side: OrderSide) -> &SideBook<Sz, Px, Oid, Aid> {
        match side {
            OrderSide::Buy => &self.bid,
            OrderSide::Sell => &self.ask,
        }
    }

    /// `(best_bid, best_ask)`. Either may be `None` if that side is empty.
    pub fn best_bid_ask(&self) -> (Option<Px>, Option<Px>) {
        (self.bid.best_price(), self.ask.best_price())
    }

    /// `(bid_volume, ask_volume)`: total resting size on each side.
    pub fn volume_bid_ask(&self) -> (Sz, Sz) {
        (self.bid.total_volume(), self.ask.total_volume())
    }

    /// `(bid_orders, ask_orders)`: total resting order count on each side.
    pub fn n_orders_bid_ask(&self) -> (usize, usize) {
        (self.bid.num_orders(), self.ask.num_orders())
    }

    /// `(bid_volume_funds, ask_volume_funds)`: the advisory notional
    /// aggregate on each side (see [`crate::utils::funds_of`]).
    pub fn volume_funds_bid_ask(&self) -> (f64, f64) {
        (self.bid.total_volume_funds(), self.ask.total_volume_funds())
    }

    /// Up to `max_depth` levels from the best price outward, for the given
    /// side.
    pub fn book_depth_info(&self, side: OrderSide, max_depth: usize) -> Vec<DepthLevel<Sz, Px>> {
        self.side_book(side).depth_info(max_depth)
    }

    /// The open orders tracked for `account_id`, if it has any.
    pub fn get_account(
        &self,
        account_id: Aid,
    ) -> Option<&std::collections::HashMap<Oid, Order<Sz, Px, Oid, Aid>>> {
        self.accounts.get(account_id)
    }

    /// All resting bid orders, in price-time priority.
    pub fn bid_orders(&self) -> impl Iterator<Item = &Order<Sz, Px, Oid, Aid>> {
        self.bid.iter_orders()
    }

    /// All resting ask orders, in price-time priority.
    pub fn ask_orders(&self) -> impl Iterator<Item = &Order<Sz, Px, Oid, Aid>> {
        self.ask.iter_orders()
    }
}

impl<Sz, Px, Oid, Aid> Default for OrderBook<Sz, Px, Oid, Aid>
where
    Sz: Quantity,
    Px: Price,
    Oid: Copy + Eq + Hash,
    Aid: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
