//! The book's public mutating operations: submit limit/market orders, cancel.

use crate::orderbook::book::OrderBook;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::order::{Order, OrderSide, OrderTraits};
use crate::utils::{Price, Quantity};
use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, trace};

impl<Sz, Px, Oid, Aid> OrderBook<Sz, Px, Oid, Aid>
where
    Sz: Quantity,
    Px: Price,
    Oid: Copy + Eq + Hash,
    Aid: Copy + Eq + Hash,
{
    /// Reconciles the account map after a walk: fully consumed orders are
    /// dropped, split orders (still resting with a reduced size) are
    /// re-registered so their account entry doesn't go stale.
    fn reconcile_accounts(
        &mut self,
        filled: &[Order<Sz, Px, Oid, Aid>],
        splits: &[Order<Sz, Px, Oid, Aid>],
    ) {
        let split_ids: HashSet<Oid> = splits.iter().map(|o| o.order_id).collect();
        for order in filled {
            if split_ids.contains(&order.order_id) {
                continue;
            }
            if let Some(aid) = order.account_id {
                self.accounts.remove(aid, order.order_id);
            }
        }
        for residual in splits {
            if let Some(aid) = residual.account_id {
                self.accounts.register(aid, *residual);
            }
        }
    }

    /// Submits a limit order.
    ///
    /// Validates `price > 0` and `size > 0`. If the order crosses the
    /// opposite best and `traits.allow_cross` is true, it is matched against
    /// the opposite side first; if it crosses and `allow_cross` is false, it
    /// is refused outright (empty matches, full residual, no resting
    /// order). Any residual left after matching rests on this order's own
    /// side unless `traits.immediate_or_cancel` is set, in which case the
    /// residual is discarded instead.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidArgument`] for a non-positive price
    /// or size; the book is left unchanged in that case.
    pub fn submit_limit_order(
        &mut self,
        order_id: Oid,
        side: OrderSide,
        price: Px,
        size: Sz,
        account_id: Option<Aid>,
        traits: OrderTraits,
    ) -> Result<
        (
            Option<Order<Sz, Px, Oid, Aid>>,
            Vec<Order<Sz, Px, Oid, Aid>>,
            Sz,
        ),
        OrderBookError,
    > {
        if !(price > Px::zero()) {
            return Err(OrderBookError::InvalidArgument(format!(
                "price must be > 0, got {price:?}"
            )));
        }
        if !(size > Sz::zero()) {
            return Err(OrderBookError::InvalidArgument(format!(
                "size must be > 0, got {size:?}"
            )));
        }
        trace!(?side, ?price, ?size, "submit_limit_order");

        let (best_bid, best_ask) = self.best_bid_ask();
        let crosses = match side {
            OrderSide::Buy => best_ask.is_some_and(|ba| price >= ba),
            OrderSide::Sell => best_bid.is_some_and(|bb| price <= bb),
        };

        let mut matches = Vec::new();
        let mut residual = size;

        if crosses {
            if !traits.allow_cross {
                debug!(?side, ?price, "crossing limit refused (allow_cross=false)");
                return Ok((None, Vec::new(), size));
            }
            let opposite = match side {
                OrderSide::Buy => &mut self.ask,
                OrderSide::Sell => &mut self.bid,
            };
            let (filled, left, splits) = opposite.walk_by_size(size, Some(price), traits);
            self.reconcile_accounts(&filled, &splits);
            debug!(fills = filled.len(), remaining = ?left, "limit order crossed");
            matches = filled;
            residual = left;
        }

        if traits.immediate_or_cancel {
            return Ok((None, matches, residual));
        }

        if residual > Sz::zero() {
            let (best_bid, best_ask) = self.best_bid_ask();
            let rests_clean = match side {
                OrderSide::Buy => best_ask.is_none_or(|ba| price < ba),
                OrderSide::Sell => best_bid.is_none_or(|bb| price > bb),
            };
            if rests_clean {
                let resting = Order {
                    side,
                    size: residual,
                    price,
                    order_id,
                    account_id,
                };
                match side {
                    OrderSide::Buy => self.bid.insert_order(resting),
                    OrderSide::Sell => self.ask.insert_order(resting),
                }
                if let Some(aid) = account_id {
                    self.accounts.register(aid, resting);
                }
                return Ok((Some(resting), matches, Sz::zero()));
            }
        }

        Ok((None, matches, residual))
    }

    /// Submits a market order for `size` shares against the opposite side.
    ///
    /// Only `traits.all_or_none` is honored; `immediate_or_cancel` and
    /// `allow_cross` are irrelevant since there is nothing to rest and no
    /// cross check for a market order.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidArgument`] for a non-positive size.
    pub fn submit_market_order(
        &mut self,
        side: OrderSide,
        size: Sz,
        traits: OrderTraits,
    ) -> Result<(Vec<Order<Sz, Px, Oid, Aid>>, Sz), OrderBookError> {
        if !(size > Sz::zero()) {
            return Err(OrderBookError::InvalidArgument(format!(
                "size must be > 0, got {size:?}"
            )));
        }
        trace!(?side, ?size, "submit_market_order");

        let opposite = match side {
            OrderSide::Buy => &mut self.ask,
            OrderSide::Sell => &mut self.bid,
        };
        let (matches, residual, splits) = opposite.walk_by_size(size, None, traits);
        self.reconcile_accounts(&matches, &splits);
        debug!(fills = matches.len(), remaining = ?residual, "market order executed");
        Ok((matches, residual))
    }

    /// Submits a market order sized by notional `funds` rather than shares.
    ///
    /// # Errors
    /// Returns [`OrderBookError::InvalidArgument`] for non-positive funds.
    pub fn submit_market_order_by_funds(
        &mut self,
        side: OrderSide,
        funds: f64,
        traits: OrderTraits,
    ) -> Result<(Vec<Order<Sz, Px, Oid, Aid>>, f64), OrderBookError> {
        if !(funds > 0.0) {
            return Err(OrderBookError::InvalidArgument(format!(
                "funds must be > 0, got {funds}"
            )));
        }
        trace!(?side, funds, "submit_market_order_by_funds");

        let opposite = match side {
            OrderSide::Buy => &mut self.ask,
            OrderSide::Sell => &mut self.bid,
        };
        let (matches, funds_remaining, splits) = opposite.walk_by_funds(funds, None, traits);
        self.reconcile_accounts(&matches, &splits);
        debug!(fills = matches.len(), funds_remaining, "market-by-funds order executed");
        Ok((matches, funds_remaining))
    }

    /// Cancels the resting order `order_id` at `price` on `side`.
    ///
    /// Returns the removed order, or `None` if no such order was resting
    /// (not treated as an error). Looks up the owner's account from the
    /// removed order itself, so callers never need to supply `account_id`.
    pub fn cancel_order(
        &mut self,
        order_id: Oid,
        side: OrderSide,
        price: Px,
    ) -> Option<Order<Sz, Px, Oid, Aid>> {
        trace!(?side, ?price, "cancel_order");
        let book = match side {
            OrderSide::Buy => &mut self.bid,
            OrderSide::Sell => &mut self.ask,
        };
        let removed = book.pop_order(price, order_id)?;
        if let Some(aid) = removed.account_id {
            self.accounts.remove(aid, removed.order_id);
        }
        Some(removed)
    }

    /// Convenience form of [`Self::cancel_order`] taking an `Order` value
    /// directly (its `order_id`, `side`, and `price` are used to locate it).
    pub fn cancel(
        &mut self,
        order: &Order<Sz, Px, Oid, Aid>,
    ) -> Option<Order<Sz, Px, Oid, Aid>> {
        self.cancel_order(order.order_id, order.side, order.price)
    }
}
