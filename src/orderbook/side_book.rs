//! One side (bid-only or ask-only) of the order book: a price-ordered map of
//! [`OrderQueue`]s plus the matching primitives that walk it.

use crate::orderbook::depth::DepthLevel;
use crate::orderbook::order::{Order, OrderTraits};
use crate::orderbook::order_queue::OrderQueue;
use crate::utils::{funds_of, shares_for_funds, Price, Quantity};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Newtype key wrapping a price so it can live in a [`BTreeMap`].
///
/// `Px` is only required to be `PartialOrd` (fixed-point and floating types
/// alike), so `Ord` is derived from `partial_cmp` and panics on an
/// incomparable pair (NaN). `OrderBook::submit_limit_order` rejects
/// non-positive prices before any price ever reaches this key, which rules
/// out NaN for any sane `Px` in practice.
#[derive(Debug, Clone, Copy)]
struct PriceKey<Px>(Px);

impl<Px: Price> PartialEq for PriceKey<Px> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<Px: Price> Eq for PriceKey<Px> {}
impl<Px: Price> PartialOrd for PriceKey<Px> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.partial_cmp(&other.0)
    }
}
impl<Px: Price> Ord for PriceKey<Px> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other)
            .expect("order book price must be comparable (no NaN)")
    }
}

/// The bid-only or ask-only half of the order book.
///
/// The map is always kept in ascending-by-price order; which end is "best"
/// depends on `is_bid` (bids: highest price is best; asks: lowest price is
/// best). This realizes the side-ordering trick of choosing iteration
/// direction rather than a reversed comparator.
pub struct SideBook<Sz, Px, Oid, Aid> {
    is_bid: bool,
    levels: BTreeMap<PriceKey<Px>, OrderQueue<Sz, Px, Oid, Aid>>,
    best_price: Option<Px>,
    total_volume: Sz,
    total_volume_funds: f64,
    num_orders: usize,
}

impl<Sz, Px, Oid, Aid> SideBook<Sz, Px, Oid, Aid>
where
    Sz: Quantity,
    Px: Price,
    Oid: Copy + PartialEq,
    Aid: Copy,
{
    /// A fresh, empty side. `is_bid` fixes the price ordering for its
    /// lifetime: `true` for the buy side, `false` for the sell side.
    pub fn new(is_bid: bool) -> Self {
        SideBook {
            is_bid,
            levels: BTreeMap::new(),
            best_price: None,
            total_volume: Sz::zero(),
            total_volume_funds: 0.0,
            num_orders: 0,
        }
    }

    /// The most aggressive resting price, or `None` if this side is empty.
    pub fn best_price(&self) -> Option<Px> {
        self.best_price
    }

    /// Sum of `size` over every resting order on this side.
    pub fn total_volume(&self) -> Sz {
        self.total_volume
    }

    /// Sum of `size * price` over every resting order on this side, computed
    /// in a wide floating type. Advisory, not authoritative for settlement.
    pub fn total_volume_funds(&self) -> f64 {
        self.total_volume_funds
    }

    /// Number of resting orders on this side.
    pub fn num_orders(&self) -> usize {
        self.num_orders
    }

    /// True when this side has no resting orders.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn front_key(&self) -> Option<PriceKey<Px>> {
        if self.is_bid {
            self.levels.keys().next_back().copied()
        } else {
            self.levels.keys().next().copied()
        }
    }

    fn within_limit(is_bid: bool, price: Px, limit: Px) -> bool {
        if is_bid {
            price >= limit
        } else {
            price <= limit
        }
    }

    /// Is `price` strictly more aggressive than the current best (or is the
    /// side currently empty)?
    fn improves_best(&self, price: Px) -> bool {
        match self.best_price {
            None => true,
            Some(bp) => {
                if self.is_bid {
                    price > bp
                } else {
                    price < bp
                }
            }
        }
    }

    fn recompute_best_price(&mut self) {
        self.best_price = self.front_key().map(|k| k.0);
    }

    /// Inserts a resting order, creating its price level if necessary, and
    /// updates every cached aggregate.
    pub fn insert_order(&mut self, order: Order<Sz, Px, Oid, Aid>) {
        let price = order.price;
        let better = self.improves_best(price);
        self.total_volume = self.total_volume + order.size;
        self.total_volume_funds += funds_of(price, order.size);
        self.num_orders += 1;

        self.levels
            .entry(PriceKey(price))
            .or_insert_with(|| OrderQueue::new(price))
            .push_back(order);

        if better {
            self.best_price = Some(price);
        }
    }

    /// Removes the order with `id` resting at `price`. Returns `None` if no
    /// such order is resting (not an error).
    pub fn pop_order(&mut self, price: Px, id: Oid) -> Option<Order<Sz, Px, Oid, Aid>> {
        let key = PriceKey(price);
        let queue = self.levels.get_mut(&key)?;
        let removed = queue.pop_by_id(id)?;

        self.total_volume = self.total_volume - removed.size;
        self.total_volume_funds -= funds_of(removed.price, removed.size);
        self.num_orders -= 1;

        let was_best = self.best_price == Some(price);
        if queue.is_empty() {
            self.levels.remove(&key);
            if was_best {
                self.recompute_best_price();
            }
        }

        Some(removed)
    }

    /// Cumulative resting size within `limit_price` (inclusive), walking from
    /// the front. `None` (a market order) returns the cached side total.
    pub fn size_available(&self, limit_price: Option<Px>) -> Sz {
        match limit_price {
            None => self.total_volume,
            Some(limit) => {
                let mut sum = Sz::zero();
                for (key, queue) in self.ordered_levels() {
                    if !Self::within_limit(self.is_bid, key.0, limit) {
                        break;
                    }
                    sum = sum + queue.total_volume;
                }
                sum
            }
        }
    }

    /// Cumulative resting notional within `limit_price` (inclusive).
    /// `None` (a market order) returns the cached side total.
    pub fn funds_available(&self, limit_price: Option<Px>) -> f64 {
        match limit_price {
            None => self.total_volume_funds,
            Some(limit) => {
                let mut sum = 0.0;
                for (key, queue) in self.ordered_levels() {
                    if !Self::within_limit(self.is_bid, key.0, limit) {
                        break;
                    }
                    sum += funds_of(key.0, queue.total_volume);
                }
                sum
            }
        }
    }

    fn ordered_levels(
        &self,
    ) -> Box<dyn Iterator<Item = (&PriceKey<Px>, &OrderQueue<Sz, Px, Oid, Aid>)> + '_> {
        if self.is_bid {
            Box::new(self.levels.iter().rev())
        } else {
            Box::new(self.levels.iter())
        }
    }

    /// Iterates every resting order on this side in strict price-time
    /// priority (best price first, FIFO within a price).
    pub fn iter_orders(&self) -> impl Iterator<Item = &Order<Sz, Px, Oid, Aid>> {
        self.ordered_levels().flat_map(|(_, q)| q.iter())
    }

    /// Up to `max_depth` levels from the best price outward.
    pub fn depth_info(&self, max_depth: usize) -> Vec<DepthLevel<Sz, Px>> {
        self.ordered_levels()
            .take(max_depth)
            .map(|(key, queue)| DepthLevel::new(key.0, queue.total_volume, queue.order_count))
            .collect()
    }

    /// Consumes resting liquidity up to `remaining` shares, walking queues
    /// from the front and stopping at the first queue priced outside
    /// `limit_price` (always satisfied when `limit_price` is `None`).
    ///
    /// Honors `traits.all_or_none` as a pre-check. Returns the matches in
    /// consumption order, whatever of `remaining` could not be filled, and
    /// the residual of any order that was only partially consumed (same
    /// `order_id`, reduced `size`, still resting) — callers that mirror
    /// resting orders elsewhere (e.g. an account map) need this to tell
    /// "fully consumed" apart from "split" for the same id.
    pub fn walk_by_size(
        &mut self,
        mut remaining: Sz,
        limit_price: Option<Px>,
        traits: OrderTraits,
    ) -> (Vec<Order<Sz, Px, Oid, Aid>>, Sz, Vec<Order<Sz, Px, Oid, Aid>>) {
        if traits.all_or_none && self.size_available(limit_price) < remaining {
            return (Vec::new(), remaining, Vec::new());
        }

        let mut matches = Vec::new();
        let mut splits = Vec::new();

        while remaining > Sz::zero() {
            let key = match self.front_key() {
                Some(k) => k,
                None => break,
            };
            if let Some(limit) = limit_price {
                if !Self::within_limit(self.is_bid, key.0, limit) {
                    break;
                }
            }

            let mut queue = self.levels.remove(&key).expect("front key must exist");
            let level_price = queue.price;
            let level_total = queue.total_volume;
            let level_orders = queue.order_count;

            if level_total <= remaining {
                remaining = remaining - level_total;
                self.total_volume = self.total_volume - level_total;
                self.total_volume_funds -= funds_of(level_price, level_total);
                self.num_orders -= level_orders;
                matches.extend(queue.into_orders());
            } else {
                loop {
                    if remaining <= Sz::zero() {
                        break;
                    }
                    let order = match queue.pop_front() {
                        Some(o) => o,
                        None => break,
                    };
                    if order.size <= remaining {
                        remaining = remaining - order.size;
                        self.total_volume = self.total_volume - order.size;
                        self.total_volume_funds -= funds_of(order.price, order.size);
                        self.num_orders -= 1;
                        matches.push(order);
                    } else {
                        let filled_size = remaining;
                        let residual_size = order.size - remaining;
                        let filled = order.with_size(filled_size);
                        let residual = order.with_size(residual_size);
                        self.total_volume = self.total_volume - filled_size;
                        self.total_volume_funds -= funds_of(order.price, filled_size);
                        queue.push_front(residual);
                        matches.push(filled);
                        splits.push(residual);
                        remaining = Sz::zero();
                    }
                }
                if !queue.is_empty() {
                    self.levels.insert(key, queue);
                }
            }
        }

        self.recompute_best_price();
        (matches, remaining, splits)
    }

    /// Like [`Self::walk_by_size`] but the incoming constraint is a funds
    /// (notional) budget rather than a share count.
    ///
    /// When a resting order's notional exceeds the remaining funds, the
    /// order is split at `floor(remaining / order.price)` shares. If that
    /// floor is zero (remaining funds can't buy a single share of the best
    /// remaining price), the order is left untouched and the walk stops —
    /// matching every cheaper (or, on the bid side, richer) level has
    /// already been tried by the time the walk gets here, so there is
    /// nothing left to gain by continuing. The third element mirrors
    /// [`Self::walk_by_size`]'s split-residual reporting.
    pub fn walk_by_funds(
        &mut self,
        mut remaining: f64,
        limit_price: Option<Px>,
        traits: OrderTraits,
    ) -> (Vec<Order<Sz, Px, Oid, Aid>>, f64, Vec<Order<Sz, Px, Oid, Aid>>) {
        if traits.all_or_none && self.funds_available(limit_price) < remaining {
            return (Vec::new(), remaining, Vec::new());
        }

        let mut matches = Vec::new();
        let mut splits = Vec::new();

        'outer: while remaining > 0.0 {
            let key = match self.front_key() {
                Some(k) => k,
                None => break,
            };
            if let Some(limit) = limit_price {
                if !Self::within_limit(self.is_bid, key.0, limit) {
                    break;
                }
            }

            let mut queue = self.levels.remove(&key).expect("front key must exist");
            let level_price = queue.price;
            let level_total = queue.total_volume;
            let level_orders = queue.order_count;
            let level_notional = funds_of(level_price, level_total);

            if level_notional <= remaining {
                remaining -= level_notional;
                self.total_volume = self.total_volume - level_total;
                self.total_volume_funds -= level_notional;
                self.num_orders -= level_orders;
                matches.extend(queue.into_orders());
            } else {
                loop {
                    if remaining <= 0.0 {
                        break;
                    }
                    let order = match queue.pop_front() {
                        Some(o) => o,
                        None => break,
                    };
                    let notional = funds_of(order.price, order.size);
                    if notional <= remaining {
                        remaining -= notional;
                        self.total_volume = self.total_volume - order.size;
                        self.total_volume_funds -= notional;
                        self.num_orders -= 1;
                        matches.push(order);
                    } else {
                        let fillable: Sz = shares_for_funds(remaining, order.price);
                        if fillable <= Sz::zero() {
                            // Can't afford even one more share; put the order
                            // back untouched and stop the whole walk.
                            queue.push_front(order);
                            self.levels.insert(key, queue);
                            break 'outer;
                        }
                        // `notional > remaining` above guarantees
                        // `fillable < order.size`, so the residual here is
                        // always strictly positive.
                        let filled_notional = funds_of(order.price, fillable);
                        let residual_size = order.size - fillable;
                        let filled = order.with_size(fillable);
                        let residual = order.with_size(residual_size);
                        self.total_volume = self.total_volume - fillable;
                        self.total_volume_funds -= filled_notional;
                        remaining -= filled_notional;
                        queue.push_front(residual);
                        matches.push(filled);
                        splits.push(residual);
                    }
                }
                if !queue.is_empty() {
                    self.levels.insert(key, queue);
                }
            }
        }

        self.recompute_best_price();
        (matches, remaining, splits)
    }
}
