//! Property-style checks of the quantified invariants against the public
//! API, run after every operation of a deterministic, mixed-operation
//! sequence (no external randomness crate needed for a fixed, repeatable
//! sequence).

use orderbook_core::{OrderBook, OrderSide, OrderTraits};
use std::collections::HashSet;

type Book = OrderBook<u32, u32, u32, u32>;

fn assert_invariants(book: &Book) {
    let (bid_vol, ask_vol) = book.volume_bid_ask();
    let bid_sum: u32 = book.bid_orders().map(|o| o.size).sum();
    let ask_sum: u32 = book.ask_orders().map(|o| o.size).sum();
    assert_eq!(bid_vol, bid_sum, "bid total_volume must equal the sum of resting sizes");
    assert_eq!(ask_vol, ask_sum, "ask total_volume must equal the sum of resting sizes");

    let (bid_n, ask_n) = book.n_orders_bid_ask();
    assert_eq!(bid_n, book.bid_orders().count());
    assert_eq!(ask_n, book.ask_orders().count());

    let (best_bid, best_ask) = book.best_bid_ask();
    match best_bid {
        None => assert_eq!(bid_n, 0),
        Some(bb) => assert_eq!(bb, book.bid_orders().map(|o| o.price).max().unwrap()),
    }
    match best_ask {
        None => assert_eq!(ask_n, 0),
        Some(ba) => assert_eq!(ba, book.ask_orders().map(|o| o.price).min().unwrap()),
    }

    // Non-crossing invariant: once both sides are non-empty, bid < ask.
    if let (Some(bb), Some(ba)) = (best_bid, best_ask) {
        assert!(bb < ba, "best bid {bb} must be strictly below best ask {ba}");
    }

    // Order ids unique across both sides.
    let mut ids = HashSet::new();
    for order in book.bid_orders().chain(book.ask_orders()) {
        assert!(ids.insert(order.order_id), "duplicate resting order id {}", order.order_id);
    }

    // Every account entry corresponds to exactly one resting order with a
    // matching id, side, and account, and its tracked size matches reality.
    let mut by_id = std::collections::HashMap::new();
    for order in book.bid_orders().chain(book.ask_orders()) {
        by_id.insert(order.order_id, *order);
    }
    for order in book.bid_orders().chain(book.ask_orders()) {
        if let Some(aid) = order.account_id {
            let tracked = book
                .get_account(aid)
                .and_then(|orders| orders.get(&order.order_id))
                .expect("account map must track every resting order with an account id");
            assert_eq!(tracked.size, by_id[&order.order_id].size);
        }
    }
}

/// A tiny linear congruential generator so the sequence is fixed and
/// reproducible without pulling in a randomness crate.
struct Lcg(u64);
impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.0 >> 33
    }
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next() as u32) % (hi - lo)
    }
}

#[test]
fn invariants_hold_after_every_operation_in_a_mixed_sequence() {
    let mut book: Book = OrderBook::new();
    let mut rng = Lcg(0x1234_5678_9abc_def0);
    let mut resting: Vec<(u32, OrderSide, u32)> = Vec::new();
    let mut next_id = 0u32;

    for step in 0..2_000u32 {
        let choice = rng.range(0, 10);
        if choice < 6 || resting.is_empty() {
            let side = if rng.range(0, 2) == 0 { OrderSide::Buy } else { OrderSide::Sell };
            let price = match side {
                OrderSide::Buy => rng.range(90, 100),
                OrderSide::Sell => rng.range(100, 110),
            };
            let size = rng.range(1, 20);
            let account = if step % 3 == 0 { Some(rng.range(0, 5)) } else { None };
            let id = next_id;
            next_id += 1;
            let (resting_order, matches, residual) = book
                .submit_limit_order(id, side, price, size, account, OrderTraits::VANILLA)
                .unwrap();
            assert_eq!(
                matches.iter().map(|o| o.size).sum::<u32>() + residual,
                size,
                "matching conservation: fills plus residual equals requested size"
            );
            if resting_order.is_some() {
                resting.push((id, side, price));
            }
        } else if choice < 8 {
            let side = if rng.range(0, 2) == 0 { OrderSide::Buy } else { OrderSide::Sell };
            let size = rng.range(1, 15);
            let (matches, residual) = book.submit_market_order(side, size, OrderTraits::VANILLA).unwrap();
            assert_eq!(matches.iter().map(|o| o.size).sum::<u32>() + residual, size);
        } else {
            let idx = rng.range(0, resting.len() as u32) as usize;
            let (id, side, price) = resting[idx];
            if book.cancel_order(id, side, price).is_some() {
                resting.remove(idx);
                assert!(book.cancel_order(id, side, price).is_none(), "double-cancel returns nothing");
            }
        }
        assert_invariants(&book);
    }
}

#[test]
fn cancel_after_submit_restores_pre_submit_state() {
    let mut book: Book = OrderBook::new();
    book.submit_limit_order(1, OrderSide::Buy, 99, 5, None, OrderTraits::VANILLA)
        .unwrap();
    let before = (book.best_bid_ask(), book.volume_bid_ask(), book.n_orders_bid_ask());

    book.submit_limit_order(2, OrderSide::Buy, 90, 3, None, OrderTraits::VANILLA)
        .unwrap();
    book.cancel_order(2, OrderSide::Buy, 90);

    let after = (book.best_bid_ask(), book.volume_bid_ask(), book.n_orders_bid_ask());
    assert_eq!(before, after);
}
