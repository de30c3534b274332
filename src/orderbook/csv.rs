//! CSV export of resting orders: an external collaborator over the book's
//! public accessors, with no access to (or knowledge of) its internal
//! `BTreeMap`/`VecDeque` representation.

use crate::orderbook::book::OrderBook;
use crate::utils::{Price, Quantity};
use std::fmt::Display;
use std::hash::Hash;
use std::io::{self, Write};

/// Writes every resting order on `book` to `out` as CSV: bids first, then
/// asks, each in the price-time priority [`OrderBook::bid_orders`] and
/// [`OrderBook::ask_orders`] already expose.
///
/// Header: `TRD,ID,SIDE,SIZE,PX,ACCT`. Row: `LMT,<order_id>,<side>,<size>,
/// <price>,<account_id>`, with the account column left empty for orders
/// submitted without one.
///
/// # Errors
/// Propagates any I/O error from writing to `out`.
pub fn write_resting_orders<Sz, Px, Oid, Aid, W>(
    book: &OrderBook<Sz, Px, Oid, Aid>,
    out: &mut W,
) -> io::Result<()>
where
    Sz: Quantity + Display,
    Px: Price + Display,
    Oid: Copy + Eq + Hash + Display,
    Aid: Copy + Eq + Hash + Display,
    W: Write,
{
    writeln!(out, "TRD,ID,SIDE,SIZE,PX,ACCT")?;
    for order in book.bid_orders().chain(book.ask_orders()) {
        let account = order
            .account_id
            .map(|a| a.to_string())
            .unwrap_or_default();
        writeln!(
            out,
            "LMT,{},{},{},{},{}",
            order.order_id, order.side, order.size, order.price, account
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orderbook::{OrderSide, OrderTraits};

    #[test]
    fn header_only_for_empty_book() {
        let book: OrderBook<u32, u32, u32, u32> = OrderBook::new();
        let mut buf = Vec::new();
        write_resting_orders(&book, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "TRD,ID,SIDE,SIZE,PX,ACCT\n");
    }

    #[test]
    fn bids_then_asks_one_row_each() {
        let mut book: OrderBook<u32, u32, u32, u32> = OrderBook::new();
        book.submit_limit_order(1, OrderSide::Buy, 100, 10, Some(7), OrderTraits::VANILLA)
            .unwrap();
        book.submit_limit_order(2, OrderSide::Sell, 105, 5, None, OrderTraits::VANILLA)
            .unwrap();

        let mut buf = Vec::new();
        write_resting_orders(&book, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("TRD,ID,SIDE,SIZE,PX,ACCT"));
        assert_eq!(lines.next(), Some("LMT,1,BUY,10,100,7"));
        assert_eq!(lines.next(), Some("LMT,2,SELL,5,105,"));
        assert_eq!(lines.next(), None);
    }
}
