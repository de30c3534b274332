//! Numeric coercion helpers shared across the order book layers.
//!
//! `Quantity` and `Price` are blanket-implemented over any concrete type that
//! satisfies their bound lists, so callers can instantiate [`crate::OrderBook`]
//! with plain integers, fixed-point wrappers, or anything else that behaves
//! like a number. The by-funds matching path needs to move between share
//! counts and notional currency, which is why both traits round-trip through
//! `f64` via `num_traits`.

use num_traits::{FromPrimitive, ToPrimitive, Zero};
use std::fmt::Debug;
use std::ops::{Add, Sub};
use std::time::{SystemTime, UNIX_EPOCH};

/// An order or fill size: addable, subtractable, comparable, and convertible
/// to/from `f64` for by-funds matching.
pub trait Quantity:
    Copy
    + Debug
    + PartialOrd
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Zero
    + ToPrimitive
    + FromPrimitive
{
}

impl<T> Quantity for T where
    T: Copy
        + Debug
        + PartialOrd
        + PartialEq
        + Add<Output = T>
        + Sub<Output = T>
        + Zero
        + ToPrimitive
        + FromPrimitive
{
}

/// A limit price: comparable and convertible to `f64` for funds arithmetic.
pub trait Price: Copy + Debug + PartialOrd + PartialEq + Zero + ToPrimitive {}

impl<T> Price for T where T: Copy + Debug + PartialOrd + PartialEq + Zero + ToPrimitive {}

/// Notional value of `size` shares at `price`, computed in `f64`.
///
/// This is the "wide floating type" the aggregate `total_volume_funds`
/// fields use; treat it as advisory, not authoritative for settlement.
pub fn funds_of<Sz: Quantity, Px: Price>(price: Px, size: Sz) -> f64 {
    price.to_f64().unwrap_or(0.0) * size.to_f64().unwrap_or(0.0)
}

/// The largest whole number of shares of `price` that `funds` can pay for,
/// expressed back in `Sz`. Returns zero if `price` is non-positive or if
/// `funds` can't cover even one share.
pub fn shares_for_funds<Sz: Quantity, Px: Price>(funds: f64, price: Px) -> Sz {
    let price_f = price.to_f64().unwrap_or(0.0);
    if price_f <= 0.0 {
        return Sz::zero();
    }
    let shares = (funds / price_f).floor();
    if shares <= 0.0 {
        Sz::zero()
    } else {
        Sz::from_f64(shares).unwrap_or_else(Sz::zero)
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
///
/// The core never stamps an [`crate::Order`] with this (arrival order is
/// positional, tracked by queue position, not by a recorded clock reading);
/// it is exposed for external collaborators (e.g. a CSV row's capture time).
pub fn current_time_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
