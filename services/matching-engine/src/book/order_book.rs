//! Single-instrument order book
//!
//! Combines the bid and ask books with an id index so that an order can be
//! cancelled by id in O(log n) without scanning price levels.
//!
//! Invariants (checked by the engine at every quiescent point):
//! - best bid < best ask, or one side is empty
//! - every resting order has quantity > 0
//! - an id rests at most once across both sides

use serde::Serialize;
use std::collections::HashMap;
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

use super::ask_book::AskBook;
use super::bid_book::BidBook;
use super::price_level::OrderEntry;

/// Where a resting order lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Location {
    side: Side,
    price: Price,
    sequence: u64,
}

/// Owned view of one resting order
#[derive(Debug, Clone, PartialEq)]
pub struct BookEntry {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    pub quantity: Quantity,
    pub sequence: u64,
}

impl BookEntry {
    fn from_parts(side: Side, price: Price, sequence: u64, entry: &OrderEntry) -> Self {
        Self {
            id: entry.order_id.clone(),
            side,
            price,
            quantity: entry.remaining_quantity,
            sequence,
        }
    }
}

/// Resting order as exposed to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSnapshot {
    pub id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}

/// Point-in-time copy of the book, each side ordered best-to-worst
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookSnapshot {
    pub bids: Vec<OrderSnapshot>,
    pub asks: Vec<OrderSnapshot>,
}

impl BookSnapshot {
    /// True if both sides are non-empty and the best bid reaches the best ask
    pub fn is_crossed(&self) -> bool {
        match (self.bids.first(), self.asks.first()) {
            (Some(bid), Some(ask)) => bid.price >= ask.price,
            _ => false,
        }
    }
}

/// Aggregated price level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepthLevel {
    pub price: Price,
    pub quantity: Quantity,
    pub order_count: usize,
}

/// Top-of-book depth, each side ordered best-to-worst
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DepthSnapshot {
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
}

/// Order book for the single traded instrument
#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    bids: BidBook,
    asks: AskBook,
    index: HashMap<OrderId, Location>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an order to its side of the book
    ///
    /// # Panics
    /// Panics if the order has no remaining quantity or its id is already resting
    pub fn insert_resting(&mut self, order: &Order) {
        assert!(!order.quantity.is_zero(), "Cannot rest an order with zero quantity");
        assert!(
            !self.index.contains_key(&order.id),
            "Order id {} already resting",
            order.id
        );

        match order.side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
        self.index.insert(
            order.id.clone(),
            Location {
                side: order.side,
                price: order.price,
                sequence: order.sequence,
            },
        );
    }

    /// True if resting `quantity` at `price` keeps the level total representable
    pub fn can_rest(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        match side {
            Side::Buy => self.bids.can_accept(price, quantity),
            Side::Sell => self.asks.can_accept(price, quantity),
        }
    }

    /// Highest-priority resting order for `side`
    pub fn best(&self, side: Side) -> Option<BookEntry> {
        let (price, sequence, entry) = match side {
            Side::Buy => self.bids.best_order()?,
            Side::Sell => self.asks.best_order()?,
        };
        Some(BookEntry::from_parts(side, price, sequence, entry))
    }

    /// Remove a resting order by id
    ///
    /// Returns the removed order, or None if no order with that id is resting
    pub fn remove(&mut self, id: &OrderId) -> Option<BookEntry> {
        let location = self.index.remove(id)?;
        let entry = match location.side {
            Side::Buy => self.bids.remove(location.price, location.sequence),
            Side::Sell => self.asks.remove(location.price, location.sequence),
        };
        let entry = entry.expect("Order index points at a missing order");
        Some(BookEntry::from_parts(
            location.side,
            location.price,
            location.sequence,
            &entry,
        ))
    }

    /// Reduce the best order of `side` by `quantity`, dropping it when exhausted
    ///
    /// Returns the order after the reduction (quantity zero if it was removed).
    ///
    /// # Panics
    /// Panics if `quantity` exceeds the best order's remaining quantity
    pub(crate) fn fill_best(&mut self, side: Side, quantity: Quantity) -> Option<BookEntry> {
        let (price, sequence, entry) = match side {
            Side::Buy => self.bids.reduce_best(quantity)?,
            Side::Sell => self.asks.reduce_best(quantity)?,
        };
        if entry.remaining_quantity.is_zero() {
            self.index.remove(&entry.order_id);
        }
        Some(BookEntry::from_parts(side, price, sequence, &entry))
    }

    pub fn contains(&self, id: &OrderId) -> bool {
        self.index.contains_key(id)
    }

    /// Number of resting orders across both sides
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn side_len(&self, side: Side) -> usize {
        match side {
            Side::Buy => self.bids.order_count(),
            Side::Sell => self.asks.order_count(),
        }
    }

    pub fn best_bid_price(&self) -> Option<Price> {
        self.bids.best_bid_price()
    }

    pub fn best_ask_price(&self) -> Option<Price> {
        self.asks.best_ask_price()
    }

    /// True if both sides are non-empty and best bid >= best ask
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid_price(), self.best_ask_price()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    /// Owned copy of every resting order, best-to-worst per side
    pub fn snapshot(&self) -> BookSnapshot {
        let to_snapshot = |(price, _, entry): (Price, u64, &OrderEntry)| OrderSnapshot {
            id: entry.order_id.clone(),
            price,
            quantity: entry.remaining_quantity,
        };
        BookSnapshot {
            bids: self.bids.iter_orders().map(to_snapshot).collect(),
            asks: self.asks.iter_orders().map(to_snapshot).collect(),
        }
    }

    /// Aggregated top `levels` price levels per side
    pub fn depth(&self, levels: usize) -> DepthSnapshot {
        let to_level = |(price, quantity, order_count): (Price, Quantity, usize)| DepthLevel {
            price,
            quantity,
            order_count,
        };
        DepthSnapshot {
            bids: self.bids.depth_snapshot(levels).into_iter().map(to_level).collect(),
            asks: self.asks.depth_snapshot(levels).into_iter().map(to_level).collect(),
        }
    }
}
