//! Bid (buy-side) order book
//!
//! Maintains buy orders sorted by price descending (best bid first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::{OrderEntry, PriceLevel};

/// Bid (buy) side order book
///
/// Orders are sorted by price descending, so the highest bid is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct BidBook {
    /// Price levels; BTreeMap is ascending so the best bid is the last key
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
    /// Create a new empty bid book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order into the bid book
    pub fn insert(&mut self, order: &Order) {
        let level = self.levels.entry(order.price).or_default();
        level.insert(order.sequence, order.id.clone(), order.quantity);
    }

    /// True if `quantity` fits into the level at `price` without overflow
    pub fn can_accept(&self, price: Price, quantity: Quantity) -> bool {
        self.levels
            .get(&price)
            .map_or(true, |level| level.can_accept(quantity))
    }

    /// Remove an order from the bid book
    ///
    /// Returns the removed entry if the order was found
    pub fn remove(&mut self, price: Price, sequence: u64) -> Option<OrderEntry> {
        let level = self.levels.get_mut(&price)?;
        let entry = level.remove(sequence)?;
        // Remove empty price levels to keep book clean
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(entry)
    }

    /// Get the best bid (highest price) with its aggregated quantity
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next_back()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    /// Get the best bid price
    pub fn best_bid_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Get the highest-priority resting order
    pub fn best_order(&self) -> Option<(Price, u64, &OrderEntry)> {
        let (price, level) = self.levels.iter().next_back()?;
        let (sequence, entry) = level.peek_front()?;
        Some((*price, sequence, entry))
    }

    /// Reduce the highest-priority order by `quantity`
    ///
    /// Returns (price, sequence, entry after the reduction)
    pub(crate) fn reduce_best(&mut self, quantity: Quantity) -> Option<(Price, u64, OrderEntry)> {
        let mut best = self.levels.last_entry()?;
        let price = *best.key();
        let (sequence, entry) = best.get_mut().reduce_front(quantity)?;
        if best.get().is_empty() {
            best.remove();
        }
        Some((price, sequence, entry))
    }

    /// Iterate resting orders best-to-worst
    pub fn iter_orders(&self) -> impl Iterator<Item = (Price, u64, &OrderEntry)> + '_ {
        self.levels
            .iter()
            .rev()
            .flat_map(|(price, level)| level.iter().map(move |(seq, entry)| (*price, seq, entry)))
    }

    /// Get depth snapshot (top N price levels): (price, total quantity, order count)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity, usize)> {
        self.levels
            .iter()
            .rev() // Reverse to get highest prices first
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity(), level.order_count()))
            .collect()
    }

    /// Check if the bid book is empty
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Get the total number of price levels
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Get the total number of resting orders
    pub fn order_count(&self) -> usize {
        self.levels.values().map(PriceLevel::order_count).sum()
    }
}

impl Default for BidBook {
    fn default() -> Self {
        Self::new()
    }
}
