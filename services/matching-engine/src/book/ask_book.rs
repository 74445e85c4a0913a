//! Ask (sell-side) order book
//!
//! Maintains sell orders sorted by price ascending (best ask first).
//! Uses BTreeMap for deterministic iteration order.

use std::collections::BTreeMap;
use types::numeric::{Price, Quantity};
use types::order::Order;

use super::price_level::{OrderEntry, PriceLevel};

/// Ask (sell) side order book
///
/// Orders are sorted by price ascending, so the lowest ask is first.
/// At each price level, orders are maintained in FIFO order.
#[derive(Debug, Clone)]
pub struct AskBook {
    /// Price levels sorted ascending (lowest price first)
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    /// Create a new empty ask book
    pub fn new() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }

    /// Insert an order into the ask book
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

    /// Remove an order from the ask book
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

    /// Get the best ask (lowest price) with its aggregated quantity
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        self.levels
            .iter()
            .next()
            .map(|(price, level)| (*price, level.total_quantity()))
    }

    /// Get the best ask price
    pub fn best_ask_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Get the highest-priority resting order
    pub fn best_order(&self) -> Option<(Price, u64, &OrderEntry)> {
        let (price, level) = self.levels.iter().next()?;
        let (sequence, entry) = level.peek_front()?;
        Some((*price, sequence, entry))
    }

    /// Reduce the highest-priority order by `quantity`
    ///
    /// Returns (price, sequence, entry after the reduction)
    pub(crate) fn reduce_best(&mut self, quantity: Quantity) -> Option<(Price, u64, OrderEntry)> {
        let mut best = self.levels.first_entry()?;
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
            .flat_map(|(price, level)| level.iter().map(move |(seq, entry)| (*price, seq, entry)))
    }

    /// Get depth snapshot (top N price levels): (price, total quantity, order count)
    pub fn depth_snapshot(&self, depth: usize) -> Vec<(Price, Quantity, usize)> {
        self.levels
            .iter()
            .take(depth)
            .map(|(price, level)| (*price, level.total_quantity(), level.order_count()))
            .collect()
    }

    /// Check if the ask book is empty
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

impl Default for AskBook {
    fn default() -> Self {
        Self::new()
    }
}
