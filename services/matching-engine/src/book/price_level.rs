//! Price level implementation with FIFO queue
//!
//! A price level contains all orders at a specific price point.
//! Orders are keyed by their admission sequence, so iteration order is
//! arrival order and removal of any order is O(log n).

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Quantity;

/// A price level containing orders at a specific price
///
/// Maintains strict FIFO ordering for time-priority matching.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    /// Orders at this price level, ordered by admission sequence
    orders: BTreeMap<u64, OrderEntry>,
    /// Total quantity available at this level
    total_quantity: Quantity,
}

/// Entry in the price level queue
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEntry {
    pub order_id: OrderId,
    pub remaining_quantity: Quantity,
}

impl PriceLevel {
    /// Create a new empty price level
    pub fn new() -> Self {
        Self {
            orders: BTreeMap::new(),
            total_quantity: Quantity::zero(),
        }
    }

    /// Insert an order; its sequence decides its place in the queue
    ///
    /// # Panics
    /// Panics if the level total would overflow; callers check `can_accept` first
    pub fn insert(&mut self, sequence: u64, order_id: OrderId, quantity: Quantity) {
        let total = self
            .total_quantity
            .checked_add(quantity)
            .expect("Level total quantity overflowed");
        let previous = self.orders.insert(
            sequence,
            OrderEntry {
                order_id,
                remaining_quantity: quantity,
            },
        );
        assert!(previous.is_none(), "Sequence {sequence} already queued");
        self.total_quantity = total;
    }

    /// True if `quantity` can be added without overflowing the level total
    pub fn can_accept(&self, quantity: Quantity) -> bool {
        self.total_quantity.checked_add(quantity).is_some()
    }

    /// Remove an order by its sequence
    ///
    /// Returns the removed entry, or None if not found
    pub fn remove(&mut self, sequence: u64) -> Option<OrderEntry> {
        let entry = self.orders.remove(&sequence)?;
        self.total_quantity = self
            .total_quantity
            .checked_sub(entry.remaining_quantity)
            .unwrap_or(Quantity::zero());
        Some(entry)
    }

    /// Peek at the front order without removing it
    pub fn peek_front(&self) -> Option<(u64, &OrderEntry)> {
        self.orders.iter().next().map(|(seq, entry)| (*seq, entry))
    }

    /// Reduce the front order by `quantity`
    ///
    /// If the order's remaining quantity becomes zero it is removed.
    /// Returns (sequence, entry after the reduction), or None if the level is empty.
    ///
    /// # Panics
    /// Panics if `quantity` exceeds the front order's remaining quantity
    pub fn reduce_front(&mut self, quantity: Quantity) -> Option<(u64, OrderEntry)> {
        let mut front = self.orders.first_entry()?;
        let sequence = *front.key();
        let entry = front.get_mut();
        entry.remaining_quantity = entry
            .remaining_quantity
            .checked_sub(quantity)
            .expect("Fill would exceed resting quantity");
        let updated = entry.clone();

        if updated.remaining_quantity.is_zero() {
            front.remove();
        }

        self.total_quantity = self
            .total_quantity
            .checked_sub(quantity)
            .unwrap_or(Quantity::zero());

        Some((sequence, updated))
    }

    /// Iterate orders in time priority
    pub fn iter(&self) -> impl Iterator<Item = (u64, &OrderEntry)> + '_ {
        self.orders.iter().map(|(seq, entry)| (*seq, entry))
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Get the total quantity at this price level
    pub fn total_quantity(&self) -> Quantity {
        self.total_quantity
    }

    /// Get the number of orders at this level
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }
}

impl Default for PriceLevel {
    fn default() -> Self {
        Self::new()
    }
}
