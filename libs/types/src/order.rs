//! Order lifecycle types
//!
//! Per-order state machine:
//! `New → {PartiallyFilled → Resting}* → {Filled | Cancelled}`

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buyer or seller)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy order (bid)
    Buy,
    /// Sell order (ask)
    Sell,
}

impl Side {
    /// Get the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// Order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Admitted, not yet matched
    New,
    /// Matched for part of its quantity
    PartiallyFilled,
    /// Sitting in the book awaiting a match
    Resting,
    /// Completely matched (terminal)
    Filled,
    /// Removed by request (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Check if status is terminal (no further transitions possible)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Filled | OrderStatus::Cancelled)
    }
}

/// Unvalidated submission as received from a client
///
/// Price and quantity are raw decimals here; the engine turns them into
/// `Price`/`Quantity` or rejects the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
}

impl OrderRequest {
    pub fn new(side: Side, price: Decimal, quantity: Decimal) -> Self {
        Self {
            id: None,
            side,
            price,
            quantity,
        }
    }

    /// Attach a client-supplied id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// An admitted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub price: Price,
    /// Remaining quantity; decreases monotonically as fills occur
    pub quantity: Quantity,
    pub original_quantity: Quantity,
    /// Admission counter used for time priority only
    pub sequence: u64,
    pub status: OrderStatus,
}

impl Order {
    /// Create a new order
    pub fn new(id: OrderId, side: Side, price: Price, quantity: Quantity, sequence: u64) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
            original_quantity: quantity,
            sequence,
            status: OrderStatus::New,
        }
    }

    /// Quantity matched so far
    pub fn filled_quantity(&self) -> Quantity {
        self.original_quantity
            .checked_sub(self.quantity)
            .unwrap_or(Quantity::zero())
    }

    /// Check quantity invariant: filled + remaining = original
    pub fn check_invariant(&self) -> bool {
        self.filled_quantity() + self.quantity == self.original_quantity
    }

    pub fn is_filled(&self) -> bool {
        self.quantity.is_zero()
    }

    /// Apply a fill and adjust status
    ///
    /// # Panics
    /// Panics if the fill would exceed the remaining quantity
    pub fn apply_fill(&mut self, fill_quantity: Quantity) {
        self.quantity = self
            .quantity
            .checked_sub(fill_quantity)
            .expect("Fill would exceed order quantity");

        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
    }

    /// Mark the order as resting in the book
    pub fn rest(&mut self) {
        assert!(!self.status.is_terminal(), "Cannot rest terminal order");
        self.status = OrderStatus::Resting;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_order(qty: u64) -> Order {
        Order::new(
            OrderId::new(),
            Side::Buy,
            Price::from_u64(100),
            Quantity::from_u64(qty),
            1,
        )
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Buy.opposite(), Side::Sell);
        assert_eq!(Side::Sell.opposite(), Side::Buy);
    }

    #[test]
    fn test_side_wire_tags() {
        assert_eq!(serde_json::to_string(&Side::Buy).unwrap(), "\"Buy\"");
        assert_eq!(serde_json::from_str::<Side>("\"Sell\"").unwrap(), Side::Sell);
        assert!(serde_json::from_str::<Side>("\"Hold\"").is_err());
    }

    #[test]
    fn test_order_creation() {
        let order = create_order(10);
        assert_eq!(order.status, OrderStatus::New);
        assert!(order.check_invariant());
        assert!(order.filled_quantity().is_zero());
    }

    #[test]
    fn test_order_fill() {
        let mut order = create_order(10);

        order.apply_fill(Quantity::from_u64(3));
        assert_eq!(order.status, OrderStatus::PartiallyFilled);
        assert_eq!(order.quantity, Quantity::from_u64(7));
        assert_eq!(order.filled_quantity(), Quantity::from_u64(3));
        assert!(order.check_invariant());

        order.apply_fill(Quantity::from_u64(7));
        assert_eq!(order.status, OrderStatus::Filled);
        assert!(order.is_filled());
        assert!(order.check_invariant());
    }

    #[test]
    #[should_panic(expected = "Fill would exceed order quantity")]
    fn test_order_overfill_panics() {
        let mut order = create_order(1);
        order.apply_fill(Quantity::from_u64(2));
    }

    #[test]
    #[should_panic(expected = "Cannot rest terminal order")]
    fn test_rest_filled_order_panics() {
        let mut order = create_order(1);
        order.apply_fill(Quantity::from_u64(1));
        order.rest();
    }

    #[test]
    fn test_order_request_accepts_numbers_and_missing_id() {
        let req: OrderRequest =
            serde_json::from_str(r#"{"side":"Buy","price":100.5,"quantity":7}"#).unwrap();
        assert_eq!(req.id, None);
        assert_eq!(req.side, Side::Buy);
        assert_eq!(req.price, Decimal::new(1005, 1));
        assert_eq!(req.quantity, Decimal::from(7));
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Filled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Resting.is_terminal());
        assert!(!OrderStatus::PartiallyFilled.is_terminal());
    }
}
