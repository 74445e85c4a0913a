//! Fill (trade execution) types

use crate::ids::OrderId;
use crate::numeric::{Price, Quantity};
use crate::order::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single execution between a resting maker and an incoming taker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub maker_id: OrderId,
    pub taker_id: OrderId,
    /// Side of the taker
    pub side: Side,
    /// Execution price, always the maker's resting price
    pub price: Price,
    pub quantity: Quantity,
    /// Global monotonic fill sequence
    pub sequence: u64,
}

impl Fill {
    pub fn new(
        sequence: u64,
        maker_id: OrderId,
        taker_id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            maker_id,
            taker_id,
            side,
            price,
            quantity,
            sequence,
        }
    }

    /// Calculate fill value (price × quantity)
    pub fn notional(&self) -> Decimal {
        self.quantity.as_decimal() * self.price.as_decimal()
    }
}
