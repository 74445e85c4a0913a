//! Fill execution and sequencing
//!
//! Owns the two process-wide counters: the admission sequence that orders
//! resting orders in time, and the fill sequence stamped on every execution.
//! Neither is ever reused: running out of sequence numbers is fatal rather
//! than wrapping back to zero.

use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;
use types::trade::Fill;

/// Match executor for sequencing orders and generating fills
#[derive(Debug, Clone)]
pub struct MatchExecutor {
    order_sequence: u64,
    fill_sequence: u64,
}

impl MatchExecutor {
    /// Create a new match executor with starting sequence number
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            order_sequence: starting_sequence,
            fill_sequence: starting_sequence,
        }
    }

    /// Get next admission sequence number (monotonically increasing)
    ///
    /// # Panics
    /// Panics once the sequence space is exhausted
    pub fn next_order_sequence(&mut self) -> u64 {
        let seq = self.order_sequence;
        self.order_sequence = seq.checked_add(1).expect("Order sequence exhausted");
        seq
    }

    fn next_fill_sequence(&mut self) -> u64 {
        let seq = self.fill_sequence;
        self.fill_sequence = seq.checked_add(1).expect("Fill sequence exhausted");
        seq
    }

    /// Execute a fill between maker and taker orders
    ///
    /// # Panics
    /// Panics on a zero quantity, which the match loop never produces
    pub fn execute_fill(
        &mut self,
        maker_id: OrderId,
        taker_id: OrderId,
        side: Side,      // From taker perspective
        price: Price,    // Execution price (maker's price)
        quantity: Quantity,
    ) -> Fill {
        assert!(!quantity.is_zero(), "Fill quantity must be positive");
        let sequence = self.next_fill_sequence();
        Fill::new(sequence, maker_id, taker_id, side, price, quantity)
    }

    /// Number of orders admitted since `starting_sequence`
    pub fn orders_admitted(&self, starting_sequence: u64) -> u64 {
        self.order_sequence - starting_sequence
    }

    /// Number of fills executed since `starting_sequence`
    pub fn fills_executed(&self, starting_sequence: u64) -> u64 {
        self.fill_sequence - starting_sequence
    }
}
