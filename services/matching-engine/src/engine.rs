//! Matching engine core
//!
//! The engine is the only writer of the order book. Every operation takes the
//! same lock, so no two submissions interleave their match loops and a query
//! never sees a book mid-match.
//!
//! A crossed book at a quiescent point is a programming defect: the engine
//! panics while holding the lock, which poisons it, and every later call
//! returns `EngineError::Halted` instead of trading on inconsistent state.

use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info};
use types::errors::{EngineError, OrderError};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::{Order, OrderRequest, OrderStatus, Side};
use types::trade::Fill;

use crate::book::{BookSnapshot, DepthSnapshot, OrderBook};
use crate::matching::{crossing, MatchExecutor};

/// Main matching engine
pub struct MatchingEngine {
    state: Mutex<EngineState>,
    starting_sequence: u64,
}

/// Everything guarded by the engine lock
struct EngineState {
    book: OrderBook,
    /// Sequence generation for admissions and fills
    executor: MatchExecutor,
}

/// Result of submitting an order
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResult {
    /// Id the order was admitted under (generated if none was supplied)
    pub accepted_id: OrderId,
    /// Fills in match order
    pub fills: Vec<Fill>,
    /// Quantity left resting in the book (zero if fully filled)
    pub resting_quantity: Quantity,
    /// `Filled` or `Resting`
    pub status: OrderStatus,
}

impl SubmitResult {
    /// Total quantity matched by this submission
    pub fn filled_quantity(&self) -> Quantity {
        self.fills.iter().map(|fill| fill.quantity).sum()
    }
}

/// Result of a cancel request
#[derive(Debug, Clone, PartialEq)]
pub enum CancelResult {
    /// Order removed; `remaining_quantity` is what was still resting
    Cancelled {
        order_id: OrderId,
        remaining_quantity: Quantity,
    },
    /// No resting order has that id
    NotFound,
}

/// Engine counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStats {
    pub resting_bids: usize,
    pub resting_asks: usize,
    pub orders_admitted: u64,
    pub fills_executed: u64,
}

impl MatchingEngine {
    /// Create a new matching engine with starting sequence
    pub fn new(starting_sequence: u64) -> Self {
        Self {
            state: Mutex::new(EngineState {
                book: OrderBook::new(),
                executor: MatchExecutor::new(starting_sequence),
            }),
            starting_sequence,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, EngineState>, EngineError> {
        self.state.lock().map_err(|_| {
            error!("Engine lock poisoned; refusing request");
            EngineError::Halted
        })
    }

    /// Submit an order to the matching engine
    ///
    /// The order is matched against the opposite side at the resting orders'
    /// prices; any remainder rests on its own side. Invalid orders are
    /// rejected before the book is touched.
    pub fn submit(&self, request: OrderRequest) -> Result<SubmitResult, EngineError> {
        let (price, quantity) = validate(&request)?;
        let requested_id = request.id.as_deref().and_then(OrderId::parse);

        let mut state = self.lock()?;

        let id = match requested_id {
            Some(id) if state.book.contains(&id) => {
                return Err(OrderError::DuplicateOrderId {
                    order_id: id.to_string(),
                }
                .into());
            }
            Some(id) => id,
            None => OrderId::new(),
        };

        // Any remainder rests at (side, price); that level's total must stay representable
        if !state.book.can_rest(request.side, price, quantity) {
            debug!(side = ?request.side, %price, %quantity, "Level total would overflow");
            return Err(OrderError::InvalidQuantity(request.quantity.to_string()).into());
        }

        let sequence = state.executor.next_order_sequence();
        let mut order = Order::new(id, request.side, price, quantity, sequence);

        let fills = state.match_order(&mut order);

        if !order.is_filled() {
            order.rest();
            state.book.insert_resting(&order);
            info!(
                order_id = %order.id,
                side = ?order.side,
                price = %order.price,
                quantity = %order.quantity,
                sequence,
                "Order resting"
            );
        }

        state.check_invariants();

        Ok(SubmitResult {
            accepted_id: order.id,
            fills,
            resting_quantity: order.quantity,
            status: order.status,
        })
    }

    /// Cancel a resting order
    ///
    /// Only the order's current remaining quantity is removed.
    pub fn cancel(&self, order_id: &OrderId) -> Result<CancelResult, EngineError> {
        let mut state = self.lock()?;

        match state.book.remove(order_id) {
            Some(entry) => {
                info!(
                    order_id = %entry.id,
                    side = ?entry.side,
                    remaining = %entry.quantity,
                    "Order cancelled"
                );
                Ok(CancelResult::Cancelled {
                    order_id: entry.id,
                    remaining_quantity: entry.quantity,
                })
            }
            None => {
                debug!(order_id = %order_id, "Cancel for unknown order");
                Ok(CancelResult::NotFound)
            }
        }
    }

    /// Get a snapshot of every resting order
    pub fn query(&self) -> Result<BookSnapshot, EngineError> {
        Ok(self.lock()?.book.snapshot())
    }

    /// Get aggregated depth (top N price levels per side)
    pub fn depth(&self, levels: usize) -> Result<DepthSnapshot, EngineError> {
        Ok(self.lock()?.book.depth(levels))
    }

    pub fn stats(&self) -> Result<EngineStats, EngineError> {
        let state = self.lock()?;
        Ok(EngineStats {
            resting_bids: state.book.side_len(Side::Buy),
            resting_asks: state.book.side_len(Side::Sell),
            orders_admitted: state.executor.orders_admitted(self.starting_sequence),
            fills_executed: state.executor.fills_executed(self.starting_sequence),
        })
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(1)
    }
}

impl EngineState {
    /// Match an incoming order against the opposite side
    ///
    /// Runs until the order is filled, the opposite side is empty, or the
    /// best opposite price no longer crosses.
    fn match_order(&mut self, order: &mut Order) -> Vec<Fill> {
        let mut fills = Vec::new();
        let opposite = order.side.opposite();

        while !order.is_filled() {
            let Some(maker) = self.book.best(opposite) else {
                break;
            };
            if !crossing::incoming_can_match(order.side, order.price, maker.price) {
                break;
            }

            let match_qty = order.quantity.min(maker.quantity);

            // Execution price is the maker's price
            let fill = self.executor.execute_fill(
                maker.id,
                order.id.clone(),
                order.side,
                maker.price,
                match_qty,
            );

            order.apply_fill(match_qty);
            self.book.fill_best(opposite, match_qty);

            debug!(
                maker_id = %fill.maker_id,
                taker_id = %fill.taker_id,
                price = %fill.price,
                quantity = %fill.quantity,
                sequence = fill.sequence,
                "Fill executed"
            );
            fills.push(fill);
        }

        fills
    }

    fn check_invariants(&self) {
        if self.book.is_crossed() {
            let best_bid = self.book.best_bid_price();
            let best_ask = self.book.best_ask_price();
            error!(?best_bid, ?best_ask, "Crossed book after mutation");
            panic!("Crossed book: best bid {best_bid:?} >= best ask {best_ask:?}");
        }
    }
}

/// Validate raw price and quantity
fn validate(request: &OrderRequest) -> Result<(Price, Quantity), OrderError> {
    let price = Price::try_new(request.price)
        .ok_or_else(|| OrderError::InvalidPrice(request.price.to_string()))?;
    let quantity = Quantity::try_new(request.quantity)
        .filter(|q| !q.is_zero())
        .ok_or_else(|| OrderError::InvalidQuantity(request.quantity.to_string()))?;
    Ok((price, quantity))
}
