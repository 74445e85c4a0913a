//! Error types for the matching engine
//!
//! Invalid input is the only recoverable failure; everything else is a
//! programming defect and halts the engine.

use thiserror::Error;

/// Top-level engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid order: {0}")]
    InvalidOrder(#[from] OrderError),

    #[error("Engine halted after an internal invariant violation")]
    Halted,
}

/// Order-specific errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrderError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Order id already resting: {order_id}")]
    DuplicateOrderId { order_id: String },
}
