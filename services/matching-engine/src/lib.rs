//! Matching Engine Service
//!
//! Central limit order book for a single instrument with continuous
//! price-time priority matching.
//!
//! **Key Invariants:**
//! - Price-time priority strictly enforced
//! - Trades execute at the resting (maker) order's price
//! - No crossed book at any quiescent point
//! - Conservation of quantity
//! - At most one mutation in progress at a time

pub mod book;
pub mod matching;
pub mod engine;

pub use book::{BookSnapshot, DepthSnapshot, OrderBook};
pub use engine::{CancelResult, EngineStats, MatchingEngine, SubmitResult};
