//! Types library for the CLOB matching engine
//!
//! This library provides the core type definitions shared by the matching
//! engine and the HTTP gateway, keeping arithmetic exact and ids opaque.
//!
//! # Modules
//! - `ids`: Order identifiers
//! - `numeric`: Fixed-point decimal types (Price, Quantity)
//! - `order`: Order lifecycle types
//! - `trade`: Fill (execution) types
//! - `errors`: Error taxonomy

pub mod ids;
pub mod numeric;
pub mod order;
pub mod trade;
pub mod errors;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::order::*;
    pub use crate::trade::*;
    pub use crate::errors::*;
}
