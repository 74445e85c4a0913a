//! Wire models. Prices and quantities go out as JSON numbers.

use matching_engine::book::{DepthLevel, OrderSnapshot};
use matching_engine::{BookSnapshot, DepthSnapshot, EngineStats, SubmitResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::order::{OrderStatus, Side};
use types::trade::Fill;

#[derive(Debug, Clone, Serialize)]
pub struct FillResponse {
    pub maker_id: OrderId,
    pub taker_id: OrderId,
    pub side: Side,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub sequence: u64,
}

impl From<Fill> for FillResponse {
    fn from(fill: Fill) -> Self {
        Self {
            maker_id: fill.maker_id,
            taker_id: fill.taker_id,
            side: fill.side,
            price: fill.price.as_decimal(),
            quantity: fill.quantity.as_decimal(),
            sequence: fill.sequence,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitOrderResponse {
    pub accepted_id: OrderId,
    pub fills: Vec<FillResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub resting_quantity: Decimal,
    pub status: OrderStatus,
}

impl From<SubmitResult> for SubmitOrderResponse {
    fn from(result: SubmitResult) -> Self {
        Self {
            accepted_id: result.accepted_id,
            fills: result.fills.into_iter().map(FillResponse::from).collect(),
            resting_quantity: result.resting_quantity.as_decimal(),
            status: result.status,
        }
    }
}

/// Cancel body: either a bare JSON string or `{"id": "..."}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CancelOrderRequest {
    Bare(String),
    Wrapped { id: String },
}

impl CancelOrderRequest {
    pub fn id(&self) -> &str {
        match self {
            CancelOrderRequest::Bare(id) => id,
            CancelOrderRequest::Wrapped { id } => id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CancelOrderResponse {
    pub status: OrderStatus,
    pub id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub remaining_quantity: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookOrderResponse {
    pub id: OrderId,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
}

impl From<OrderSnapshot> for BookOrderResponse {
    fn from(order: OrderSnapshot) -> Self {
        Self {
            id: order.id,
            price: order.price.as_decimal(),
            quantity: order.quantity.as_decimal(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookResponse {
    pub bids: Vec<BookOrderResponse>,
    pub asks: Vec<BookOrderResponse>,
}

impl From<BookSnapshot> for BookResponse {
    fn from(snapshot: BookSnapshot) -> Self {
        Self {
            bids: snapshot.bids.into_iter().map(BookOrderResponse::from).collect(),
            asks: snapshot.asks.into_iter().map(BookOrderResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepthLevelResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    pub order_count: usize,
}

impl From<DepthLevel> for DepthLevelResponse {
    fn from(level: DepthLevel) -> Self {
        Self {
            price: level.price.as_decimal(),
            quantity: level.quantity.as_decimal(),
            order_count: level.order_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DepthResponse {
    pub bids: Vec<DepthLevelResponse>,
    pub asks: Vec<DepthLevelResponse>,
}

impl From<DepthSnapshot> for DepthResponse {
    fn from(depth: DepthSnapshot) -> Self {
        Self {
            bids: depth.bids.into_iter().map(DepthLevelResponse::from).collect(),
            asks: depth.asks.into_iter().map(DepthLevelResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DepthParams {
    pub levels: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub resting_bids: usize,
    pub resting_asks: usize,
    pub orders_admitted: u64,
    pub fills_executed: u64,
}

impl From<EngineStats> for HealthResponse {
    fn from(stats: EngineStats) -> Self {
        Self {
            status: "ok",
            resting_bids: stats.resting_bids,
            resting_asks: stats.resting_asks,
            orders_admitted: stats.orders_admitted,
            fills_executed: stats.fills_executed,
        }
    }
}
