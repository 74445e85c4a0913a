use crate::error::AppError;
use crate::models::{CancelOrderRequest, CancelOrderResponse, SubmitOrderResponse};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use matching_engine::CancelResult;
use types::ids::OrderId;
use types::order::{OrderRequest, OrderStatus};

pub async fn submit_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<SubmitOrderResponse>, AppError> {
    let Json(request) = payload?;

    let result = state.engine.submit(request).inspect_err(|e| {
        tracing::debug!(error = %e, "Order rejected");
    })?;

    tracing::debug!(
        order_id = %result.accepted_id,
        fills = result.fills.len(),
        resting = %result.resting_quantity,
        "Order accepted"
    );

    Ok(Json(result.into()))
}

pub async fn cancel_order(
    State(state): State<AppState>,
    payload: Result<Json<CancelOrderRequest>, JsonRejection>,
) -> Result<Json<CancelOrderResponse>, AppError> {
    let Json(request) = payload?;

    // A blank id can never be resting
    let order_id = OrderId::parse(request.id())
        .ok_or_else(|| AppError::NotFound("Order not found.".to_string()))?;

    match state.engine.cancel(&order_id)? {
        CancelResult::Cancelled {
            order_id,
            remaining_quantity,
        } => Ok(Json(CancelOrderResponse {
            status: OrderStatus::Cancelled,
            id: order_id,
            remaining_quantity: remaining_quantity.as_decimal(),
        })),
        CancelResult::NotFound => Err(AppError::NotFound("Order not found.".to_string())),
    }
}
