use crate::error::AppError;
use crate::models::{BookResponse, DepthParams, DepthResponse, HealthResponse};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    Json,
};

pub async fn get_book(State(state): State<AppState>) -> Result<Json<BookResponse>, AppError> {
    let snapshot = state.engine.query()?;
    Ok(Json(snapshot.into()))
}

pub async fn get_depth(
    State(state): State<AppState>,
    Query(params): Query<DepthParams>,
) -> Result<Json<DepthResponse>, AppError> {
    let levels = params.levels.unwrap_or(state.default_depth);
    let depth = state.engine.depth(levels)?;
    Ok(Json(depth.into()))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let stats = state.engine.stats()?;
    Ok(Json(stats.into()))
}
