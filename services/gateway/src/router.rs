use crate::handlers::{book, order};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/submit", post(order::submit_order))
        .route("/cancel", post(order::cancel_order))
        .route("/book", get(book::get_book))
        .route("/depth", get(book::get_depth))
        .route("/health", get(book::health))
        .layer(CatchPanicLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(1, 20))
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn submit(app: &Router, side: &str, price: f64, quantity: u64) -> Value {
        let (status, body) = call(
            app,
            Method::POST,
            "/submit",
            Some(json!({ "id": null, "side": side, "price": price, "quantity": quantity })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body
    }

    #[tokio::test]
    async fn test_black_box_flow() {
        let app = app();

        submit(&app, "Sell", 100.50, 10).await;
        submit(&app, "Sell", 101.00, 5).await;

        let (_, book) = call(&app, Method::GET, "/book", None).await;
        assert_eq!(book["asks"].as_array().unwrap().len(), 2);
        assert_eq!(book["asks"][0]["price"], json!(100.5));
        assert_eq!(book["asks"][0]["quantity"], json!(10.0));
        assert_eq!(book["bids"], json!([]));

        submit(&app, "Buy", 99.00, 7).await;

        let taker = submit(&app, "Buy", 101.00, 8).await;
        assert_eq!(taker["resting_quantity"], json!(0.0));
        assert_eq!(taker["status"], json!("Filled"));
        assert_eq!(taker["fills"][0]["price"], json!(100.5));
        assert_eq!(taker["fills"][0]["quantity"], json!(8.0));
        assert_eq!(taker["fills"][0]["taker_id"], taker["accepted_id"]);

        let (_, book) = call(&app, Method::GET, "/book", None).await;
        assert_eq!(book["asks"][0]["quantity"], json!(2.0));
        assert_eq!(book["asks"][1]["price"], json!(101.0));
        assert_eq!(book["bids"][0]["price"], json!(99.0));

        let bid_id = book["bids"][0]["id"].clone();
        let (status, body) = call(&app, Method::POST, "/cancel", Some(bid_id.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("Cancelled"));
        assert_eq!(body["remaining_quantity"], json!(7.0));

        let (_, book) = call(&app, Method::GET, "/book", None).await;
        assert_eq!(book["bids"], json!([]));

        let (status, body) = call(&app, Method::POST, "/cancel", Some(bid_id)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], json!("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_client_supplied_id_and_wrapped_cancel() {
        let app = app();

        let (status, body) = call(
            &app,
            Method::POST,
            "/submit",
            Some(json!({ "id": "my-order", "side": "Buy", "price": "10.25", "quantity": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["accepted_id"], json!("my-order"));
        assert_eq!(body["status"], json!("Resting"));

        let (status, body) = call(
            &app,
            Method::POST,
            "/submit",
            Some(json!({ "id": "my-order", "side": "Sell", "price": 11, "quantity": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("INVALID_ORDER"));

        let (status, _) = call(&app, Method::POST, "/cancel", Some(json!({ "id": "my-order" }))).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_invalid_orders_are_rejected() {
        let app = app();

        for body in [
            json!({ "side": "Buy", "price": 0, "quantity": 1 }),
            json!({ "side": "Buy", "price": -5.5, "quantity": 1 }),
            json!({ "side": "Sell", "price": 10, "quantity": 0 }),
        ] {
            let (status, response) = call(&app, Method::POST, "/submit", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["error"], json!("INVALID_ORDER"));
        }

        let (status, response) = call(
            &app,
            Method::POST,
            "/submit",
            Some(json!({ "side": "Hold", "price": 10, "quantity": 1 })),
        )
        .await;
        assert!(status.is_client_error());
        assert_eq!(response["error"], json!("BAD_REQUEST"));

        let (_, health) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(health["orders_admitted"], json!(0));
    }

    #[tokio::test]
    async fn test_oversized_level_is_rejected_and_engine_keeps_serving() {
        let app = app();
        let huge = json!({ "side": "Sell", "price": 100, "quantity": 4e28 });

        let (status, _) = call(&app, Method::POST, "/submit", Some(huge.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, response) = call(&app, Method::POST, "/submit", Some(huge)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response["error"], json!("INVALID_ORDER"));

        let (status, book) = call(&app, Method::GET, "/book", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(book["asks"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_depth_and_health() {
        let app = app();

        submit(&app, "Buy", 99.0, 3).await;
        submit(&app, "Buy", 99.0, 4).await;
        submit(&app, "Buy", 98.0, 1).await;

        let (status, depth) = call(&app, Method::GET, "/depth?levels=1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(depth["bids"].as_array().unwrap().len(), 1);
        assert_eq!(depth["bids"][0]["quantity"], json!(7.0));
        assert_eq!(depth["bids"][0]["order_count"], json!(2));

        let (status, health) = call(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], json!("ok"));
        assert_eq!(health["resting_bids"], json!(3));
        assert_eq!(health["orders_admitted"], json!(3));
    }
}
