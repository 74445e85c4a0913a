//! End-to-end matching scenarios
//!
//! Mirrors the black-box HTTP exercise: rest two asks, rest a bid below
//! them, lift part of the best ask, then cancel the bid twice.

use matching_engine::{CancelResult, MatchingEngine};
use rust_decimal::Decimal;
use std::str::FromStr;
use types::numeric::{Price, Quantity};
use types::order::{OrderRequest, OrderStatus, Side};

fn submit(engine: &MatchingEngine, side: Side, price: &str, qty: u64) -> matching_engine::SubmitResult {
    engine
        .submit(OrderRequest::new(
            side,
            Decimal::from_str(price).unwrap(),
            Decimal::from(qty),
        ))
        .unwrap()
}

fn levels(entries: &[matching_engine::book::OrderSnapshot]) -> Vec<(Price, Quantity)> {
    entries.iter().map(|o| (o.price, o.quantity)).collect()
}

fn px(s: &str) -> Price {
    Price::from_str(s).unwrap()
}

#[test]
fn test_black_box_sequence() {
    let engine = MatchingEngine::default();

    // 1. Two asks rest
    let ask1 = submit(&engine, Side::Sell, "100.50", 10);
    let ask2 = submit(&engine, Side::Sell, "101.00", 5);
    assert_eq!(ask1.status, OrderStatus::Resting);
    assert_eq!(ask2.status, OrderStatus::Resting);

    let book = engine.query().unwrap();
    assert_eq!(
        levels(&book.asks),
        vec![(px("100.50"), Quantity::from_u64(10)), (px("101.00"), Quantity::from_u64(5))]
    );
    assert!(book.bids.is_empty());

    // 2. A bid below the best ask rests
    let bid = submit(&engine, Side::Buy, "99.00", 7);
    assert!(bid.fills.is_empty());
    let book = engine.query().unwrap();
    assert_eq!(levels(&book.bids), vec![(px("99.00"), Quantity::from_u64(7))]);

    // 3. A crossing buy takes 8 from the best ask at the ask's price
    let taker = submit(&engine, Side::Buy, "101.00", 8);
    assert_eq!(taker.status, OrderStatus::Filled);
    assert!(taker.resting_quantity.is_zero());
    assert_eq!(taker.fills.len(), 1);
    assert_eq!(taker.fills[0].maker_id, ask1.accepted_id);
    assert_eq!(taker.fills[0].taker_id, taker.accepted_id);
    assert_eq!(taker.fills[0].price, px("100.50"));
    assert_eq!(taker.fills[0].quantity, Quantity::from_u64(8));

    let book = engine.query().unwrap();
    assert_eq!(
        levels(&book.asks),
        vec![(px("100.50"), Quantity::from_u64(2)), (px("101.00"), Quantity::from_u64(5))]
    );
    assert_eq!(levels(&book.bids), vec![(px("99.00"), Quantity::from_u64(7))]);
    assert_eq!(book.asks[0].id, ask1.accepted_id);

    // 4. Cancel the bid, then cancel it again
    let bid_id = book.bids[0].id.clone();
    assert_eq!(bid_id, bid.accepted_id);
    assert!(matches!(
        engine.cancel(&bid_id).unwrap(),
        CancelResult::Cancelled { .. }
    ));
    assert!(engine.query().unwrap().bids.is_empty());
    assert_eq!(engine.cancel(&bid_id).unwrap(), CancelResult::NotFound);
}

#[test]
fn test_equal_price_matches_instead_of_resting() {
    let engine = MatchingEngine::default();

    submit(&engine, Side::Buy, "100.00", 3);
    let sell = submit(&engine, Side::Sell, "100", 3);

    assert_eq!(sell.fills.len(), 1);
    assert_eq!(sell.status, OrderStatus::Filled);
    let book = engine.query().unwrap();
    assert!(book.bids.is_empty() && book.asks.is_empty());
}

#[test]
fn test_time_priority_within_level() {
    let engine = MatchingEngine::default();

    let first = submit(&engine, Side::Sell, "50", 2);
    let second = submit(&engine, Side::Sell, "50", 2);

    let taker = submit(&engine, Side::Buy, "50", 3);
    let makers: Vec<_> = taker.fills.iter().map(|f| f.maker_id.clone()).collect();
    assert_eq!(makers, vec![first.accepted_id, second.accepted_id.clone()]);

    let book = engine.query().unwrap();
    assert_eq!(book.asks.len(), 1);
    assert_eq!(book.asks[0].id, second.accepted_id);
    assert_eq!(book.asks[0].quantity, Quantity::from_u64(1));
}

#[test]
fn test_fill_sequences_increase_across_submissions() {
    let engine = MatchingEngine::default();

    submit(&engine, Side::Sell, "10", 1);
    submit(&engine, Side::Sell, "11", 1);
    let a = submit(&engine, Side::Buy, "10", 1);
    let b = submit(&engine, Side::Buy, "11", 1);

    assert!(a.fills[0].sequence < b.fills[0].sequence);
}
