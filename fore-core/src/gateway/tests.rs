use super::*;
use crate::broker::mock::MockBroker;
use crate::broker::PendingOrder;
use crate::models::{InstrumentInfo, Rung};

fn gold_info() -> InstrumentInfo {
    InstrumentInfo::new("XAUUSD", 2, 0.01, 0.01, 0.01, 100.0)
}

fn gold_broker() -> MockBroker {
    let mut broker = MockBroker::new().with_instrument(gold_info());
    broker.set_quote("XAUUSD", 3462.0, 3462.3);
    broker
}

fn buy_plan(rungs: usize) -> OrderPlan {
    let rungs = (0..rungs)
        .map(|i| Rung::new(3463.0 - i as f64, 0.10, None))
        .collect();
    OrderPlan::new("XAUUSD", Side::Buy, 3455.0, rungs)
}

fn pending(ticket: u64, symbol: &str, magic: i64, comment: &str) -> PendingOrder {
    PendingOrder {
        ticket,
        symbol: symbol.to_string(),
        side: Side::Buy,
        price: 3460.0,
        lot: 0.10,
        magic,
        comment: comment.to_string(),
    }
}

fn open_position(ticket: u64, magic: i64, comment: &str, profit: f64) -> OpenPosition {
    OpenPosition {
        ticket,
        symbol: "XAUUSD".to_string(),
        side: Side::Buy,
        lot: 0.10,
        entry_price: 3460.0,
        stop_loss: 0.0,
        take_profit: 0.0,
        profit,
        magic,
        comment: comment.to_string(),
    }
}

#[test]
fn submit_plan_places_every_rung() {
    let cfg = RuntimeConfig::default();
    let mut gw = OrderGateway::new(Box::new(gold_broker()));

    let report = gw.submit_plan(&buy_plan(5), &cfg);
    assert_eq!(report.requested, 5);
    assert_eq!(report.placed, 5);

    let placed = gw.pending_orders(None);
    assert_eq!(placed.len(), 5);
    assert!(placed.iter().all(|o| o.magic == cfg.magic()));
    assert!(placed.iter().all(|o| o.comment == "ForeAi-BUY"));
}

#[test]
fn one_rejected_rung_does_not_abort_the_rest() {
    let cfg = RuntimeConfig::default();
    let mut broker = gold_broker();
    broker.accept_only(3);
    let mut gw = OrderGateway::new(Box::new(broker));

    let report = gw.submit_plan(&buy_plan(5), &cfg);
    assert_eq!(report.requested, 5);
    assert_eq!(report.placed, 3);
    assert!(report.any_placed());
    assert_eq!(gw.pending_orders(None).len(), 3);
}

#[test]
fn cancel_pending_keeps_foreign_orders() {
    let cfg = RuntimeConfig::default();
    let mut broker = gold_broker();
    broker.add_pending(pending(1, "XAUUSD", cfg.magic(), ""));
    broker.add_pending(pending(2, "XAUUSD", 0, "SomeOtherBot-BUY"));
    let mut gw = OrderGateway::new(Box::new(broker));

    let n = gw.cancel_pending(Some("XAUUSD"), false, &cfg);
    assert_eq!(n, 1);
    let left = gw.pending_orders(None);
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].ticket, 2);
}

#[test]
fn cancel_pending_matches_comment_prefix_without_tag() {
    let cfg = RuntimeConfig::default();
    let mut broker = gold_broker();
    // no magic match, current brand prefix
    broker.add_pending(pending(1, "XAUUSD", 0, "ForeAi-BUY"));
    // no magic match, legacy brand prefix
    broker.add_pending(pending(2, "XAUUSD", 0, "MazharBot-SELL"));
    let mut gw = OrderGateway::new(Box::new(broker));

    let n = gw.cancel_pending(Some("XAUUSD"), false, &cfg);
    assert_eq!(n, 2);
    assert!(gw.pending_orders(None).is_empty());
}

#[test]
fn cancel_pending_include_foreign_cancels_everything() {
    let cfg = RuntimeConfig::default();
    let mut broker = gold_broker();
    broker.add_pending(pending(1, "XAUUSD", 0, "SomeOtherBot-BUY"));
    broker.add_pending(pending(2, "XAUUSD", 0, ""));
    let mut gw = OrderGateway::new(Box::new(broker));

    let n = gw.cancel_pending(Some("XAUUSD"), true, &cfg);
    assert_eq!(n, 2);
}

#[test]
fn cancel_pending_falls_back_to_wildcard_listing() {
    let cfg = RuntimeConfig::default();
    let mut broker = gold_broker();
    // nothing under the requested symbol, one owned order elsewhere
    broker.add_pending(pending(1, "EURUSD", cfg.magic(), ""));
    let mut gw = OrderGateway::new(Box::new(broker));

    let n = gw.cancel_pending(Some("XAUUSD"), false, &cfg);
    assert_eq!(n, 1);
}

#[test]
fn close_positions_applies_profit_filter() {
    let cfg = RuntimeConfig::default();
    let mut broker = gold_broker();
    broker.add_position(open_position(1, cfg.magic(), "", 12.0));
    broker.add_position(open_position(2, cfg.magic(), "", -8.0));
    broker.add_position(open_position(3, cfg.magic(), "", 0.0));
    let mut gw = OrderGateway::new(Box::new(broker));

    // profitable only
    let n = gw.close_positions(None, false, Some(true), &cfg);
    assert_eq!(n, 1);
    assert!(gw.positions(None).iter().all(|p| p.ticket != 1));

    // losing only
    let n = gw.close_positions(None, false, Some(false), &cfg);
    assert_eq!(n, 1);

    // zero-profit position survives both filters
    let left = gw.positions(None);
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].ticket, 3);
}

#[test]
fn close_positions_respects_ownership() {
    let cfg = RuntimeConfig::default();
    let mut broker = gold_broker();
    broker.add_position(open_position(1, 0, "ForeAi-BUY", 5.0));
    broker.add_position(open_position(2, 0, "SomeOtherBot-BUY", 5.0));
    let mut gw = OrderGateway::new(Box::new(broker));

    let n = gw.close_positions(None, false, None, &cfg);
    assert_eq!(n, 1);
    assert_eq!(gw.positions(None)[0].ticket, 2);
}

#[test]
fn close_positions_skips_symbols_without_quotes() {
    let cfg = RuntimeConfig::default();
    let mut broker = MockBroker::new().with_instrument(gold_info());
    // no quote seeded
    broker.add_position(open_position(1, cfg.magic(), "", 5.0));
    let mut gw = OrderGateway::new(Box::new(broker));

    let n = gw.close_positions(None, false, None, &cfg);
    assert_eq!(n, 0);
    assert_eq!(gw.positions(None).len(), 1);
}
