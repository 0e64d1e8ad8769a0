use super::*;
use crate::models::{PairsIntent, RepeatIntent, TakeProfit, ZoneIntent};

fn gold() -> InstrumentInfo {
    InstrumentInfo::new("XAUUSD", 2, 0.01, 0.01, 0.01, 100.0)
}

fn zone_intent(side: Side, lo: f64, hi: f64, tps: Vec<TakeProfit>) -> ZoneIntent {
    ZoneIntent::new("XAUUSD", side, 0.0, lo, hi, 3455.0, tps, "")
}

#[test]
fn buy_zone_ladders_down_from_high_edge() {
    let intent = zone_intent(
        Side::Buy,
        3459.0,
        3463.0,
        vec![TakeProfit::Level(3465.0), TakeProfit::Level(3470.0)],
    );
    let plan = plan_zone(&intent, &gold(), &RuntimeConfig::default());

    let prices: Vec<f64> = plan.rungs().iter().map(|r| r.price()).collect();
    assert_eq!(prices, vec![3463.0, 3462.0, 3461.0, 3460.0, 3459.0]);
    assert_eq!(plan.side(), Side::Buy);
    assert_eq!(plan.stop_loss(), 3455.0);

    // positional take-profit assignment, open beyond the list
    let tps: Vec<Option<f64>> = plan.rungs().iter().map(|r| r.take_profit()).collect();
    assert_eq!(tps, vec![Some(3465.0), Some(3470.0), None, None, None]);
}

#[test]
fn sell_zone_ladders_up_from_low_edge() {
    let intent = zone_intent(Side::Sell, 3459.0, 3463.0, vec![TakeProfit::Level(3450.0)]);
    let plan = plan_zone(&intent, &gold(), &RuntimeConfig::default());

    let prices: Vec<f64> = plan.rungs().iter().map(|r| r.price()).collect();
    assert_eq!(prices, vec![3459.0, 3460.0, 3461.0, 3462.0, 3463.0]);
    assert_eq!(plan.rungs()[0].take_profit(), Some(3450.0));
    assert_eq!(plan.rungs()[1].take_profit(), None);
}

#[test]
fn rung_count_spans_zone_inclusive() {
    for (lo, hi, expected) in [
        (3459.0, 3463.0, 5),
        (3460.0, 3460.0, 1),
        (1.0, 10.0, 10),
    ] {
        let intent = zone_intent(Side::Buy, lo, hi, vec![TakeProfit::Level(hi + 2.0)]);
        let plan = plan_zone(&intent, &gold(), &RuntimeConfig::default());
        assert_eq!(
            plan.rungs().len(),
            expected,
            "zone [{}, {}] should yield {} rungs",
            lo,
            hi,
            expected
        );
    }
}

#[test]
fn open_markers_do_not_consume_rung_slots() {
    // open markers are dropped before positional assignment: the numeric
    // list [3470] lands on rung 0
    let intent = zone_intent(
        Side::Buy,
        3461.0,
        3463.0,
        vec![TakeProfit::Open, TakeProfit::Level(3470.0)],
    );
    let plan = plan_zone(&intent, &gold(), &RuntimeConfig::default());
    assert_eq!(plan.rungs()[0].take_profit(), Some(3470.0));
    assert_eq!(plan.rungs()[1].take_profit(), None);
}

#[test]
fn lot_precedence_signal_over_fixed_over_fallback() {
    let info = gold();
    let cfg = RuntimeConfig::default();

    // signal lot wins
    assert_eq!(rung_lot(0.30, &cfg, &info), 0.30);

    // fixed lot when the signal has none
    let with_fixed = cfg.with_fixed_lot(Some(0.20));
    assert_eq!(rung_lot(0.0, &with_fixed, &info), 0.20);

    // fallback otherwise
    assert_eq!(rung_lot(0.0, &cfg, &info), cfg.fallback_lot());
}

#[test]
fn rung_lot_is_snapped_to_volume_step() {
    let info = gold();
    let cfg = RuntimeConfig::default();
    assert_eq!(rung_lot(0.157, &cfg, &info), 0.15);
}

#[test]
fn every_rung_gets_the_same_full_lot() {
    let intent = ZoneIntent::new(
        "XAUUSD",
        Side::Buy,
        0.30,
        3459.0,
        3463.0,
        3455.0,
        vec![TakeProfit::Level(3465.0)],
        "",
    );
    let plan = plan_zone(&intent, &gold(), &RuntimeConfig::default());
    assert!(plan.rungs().iter().all(|r| r.lot() == 0.30));
}

#[test]
fn repeat_plan_emits_identical_rungs() {
    let intent = RepeatIntent {
        side: Side::Buy,
        entry: 3410.0,
        stop_loss: 3400.0,
        take_profit: Some(3420.0),
        count: 10,
        lot_size: 0.10,
    };
    let plan = plan_repeat(&intent, &gold(), &RuntimeConfig::default());
    assert_eq!(plan.rungs().len(), 10);
    assert!(plan
        .rungs()
        .iter()
        .all(|r| r.price() == 3410.0 && r.lot() == 0.10 && r.take_profit() == Some(3420.0)));
}

#[test]
fn pairs_plan_emits_one_rung_per_pair() {
    let intent = PairsIntent {
        side: Side::Sell,
        lot_size: 0.20,
        stop_loss: 3450.0,
        entries: vec![(3410.0, Some(3405.0)), (3412.0, None)],
    };
    let plan = plan_pairs(&intent, &gold(), &RuntimeConfig::default());
    assert_eq!(plan.rungs().len(), 2);
    assert_eq!(plan.rungs()[0].price(), 3410.0);
    assert_eq!(plan.rungs()[0].take_profit(), Some(3405.0));
    assert_eq!(plan.rungs()[1].price(), 3412.0);
    assert_eq!(plan.rungs()[1].take_profit(), None);
    assert!(plan.rungs().iter().all(|r| r.lot() == 0.20));
}
