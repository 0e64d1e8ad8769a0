use super::*;
use crate::models::{Side, Signal, TakeProfit};

const ZONE_TEXT: &str = "XAUUSD LOOKING BUY THIS ZONE\n3463/3459\nSL 3455\nTP1 3465\nTP2 3470";

#[test]
fn zone_format_parses_canonical_message() {
    let intent = parse_zone(ZONE_TEXT).expect("should parse");
    assert_eq!(intent.symbol(), "XAUUSD");
    assert_eq!(intent.side(), Side::Buy);
    assert_eq!(intent.zone_low(), 3459.0);
    assert_eq!(intent.zone_high(), 3463.0);
    assert_eq!(intent.stop_loss(), 3455.0);
    assert_eq!(
        intent.take_profits(),
        &[TakeProfit::Level(3465.0), TakeProfit::Level(3470.0)]
    );
    assert_eq!(intent.lot_size(), 0.0);
}

#[test]
fn zone_format_normalizes_zone_order() {
    let text = "EURUSD LOOKING SELL THIS ZONE\n1.0850/1.0870\nSL: 1.0900\nTP1: 1.0800";
    let intent = parse_zone(text).expect("should parse");
    assert_eq!(intent.side(), Side::Sell);
    assert_eq!(intent.zone_low(), 1.0850);
    assert_eq!(intent.zone_high(), 1.0870);
}

#[test]
fn zone_format_sorts_tps_by_explicit_index() {
    let text = "XAUUSD LOOKING BUY THIS ZONE\n3463/3459\nSL 3455\nTP3 3480\nTP1 3465\nTP2 open";
    let intent = parse_zone(text).expect("should parse");
    assert_eq!(
        intent.take_profits(),
        &[
            TakeProfit::Level(3465.0),
            TakeProfit::Open,
            TakeProfit::Level(3480.0)
        ]
    );
}

#[test]
fn zone_format_accepts_lot_size_and_separators() {
    let text = "xauusd looking buy this zone\nlot size - 0.35\n3463/3459\nSL- 3455\nTP1- 3465";
    let intent = parse_zone(text).expect("should parse");
    assert_eq!(intent.symbol(), "XAUUSD");
    assert_eq!(intent.lot_size(), 0.35);
    assert_eq!(intent.stop_loss(), 3455.0);
}

#[test]
fn zone_format_requires_all_parts() {
    // no SL
    assert!(parse_zone("XAUUSD LOOKING BUY THIS ZONE\n3463/3459\nTP1 3465").is_none());
    // no TP lines
    assert!(parse_zone("XAUUSD LOOKING BUY THIS ZONE\n3463/3459\nSL 3455").is_none());
    // no zone pair
    assert!(parse_zone("XAUUSD LOOKING BUY THIS ZONE\nSL 3455\nTP1 3465").is_none());
}

#[test]
fn repeat_format_parses() {
    let text = "Lot size=0.10\nLots=10\nBuy limit= 3410\nTP 3420\nSL 3400";
    let intent = parse_repeat(text).expect("should parse");
    assert_eq!(intent.side, Side::Buy);
    assert_eq!(intent.count, 10);
    assert_eq!(intent.lot_size, 0.10);
    assert_eq!(intent.entry, 3410.0);
    assert_eq!(intent.take_profit, Some(3420.0));
    assert_eq!(intent.stop_loss, 3400.0);
}

#[test]
fn repeat_format_accepts_open_tp() {
    let text = "Lot size: 0.10\nLots: 5\nSell limit: 3410\nTP open\nSL 3450";
    let intent = parse_repeat(text).expect("should parse");
    assert_eq!(intent.side, Side::Sell);
    assert_eq!(intent.take_profit, None);
}

#[test]
fn repeat_format_tp_is_optional() {
    let text = "Lot size=0.10\nLots=3\nBuy limit=3410\nSL 3400";
    let intent = parse_repeat(text).expect("should parse");
    assert_eq!(intent.take_profit, None);
}

#[test]
fn pairs_format_parses() {
    let text = "Lot size=0.20\nBuy limit\n3410 ->Tp 3412\n3408 ->Tp 3414\n3406 -> open\nSL 3350";
    let intent = parse_pairs_list(text).expect("should parse");
    assert_eq!(intent.side, Side::Buy);
    assert_eq!(intent.lot_size, 0.20);
    assert_eq!(intent.stop_loss, 3350.0);
    assert_eq!(
        intent.entries,
        vec![
            (3410.0, Some(3412.0)),
            (3408.0, Some(3414.0)),
            (3406.0, None)
        ]
    );
}

#[test]
fn pairs_format_requires_at_least_one_pair() {
    let text = "Lot size=0.20\nBuy limit\nSL 3350";
    assert!(parse_pairs_list(text).is_none());
}

#[test]
fn grammar_priority_is_fixed() {
    // carries both a Lots= count and pair arrows: the repeat grammar wins
    let both = "Lot size=0.10\nLots=2\nBuy limit=3410\nSL 3400";
    assert!(matches!(parse_signal(both), Some(Signal::Repeat(_))));

    let pairs = "Lot size=0.20\nBuy limit\n3410 ->Tp 3412\nSL 3350";
    assert!(matches!(parse_signal(pairs), Some(Signal::Pairs(_))));

    assert!(matches!(parse_signal(ZONE_TEXT), Some(Signal::Zone(_))));
}

#[test]
fn unrecognized_text_is_rejected_silently() {
    assert!(parse_signal("").is_none());
    assert!(parse_signal("   \n  ").is_none());
    assert!(parse_signal("good morning traders, gold looking bullish today").is_none());
    assert!(parse_signal("SL 3400").is_none());
}
