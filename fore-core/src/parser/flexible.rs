use crate::models::{PairsIntent, RepeatIntent, Side};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_LOTS: Regex = Regex::new(r"(?i)\blots?\s*[:=]\s*(\d+)").unwrap();
    static ref RE_LOT_SIZE: Regex =
        Regex::new(r"(?i)\blot\s*size\s*[:=]\s*([0-9]*\.?[0-9]+)").unwrap();
    static ref RE_DIR_ENTRY: Regex =
        Regex::new(r"(?i)\b(buy|sell)\s*limit\s*[:=]?\s*([0-9]+(?:\.[0-9]+)?)").unwrap();
    static ref RE_DIR_HEADER: Regex = Regex::new(r"(?i)\b(buy|sell)\s*limit\b").unwrap();
    static ref RE_SL: Regex = Regex::new(r"(?i)\bSL\s*[:=]?\s*([0-9]+(?:\.[0-9]+)?)").unwrap();
    static ref RE_TP_OPEN: Regex = Regex::new(r"(?i)\bTP\s*[:=]?\s*open\b").unwrap();
    static ref RE_TP: Regex = Regex::new(r"(?i)\bTP\s*[:=]?\s*([0-9]+(?:\.[0-9]+)?)").unwrap();
    static ref RE_PAIR: Regex = Regex::new(
        r"(?i)([0-9]+(?:\.[0-9]+)?)\s*[-=]*>\s*(?:tp\s*)?((?:open)|(?:[0-9]+(?:\.[0-9]+)?))"
    )
    .unwrap();
}

/// Repeat-count grammar:
///
/// ```text
/// Lot size=0.10
/// Lots=10
/// Buy limit= 3410
/// TP 3420
/// SL 3400
/// ```
///
/// The same entry price is submitted `lots` times. TP may be a price, the
/// literal `open`, or absent.
pub fn parse_repeat(text: &str) -> Option<RepeatIntent> {
    let count: u32 = RE_LOTS.captures(text)?.get(1)?.as_str().parse().ok()?;
    let lot_size: f64 = RE_LOT_SIZE.captures(text)?.get(1)?.as_str().parse().ok()?;
    let dir = RE_DIR_ENTRY.captures(text)?;
    let side = Side::parse(dir.get(1)?.as_str())?;
    let entry: f64 = dir.get(2)?.as_str().parse().ok()?;
    let stop_loss: f64 = RE_SL.captures(text)?.get(1)?.as_str().parse().ok()?;

    let take_profit = if RE_TP_OPEN.is_match(text) {
        None
    } else {
        RE_TP
            .captures(text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    };

    Some(RepeatIntent {
        side,
        entry,
        stop_loss,
        take_profit,
        count,
        lot_size,
    })
}

/// Pair-list grammar:
///
/// ```text
/// Lot size=0.20
/// Buy limit
/// 3410 ->Tp 3412
/// 3408 ->Tp open
/// SL 3350
/// ```
///
/// One order per `entry -> tp` line; `open` leaves the take-profit empty.
pub fn parse_pairs_list(text: &str) -> Option<PairsIntent> {
    let lot_size: f64 = RE_LOT_SIZE.captures(text)?.get(1)?.as_str().parse().ok()?;
    let side = Side::parse(RE_DIR_HEADER.captures(text)?.get(1)?.as_str())?;
    let stop_loss: f64 = RE_SL.captures(text)?.get(1)?.as_str().parse().ok()?;

    let entries: Vec<(f64, Option<f64>)> = RE_PAIR
        .captures_iter(text)
        .filter_map(|c| {
            let entry: f64 = c.get(1)?.as_str().parse().ok()?;
            let tp_str = c.get(2)?.as_str();
            let tp = if tp_str.eq_ignore_ascii_case("open") {
                None
            } else {
                Some(tp_str.parse().ok()?)
            };
            Some((entry, tp))
        })
        .collect();
    if entries.is_empty() {
        return None;
    }

    Some(PairsIntent {
        side,
        lot_size,
        stop_loss,
        entries,
    })
}
