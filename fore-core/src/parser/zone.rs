use crate::models::{Side, TakeProfit, ZoneIntent};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE_LOT: Regex =
        Regex::new(r"(?i)lot\s*size\s*[:\-]?\s*([0-9]*\.?[0-9]+)").unwrap();
    static ref RE_PAIR_DIR: Regex =
        Regex::new(r"(?i)([A-Z0-9]+)\s+LOOKING\s+(BUY|SELL)\s+THIS\s+ZONE").unwrap();
    static ref RE_ZONE: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*/\s*(\d+(?:\.\d+)?)").unwrap();
    static ref RE_SL: Regex = Regex::new(r"(?i)SL\s*[:\-]?\s*(\d+(?:\.\d+)?)").unwrap();
    static ref RE_TP: Regex =
        Regex::new(r"(?i)TP\s*([1-9][0-9]*)\s*[:\-]?\s*([0-9]+(?:\.[0-9]+)?|open)").unwrap();
}

/// Zone grammar:
///
/// ```text
/// XAUUSD LOOKING BUY THIS ZONE
/// 3463/3459
/// lot size: 0.10
/// SL 3455
/// TP1 3465
/// TP2 open
/// ```
///
/// Lot size is optional (0.0 = unspecified); the symbol header, the zone
/// pair, the stop and at least one indexed TP are required. TP indices order
/// the list; the indices themselves need not be contiguous or in order.
pub fn parse_zone(text: &str) -> Option<ZoneIntent> {
    let header = RE_PAIR_DIR.captures(text)?;
    let zone = RE_ZONE.captures(text)?;
    let sl = RE_SL.captures(text)?;

    let mut tps: Vec<(u32, TakeProfit)> = RE_TP
        .captures_iter(text)
        .filter_map(|c| {
            let idx: u32 = c.get(1)?.as_str().parse().ok()?;
            let raw = c.get(2)?.as_str();
            let value = if raw.eq_ignore_ascii_case("open") {
                TakeProfit::Open
            } else {
                TakeProfit::Level(raw.parse().ok()?)
            };
            Some((idx, value))
        })
        .collect();
    if tps.is_empty() {
        return None;
    }
    tps.sort_by_key(|(idx, _)| *idx);
    let take_profits: Vec<TakeProfit> = tps.into_iter().map(|(_, v)| v).collect();

    let symbol = header.get(1)?.as_str().to_uppercase();
    let side = Side::parse(header.get(2)?.as_str())?;
    let z1: f64 = zone.get(1)?.as_str().parse().ok()?;
    let z2: f64 = zone.get(2)?.as_str().parse().ok()?;
    let stop_loss: f64 = sl.get(1)?.as_str().parse().ok()?;
    let lot_size: f64 = RE_LOT
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0);

    Some(ZoneIntent::new(
        symbol,
        side,
        lot_size,
        z1.min(z2),
        z1.max(z2),
        stop_loss,
        take_profits,
        text,
    ))
}
