//! Expansion of parsed intents into concrete order plans.
//!
//! Two distinct generation strategies share the `OrderPlan` output: zone
//! intents are laddered across the price range at a fixed step, while the
//! repeat and pair-list intents emit exactly the prices they carry. They are
//! deliberately kept as separate constructors.

use crate::models::{
    InstrumentInfo, OrderPlan, PairsIntent, RepeatIntent, Rung, RuntimeConfig, Side, TakeProfit,
    ZoneIntent,
};

/// Price distance between adjacent zone rungs, in quote units.
pub const ZONE_STEP: f64 = 1.0;

/// Tolerance for the inclusive far edge of the zone walk.
const EDGE_EPSILON: f64 = 1e-9;

/// Per-rung lot selection. Every rung receives the same full lot (no
/// splitting): the signal's own lot wins, else the operator fixed lot, else
/// the configured fallback. The chosen raw value is snapped onto the venue
/// volume grid; if snapping collapses it to zero the raw value is kept.
pub fn rung_lot(signal_lot: f64, cfg: &RuntimeConfig, info: &InstrumentInfo) -> f64 {
    let raw = if signal_lot > 0.0 {
        signal_lot
    } else if let Some(fixed) = cfg.fixed_lot() {
        fixed
    } else {
        cfg.fallback_lot()
    };
    let snapped = info.snap_lot(raw);
    if snapped > 0.0 {
        snapped
    } else {
        raw
    }
}

/// Ladder the zone: BUY walks down from the high edge, SELL walks up from the
/// low edge, inclusive of the far edge. Rung `i` receives the `i`-th numeric
/// take-profit when one exists; later rungs stay open.
pub fn plan_zone(intent: &ZoneIntent, info: &InstrumentInfo, cfg: &RuntimeConfig) -> OrderPlan {
    let lot = rung_lot(intent.lot_size(), cfg, info);
    let numeric: Vec<f64> = intent
        .take_profits()
        .iter()
        .filter_map(TakeProfit::level)
        .collect();

    let mut prices = Vec::new();
    match intent.side() {
        Side::Buy => {
            let mut p = intent.zone_high();
            while p >= intent.zone_low() - EDGE_EPSILON {
                prices.push(info.round_price(p));
                p -= ZONE_STEP;
            }
        }
        Side::Sell => {
            let mut p = intent.zone_low();
            while p <= intent.zone_high() + EDGE_EPSILON {
                prices.push(info.round_price(p));
                p += ZONE_STEP;
            }
        }
    }

    let rungs = prices
        .into_iter()
        .enumerate()
        .map(|(i, price)| Rung::new(price, lot, numeric.get(i).copied()))
        .collect();
    OrderPlan::new(info.symbol(), intent.side(), intent.stop_loss(), rungs)
}

/// The same (entry, tp) tuple repeated `count` times.
pub fn plan_repeat(intent: &RepeatIntent, info: &InstrumentInfo, cfg: &RuntimeConfig) -> OrderPlan {
    let lot = rung_lot(intent.lot_size, cfg, info);
    let price = info.round_price(intent.entry);
    let tp = intent.take_profit.map(|v| info.round_price(v));
    let rungs = (0..intent.count)
        .map(|_| Rung::new(price, lot, tp))
        .collect();
    OrderPlan::new(info.symbol(), intent.side, intent.stop_loss, rungs)
}

/// One rung per parsed (entry, tp) pair, same lot for all.
pub fn plan_pairs(intent: &PairsIntent, info: &InstrumentInfo, cfg: &RuntimeConfig) -> OrderPlan {
    let lot = rung_lot(intent.lot_size, cfg, info);
    let rungs = intent
        .entries
        .iter()
        .map(|(entry, tp)| {
            Rung::new(
                info.round_price(*entry),
                lot,
                tp.map(|v| info.round_price(v)),
            )
        })
        .collect();
    OrderPlan::new(info.symbol(), intent.side, intent.stop_loss, rungs)
}

#[cfg(test)]
mod tests;
