//! Stop-loss ratchet driven by the recorded take-profit ladders.
//!
//! Each pass re-derives the target stop for every owned open position from
//! the current quote and the stored ladder, so passes are idempotent and a
//! failed modify simply retries on the next pass. The stop only ever tightens
//! in the position's favor.

mod daemon;

pub use daemon::TrailingDaemon;

use crate::broker::OpenPosition;
use crate::gateway::OrderGateway;
use crate::ladder::TpLadderStore;
use crate::models::{RuntimeConfig, Side};
use log::{info, warn};

/// Comparison slack when deciding whether a stop actually moves.
const STOP_EPSILON: f64 = 1e-7;

/// Stops are kept at least this many instrument points away from the
/// reference price, or the venue rejects the modify outright.
const MIN_DISTANCE_POINTS: f64 = 2.0;

/// The stop a position should carry given its sorted ladder and reference
/// price: one level reached moves the stop to break-even, each further level
/// moves it to the previous ladder value. `None` = leave unchanged.
pub fn target_stop(position: &OpenPosition, ladder: &[f64], reference: f64) -> Option<f64> {
    let achieved = match position.side {
        Side::Buy => ladder.iter().filter(|l| reference >= **l).count(),
        Side::Sell => ladder.iter().filter(|l| reference <= **l).count(),
    };
    match achieved {
        0 => None,
        1 => Some(position.entry_price),
        n => Some(ladder[n - 2]),
    }
}

/// One full trailing pass over our open positions.
pub fn run_tick(gateway: &mut OrderGateway, ladders: &TpLadderStore, cfg: &RuntimeConfig) {
    let positions: Vec<OpenPosition> = gateway
        .positions(None)
        .into_iter()
        .filter(|p| cfg.owns(p.magic, &p.comment))
        .collect();

    for p in positions {
        let Some(quote) = gateway.quote(&p.symbol) else {
            continue;
        };
        let reference = match p.side {
            Side::Buy => quote.bid,
            Side::Sell => quote.ask,
        };
        let Some(ladder) = ladders.get(&p.symbol, p.side) else {
            continue;
        };
        let Some(raw_target) = target_stop(&p, ladder, reference) else {
            continue;
        };

        let info = gateway.instrument(&p.symbol);
        let point = info.as_ref().map(|i| i.point()).unwrap_or(0.01);
        let round = |v: f64| match &info {
            Some(i) => i.round_price(v),
            None => (v * 100.0).round() / 100.0,
        };

        let mut target = round(raw_target);

        // ratchet guard: the stop may only tighten
        match p.side {
            Side::Buy => {
                if target <= p.stop_loss + STOP_EPSILON {
                    continue;
                }
                if target > reference - MIN_DISTANCE_POINTS * point {
                    target = round(reference - MIN_DISTANCE_POINTS * point);
                    if target <= p.stop_loss + STOP_EPSILON {
                        continue;
                    }
                }
            }
            Side::Sell => {
                if p.stop_loss > 0.0 && target >= p.stop_loss - STOP_EPSILON {
                    continue;
                }
                if target < reference + MIN_DISTANCE_POINTS * point {
                    target = round(reference + MIN_DISTANCE_POINTS * point);
                    if p.stop_loss > 0.0 && target >= p.stop_loss - STOP_EPSILON {
                        continue;
                    }
                }
            }
        }

        match gateway.modify_stop_loss(p.ticket, target) {
            Ok(()) => info!("trailing: updated SL pos {} -> {}", p.ticket, target),
            Err(e) => warn!(
                "trailing: failed SL modify pos {} -> {}: {}",
                p.ticket, target, e
            ),
        }
    }
}
