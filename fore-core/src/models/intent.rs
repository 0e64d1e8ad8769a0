use super::order::Side;
use serde::{Deserialize, Serialize};

/// A take-profit slot in a signal: a concrete level, or explicitly left open
/// ("no fixed target, trail only").
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TakeProfit {
    Level(f64),
    Open,
}

impl TakeProfit {
    pub fn level(&self) -> Option<f64> {
        match self {
            TakeProfit::Level(v) => Some(*v),
            TakeProfit::Open => None,
        }
    }
}

/// Canonical zone signal: entries laddered across [zone_low, zone_high].
/// This is the only intent variant that feeds the trailing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneIntent {
    symbol: String,
    side: Side,
    /// 0.0 when the message did not specify a lot size.
    lot_size: f64,
    zone_low: f64,
    zone_high: f64,
    stop_loss: f64,
    take_profits: Vec<TakeProfit>,
    original_text: String,
}

impl ZoneIntent {
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        lot_size: f64,
        zone_low: f64,
        zone_high: f64,
        stop_loss: f64,
        take_profits: Vec<TakeProfit>,
        original_text: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            lot_size,
            zone_low,
            zone_high,
            stop_loss,
            take_profits,
            original_text: original_text.into(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn lot_size(&self) -> f64 {
        self.lot_size
    }

    pub fn zone_low(&self) -> f64 {
        self.zone_low
    }

    pub fn zone_high(&self) -> f64 {
        self.zone_high
    }

    pub fn zone_mid(&self) -> f64 {
        (self.zone_low + self.zone_high) / 2.0
    }

    pub fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    pub fn take_profits(&self) -> &[TakeProfit] {
        &self.take_profits
    }

    pub fn original_text(&self) -> &str {
        &self.original_text
    }
}

/// Degenerate signal: the same entry price submitted `count` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatIntent {
    pub side: Side,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: Option<f64>,
    pub count: u32,
    pub lot_size: f64,
}

/// Explicit (entry, take-profit) pairs under one buy/sell limit header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairsIntent {
    pub side: Side,
    pub lot_size: f64,
    pub stop_loss: f64,
    pub entries: Vec<(f64, Option<f64>)>,
}

/// Any recognized inbound trade instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Signal {
    Zone(ZoneIntent),
    Repeat(RepeatIntent),
    Pairs(PairsIntent),
}
