use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }

    /// Case-insensitive parse of "buy"/"sell".
    pub fn parse(s: &str) -> Option<Side> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Some(Side::Buy),
            "SELL" => Some(Side::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One planned order within a ladder: entry price, lot, take-profit or open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rung {
    price: f64,
    lot: f64,
    take_profit: Option<f64>,
}

impl Rung {
    pub fn new(price: f64, lot: f64, take_profit: Option<f64>) -> Self {
        Self {
            price,
            lot,
            take_profit,
        }
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn lot(&self) -> f64 {
        self.lot
    }

    pub fn take_profit(&self) -> Option<f64> {
        self.take_profit
    }
}

/// An immutable batch of pending limit orders derived from a single signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlan {
    id: Uuid,
    symbol: String,
    side: Side,
    stop_loss: f64,
    rungs: Vec<Rung>,
    created_at: i64,
}

impl OrderPlan {
    pub fn new(symbol: impl Into<String>, side: Side, stop_loss: f64, rungs: Vec<Rung>) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            stop_loss,
            rungs,
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    pub fn rungs(&self) -> &[Rung] {
        &self.rungs
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}

/// Request for a single pending limit order at the venue boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitOrderRequest {
    pub symbol: String,
    pub side: Side,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: Option<f64>,
    pub lot: f64,
    pub slippage: u32,
    pub magic: i64,
    pub comment: String,
}
