use crate::error::BrokerResult;
use crate::models::{InstrumentInfo, LimitOrderRequest, Side};
use serde::{Deserialize, Serialize};

pub mod mock;

/// Top-of-book quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub bid: f64,
    pub ask: f64,
}

/// A pending order as reported by the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOrder {
    pub ticket: u64,
    pub symbol: String,
    pub side: Side,
    pub price: f64,
    pub lot: f64,
    pub magic: i64,
    pub comment: String,
}

/// An open position as reported by the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPosition {
    pub ticket: u64,
    pub symbol: String,
    pub side: Side,
    pub lot: f64,
    pub entry_price: f64,
    /// 0.0 when no stop is set.
    pub stop_loss: f64,
    /// 0.0 when no take-profit is set.
    pub take_profit: f64,
    pub profit: f64,
    pub magic: i64,
    pub comment: String,
}

/// The opposite-direction market deal used to flatten a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloseOrderSpec {
    pub symbol: String,
    pub side: Side,
    pub lot: f64,
    pub price: f64,
    pub slippage: u32,
    pub magic: i64,
    pub comment: String,
}

/// Interface to the trade venue (live session or in-memory mock).
/// Calls are synchronous and blocking; callers provide their own execution
/// context so a slow call in one activity does not starve the others.
pub trait Broker: Send {
    fn is_connected(&self) -> bool;

    /// Look up venue metadata for a literal symbol name. Never invents a
    /// symbol the venue does not recognize.
    fn resolve_instrument(&self, symbol: &str) -> Option<InstrumentInfo>;

    fn current_quote(&self, symbol: &str) -> Option<Quote>;

    /// Submit a pending limit order; returns the venue ticket.
    fn submit_pending_limit(&mut self, req: &LimitOrderRequest) -> BrokerResult<u64>;

    fn cancel_order(&mut self, ticket: u64) -> BrokerResult<()>;

    fn modify_stop_loss(&mut self, position: u64, new_stop: f64) -> BrokerResult<()>;

    fn close_position(&mut self, position: u64, spec: &CloseOrderSpec) -> BrokerResult<()>;

    /// Pending orders, optionally restricted to one symbol.
    fn list_pending_orders(&self, symbol: Option<&str>) -> Vec<PendingOrder>;

    /// Open positions, optionally restricted to one symbol.
    fn list_open_positions(&self, symbol: Option<&str>) -> Vec<OpenPosition>;
}
