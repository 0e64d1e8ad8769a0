use super::{Broker, CloseOrderSpec, OpenPosition, PendingOrder, Quote};
use crate::error::{BrokerError, BrokerResult};
use crate::models::{InstrumentInfo, LimitOrderRequest};
use std::collections::HashMap;

/// In-memory venue used by the test suite and by paper runs. Accepts every
/// request unless a rejection code is armed.
pub struct MockBroker {
    instruments: HashMap<String, InstrumentInfo>,
    quotes: HashMap<String, Quote>,
    pending: Vec<PendingOrder>,
    positions: Vec<OpenPosition>,
    next_ticket: u64,
    reject_code: Option<i32>,
    accept_budget: Option<usize>,
}

impl Default for MockBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBroker {
    pub fn new() -> Self {
        Self {
            instruments: HashMap::new(),
            quotes: HashMap::new(),
            pending: Vec::new(),
            positions: Vec::new(),
            next_ticket: 1000,
            reject_code: None,
            accept_budget: None,
        }
    }

    pub fn with_instrument(mut self, info: InstrumentInfo) -> Self {
        self.instruments.insert(info.symbol().to_string(), info);
        self
    }

    pub fn set_quote(&mut self, symbol: &str, bid: f64, ask: f64) {
        self.quotes.insert(symbol.to_string(), Quote { bid, ask });
    }

    /// Arm a venue-side rejection for every subsequent mutating call.
    pub fn reject_with(&mut self, code: Option<i32>) {
        self.reject_code = code;
    }

    /// Accept only the next `n` submissions, then reject the rest.
    pub fn accept_only(&mut self, n: usize) {
        self.accept_budget = Some(n);
    }

    /// Seed an open position directly, as if filled earlier.
    pub fn add_position(&mut self, position: OpenPosition) -> u64 {
        let ticket = position.ticket;
        self.positions.push(position);
        ticket
    }

    /// Seed a pending order directly, as if placed earlier.
    pub fn add_pending(&mut self, order: PendingOrder) -> u64 {
        let ticket = order.ticket;
        self.pending.push(order);
        ticket
    }

    pub fn pending(&self) -> &[PendingOrder] {
        &self.pending
    }

    pub fn positions(&self) -> &[OpenPosition] {
        &self.positions
    }

    pub fn position(&self, ticket: u64) -> Option<&OpenPosition> {
        self.positions.iter().find(|p| p.ticket == ticket)
    }

    fn next_ticket(&mut self) -> u64 {
        self.next_ticket += 1;
        self.next_ticket
    }

    fn check_rejection(&self) -> BrokerResult<()> {
        match self.reject_code {
            Some(code) => Err(BrokerError::Rejected(code)),
            None => Ok(()),
        }
    }
}

impl Broker for MockBroker {
    fn is_connected(&self) -> bool {
        true
    }

    fn resolve_instrument(&self, symbol: &str) -> Option<InstrumentInfo> {
        self.instruments.get(symbol).cloned()
    }

    fn current_quote(&self, symbol: &str) -> Option<Quote> {
        self.quotes.get(symbol).copied()
    }

    fn submit_pending_limit(&mut self, req: &LimitOrderRequest) -> BrokerResult<u64> {
        self.check_rejection()?;
        if let Some(budget) = self.accept_budget.as_mut() {
            if *budget == 0 {
                return Err(BrokerError::Rejected(10013));
            }
            *budget -= 1;
        }
        if !self.instruments.contains_key(&req.symbol) {
            return Err(BrokerError::UnknownSymbol(req.symbol.clone()));
        }
        let ticket = self.next_ticket();
        self.pending.push(PendingOrder {
            ticket,
            symbol: req.symbol.clone(),
            side: req.side,
            price: req.entry,
            lot: req.lot,
            magic: req.magic,
            comment: req.comment.clone(),
        });
        Ok(ticket)
    }

    fn cancel_order(&mut self, ticket: u64) -> BrokerResult<()> {
        self.check_rejection()?;
        let before = self.pending.len();
        self.pending.retain(|o| o.ticket != ticket);
        if self.pending.len() == before {
            return Err(BrokerError::UnknownTicket(ticket));
        }
        Ok(())
    }

    fn modify_stop_loss(&mut self, position: u64, new_stop: f64) -> BrokerResult<()> {
        self.check_rejection()?;
        match self.positions.iter_mut().find(|p| p.ticket == position) {
            Some(p) => {
                p.stop_loss = new_stop;
                Ok(())
            }
            None => Err(BrokerError::UnknownTicket(position)),
        }
    }

    fn close_position(&mut self, position: u64, _spec: &CloseOrderSpec) -> BrokerResult<()> {
        self.check_rejection()?;
        let before = self.positions.len();
        self.positions.retain(|p| p.ticket != position);
        if self.positions.len() == before {
            return Err(BrokerError::UnknownTicket(position));
        }
        Ok(())
    }

    fn list_pending_orders(&self, symbol: Option<&str>) -> Vec<PendingOrder> {
        self.pending
            .iter()
            .filter(|o| symbol.map(|s| o.symbol == s).unwrap_or(true))
            .cloned()
            .collect()
    }

    fn list_open_positions(&self, symbol: Option<&str>) -> Vec<OpenPosition> {
        self.positions
            .iter()
            .filter(|p| symbol.map(|s| p.symbol == s).unwrap_or(true))
            .cloned()
            .collect()
    }
}
