//! Venue-facing adapter: rung-by-rung plan submission and the bulk
//! cancel/close maintenance operations.

use crate::broker::{Broker, CloseOrderSpec, OpenPosition, Quote};
use crate::models::{InstrumentInfo, LimitOrderRequest, OrderPlan, RuntimeConfig, Side};
use log::{error, info, warn};

/// Outcome of submitting one plan. Partial success is the normal case, not an
/// exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementReport {
    pub requested: usize,
    pub placed: usize,
}

impl PlacementReport {
    pub fn none() -> Self {
        Self {
            requested: 0,
            placed: 0,
        }
    }

    pub fn any_placed(&self) -> bool {
        self.placed > 0
    }
}

pub struct OrderGateway {
    broker: Box<dyn Broker>,
}

impl OrderGateway {
    pub fn new(broker: Box<dyn Broker>) -> Self {
        Self { broker }
    }

    pub fn is_connected(&self) -> bool {
        self.broker.is_connected()
    }

    pub fn instrument(&self, symbol: &str) -> Option<InstrumentInfo> {
        self.broker.resolve_instrument(symbol)
    }

    pub fn quote(&self, symbol: &str) -> Option<Quote> {
        self.broker.current_quote(symbol)
    }

    pub fn positions(&self, symbol: Option<&str>) -> Vec<OpenPosition> {
        self.broker.list_open_positions(symbol)
    }

    pub fn pending_orders(&self, symbol: Option<&str>) -> Vec<crate::broker::PendingOrder> {
        self.broker.list_pending_orders(symbol)
    }

    pub fn modify_stop_loss(&mut self, position: u64, new_stop: f64) -> crate::error::BrokerResult<()> {
        self.broker.modify_stop_loss(position, new_stop)
    }

    /// Submit every rung independently; a venue rejection on one rung never
    /// aborts the rest of the plan.
    pub fn submit_plan(&mut self, plan: &OrderPlan, cfg: &RuntimeConfig) -> PlacementReport {
        let mut placed = 0;
        for rung in plan.rungs() {
            let req = LimitOrderRequest {
                symbol: plan.symbol().to_string(),
                side: plan.side(),
                entry: rung.price(),
                stop_loss: plan.stop_loss(),
                take_profit: rung.take_profit(),
                lot: rung.lot(),
                slippage: cfg.slippage(),
                magic: cfg.magic(),
                comment: cfg.comment_for(plan.side()),
            };
            match self.broker.submit_pending_limit(&req) {
                Ok(_) => {
                    info!(
                        "pending {} placed {} @ {} TP {} SL {} lot {}",
                        plan.side(),
                        plan.symbol(),
                        rung.price(),
                        rung.take_profit()
                            .map(|v| v.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        plan.stop_loss(),
                        rung.lot()
                    );
                    placed += 1;
                }
                Err(e) => {
                    error!(
                        "failed pending {} {} @ {} lot {}: {}",
                        plan.side(),
                        plan.symbol(),
                        rung.price(),
                        rung.lot(),
                        e
                    );
                }
            }
        }
        info!(
            "plan {}: placed {}/{}",
            plan.id(),
            placed,
            plan.rungs().len()
        );
        PlacementReport {
            requested: plan.rungs().len(),
            placed,
        }
    }

    /// Cancel pending orders, ours only unless `include_foreign`. Returns the
    /// number of confirmed cancellations.
    pub fn cancel_pending(
        &mut self,
        symbol: Option<&str>,
        include_foreign: bool,
        cfg: &RuntimeConfig,
    ) -> usize {
        let mut orders = self.broker.list_pending_orders(symbol);
        if orders.is_empty() {
            // some venues only enumerate through an explicit wildcard listing
            orders = self.broker.list_pending_orders(None);
        }
        info!("found {} pending order(s) total", orders.len());

        let targets: Vec<u64> = orders
            .iter()
            .filter(|o| include_foreign || cfg.owns(o.magic, &o.comment))
            .map(|o| o.ticket)
            .collect();
        if targets.is_empty() {
            info!("no pending orders to cancel");
            return 0;
        }

        let mut ok = 0;
        for ticket in &targets {
            match self.broker.cancel_order(*ticket) {
                Ok(()) => ok += 1,
                Err(e) => error!("failed to remove pending {}: {}", ticket, e),
            }
        }
        info!("cancelled {}/{} pending order(s)", ok, targets.len());
        ok
    }

    /// Close open positions matching the ownership and profit filters by
    /// submitting an opposite-direction market deal at the current bid/ask.
    /// `profit_filter`: Some(true) = profitable only, Some(false) = losing
    /// only, None = no filter. Returns the confirmed-close count.
    pub fn close_positions(
        &mut self,
        symbol: Option<&str>,
        include_foreign: bool,
        profit_filter: Option<bool>,
        cfg: &RuntimeConfig,
    ) -> usize {
        let targets: Vec<OpenPosition> = self
            .broker
            .list_open_positions(symbol)
            .into_iter()
            .filter(|p| include_foreign || cfg.owns(p.magic, &p.comment))
            .filter(|p| match profit_filter {
                Some(true) => p.profit > 0.0,
                Some(false) => p.profit < 0.0,
                None => true,
            })
            .collect();
        if targets.is_empty() {
            info!("no open positions match the close filters");
            return 0;
        }

        warn!("closing {} position(s)...", targets.len());
        let mut ok = 0;
        for p in &targets {
            let Some(quote) = self.broker.current_quote(&p.symbol) else {
                warn!("no quote for {}, skipping position {}", p.symbol, p.ticket);
                continue;
            };
            let price = match p.side {
                Side::Buy => quote.bid,
                Side::Sell => quote.ask,
            };
            let spec = CloseOrderSpec {
                symbol: p.symbol.clone(),
                side: p.side.opposite(),
                lot: p.lot,
                price,
                slippage: cfg.slippage(),
                magic: cfg.magic(),
                comment: format!("{}-Close", crate::models::BRAND_PREFIX),
            };
            match self.broker.close_position(p.ticket, &spec) {
                Ok(()) => ok += 1,
                Err(e) => error!("failed to close position {}: {}", p.ticket, e),
            }
        }
        info!("closed {}/{} position(s)", ok, targets.len());
        ok
    }
}

#[cfg(test)]
mod tests;
