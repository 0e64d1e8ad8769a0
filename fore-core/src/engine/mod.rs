//! Message-driven pipeline: parse -> plan -> submit, plus operator commands
//! and the runtime-configuration surface.

pub mod commands;

use crate::broker::Broker;
use crate::gateway::{OrderGateway, PlacementReport};
use crate::ladder::TpLadderStore;
use crate::models::{
    InstrumentInfo, PairsIntent, RepeatIntent, RuntimeConfig, Signal, TakeProfit, ZoneIntent,
};
use crate::parser;
use crate::planner;
use crate::trailing;
use commands::Command;
use log::{error, info, warn};
use serde::Serialize;

/// Lightweight status snapshot for an external display.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub broker_connected: bool,
    pub source_connected: bool,
    pub channel_name: Option<String>,
}

pub struct SignalEngine {
    gateway: OrderGateway,
    ladders: TpLadderStore,
    config: RuntimeConfig,
    last_signal: Option<ZoneIntent>,
    source_connected: bool,
    channel_name: Option<String>,
}

impl SignalEngine {
    pub fn new(broker: Box<dyn Broker>, ladders: TpLadderStore, config: RuntimeConfig) -> Self {
        Self {
            gateway: OrderGateway::new(broker),
            ladders,
            config,
            last_signal: None,
            source_connected: false,
            channel_name: None,
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The most recent zone signal, whether or not it was auto-placed.
    pub fn last_signal(&self) -> Option<&ZoneIntent> {
        self.last_signal.as_ref()
    }

    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            broker_connected: self.gateway.is_connected(),
            source_connected: self.source_connected,
            channel_name: self.channel_name.clone(),
        }
    }

    /// Entry point for every inbound chat message. The optional return value
    /// is the reply to send back on the same channel.
    pub fn handle_message(&mut self, text: &str, chat_id: &str) -> Option<String> {
        if !self.config.chat_id().is_empty() && chat_id != self.config.chat_id() {
            info!(
                "ignored message from non-target chat (got {}, want {})",
                chat_id,
                self.config.chat_id()
            );
            return None;
        }
        self.source_connected = true;
        if self.channel_name.is_none() {
            self.channel_name = Some(chat_id.to_string());
        }

        let text = text.trim();
        if let Some(cmd) = commands::parse_command(text) {
            return Some(self.run_command(cmd, chat_id));
        }

        match parser::parse_signal(text) {
            Some(Signal::Repeat(intent)) => Some(self.place_repeat(&intent)),
            Some(Signal::Pairs(intent)) => Some(self.place_pairs(&intent)),
            Some(Signal::Zone(intent)) => {
                self.on_zone_signal(intent);
                None
            }
            None => {
                info!("message ignored (did not match any signal format)");
                None
            }
        }
    }

    /// Re-derive stops for all owned positions from the stored ladders.
    pub fn trailing_tick(&mut self) {
        trailing::run_tick(&mut self.gateway, &self.ladders, &self.config);
    }

    /// Replace the runtime configuration with a validated snapshot.
    pub fn apply_config(&mut self, updates: &[(String, String)]) {
        self.config = self.config.apply(updates);
    }

    pub fn set_fixed_lot(&mut self, value: Option<f64>) {
        self.config = self.config.with_fixed_lot(value);
    }

    pub fn set_auto_place(&mut self, flag: bool) {
        self.config = self.config.with_auto_place(flag);
    }

    /// Resolve with the configured suffix, then the raw name, then the
    /// configured default symbol. Used on the auto-placement path.
    fn resolve_symbol(&self, requested: &str) -> Option<InstrumentInfo> {
        let mut candidates = Vec::new();
        if !self.config.symbol_suffix().is_empty() {
            candidates.push(format!("{}{}", requested, self.config.symbol_suffix()));
        }
        candidates.push(requested.to_string());
        candidates.push(self.config.default_symbol().to_string());

        for candidate in candidates {
            if let Some(found) = self.gateway.instrument(&candidate) {
                if candidate != requested {
                    info!("symbol resolved: requested {}, using {}", requested, candidate);
                }
                return Some(found);
            }
        }
        None
    }

    /// Resolve a user-provided symbol with no default fallback. Used for
    /// operator commands, where acting on the wrong symbol is worse than
    /// refusing.
    fn resolve_symbol_strict(&self, requested: &str) -> Option<InstrumentInfo> {
        let base = requested.trim().to_uppercase();
        if base.is_empty() {
            return None;
        }
        if !self.config.symbol_suffix().is_empty() {
            let suffixed = format!("{}{}", base, self.config.symbol_suffix());
            if let Some(found) = self.gateway.instrument(&suffixed) {
                return Some(found);
            }
        }
        self.gateway.instrument(&base)
    }

    fn on_zone_signal(&mut self, intent: ZoneIntent) {
        info!(
            "parsed signal: {} {} lot {} zone {}/{} SL {} ({} TPs)",
            intent.side(),
            intent.symbol(),
            intent.lot_size(),
            intent.zone_low(),
            intent.zone_high(),
            intent.stop_loss(),
            intent.take_profits().len()
        );

        // record the ladder before any placement so trailing also covers
        // positions the operator enters by hand off the same signal
        let numeric: Vec<f64> = intent
            .take_profits()
            .iter()
            .filter_map(TakeProfit::level)
            .collect();
        if !numeric.is_empty() {
            self.ladders.record(intent.symbol(), intent.side(), &numeric);
            if !self.config.symbol_suffix().is_empty() {
                let suffixed = format!("{}{}", intent.symbol(), self.config.symbol_suffix());
                self.ladders.record(&suffixed, intent.side(), &numeric);
            }
        }

        let auto = self.config.auto_place();
        self.last_signal = Some(intent.clone());
        if auto {
            let report = self.place_zone(&intent);
            if report.any_placed() {
                info!("auto-place: orders placed successfully");
            } else {
                warn!("auto-place: no orders were placed");
            }
        }
    }

    /// Ladder the zone and submit. Public so an operator surface can replay
    /// the last received signal on demand.
    pub fn place_zone(&mut self, intent: &ZoneIntent) -> PlacementReport {
        let Some(info) = self.resolve_symbol(intent.symbol()) else {
            error!(
                "no tradable symbol for {} (default {} also unknown)",
                intent.symbol(),
                self.config.default_symbol()
            );
            return PlacementReport::none();
        };
        let plan = planner::plan_zone(intent, &info, &self.config);
        info!(
            "placing {} pending {} LIMIT order(s) for {} across zone {}..{} (step {})",
            plan.rungs().len(),
            plan.side(),
            plan.symbol(),
            intent.zone_low(),
            intent.zone_high(),
            planner::ZONE_STEP
        );
        self.gateway.submit_plan(&plan, &self.config)
    }

    fn place_repeat(&mut self, intent: &RepeatIntent) -> String {
        let default = self.config.default_symbol().to_string();
        let Some(info) = self.resolve_symbol(&default) else {
            return "Order placement failed: no tradable symbol.".to_string();
        };
        let plan = planner::plan_repeat(intent, &info, &self.config);
        let lot = plan.rungs().first().map(|r| r.lot()).unwrap_or(0.0);
        let report = self.gateway.submit_plan(&plan, &self.config);
        format!(
            "Placed {}/{} {} LIMIT @ {}, lot {}, SL {}, TP {}.",
            report.placed,
            report.requested,
            intent.side,
            intent.entry,
            lot,
            intent.stop_loss,
            intent
                .take_profit
                .map(|v| v.to_string())
                .unwrap_or_else(|| "open".to_string())
        )
    }

    fn place_pairs(&mut self, intent: &PairsIntent) -> String {
        let default = self.config.default_symbol().to_string();
        let Some(info) = self.resolve_symbol(&default) else {
            return "Order placement failed: no tradable symbol.".to_string();
        };
        let plan = planner::plan_pairs(intent, &info, &self.config);
        let lot = plan.rungs().first().map(|r| r.lot()).unwrap_or(0.0);
        let report = self.gateway.submit_plan(&plan, &self.config);
        format!(
            "Placed {}/{} {} LIMIT orders, lot {}, SL {}.",
            report.placed, report.requested, intent.side, lot, intent.stop_loss
        )
    }

    fn run_command(&mut self, cmd: Command, chat_id: &str) -> String {
        match cmd {
            Command::GetId => format!(
                "Chat ID: {}\nTitle: {}\n\nSet this ID in Configuration -> Chat ID.",
                chat_id,
                self.channel_name.as_deref().unwrap_or("-")
            ),
            Command::CancelPending { symbol } => match symbol {
                Some(requested) => match self.resolve_symbol_strict(&requested) {
                    Some(info) => {
                        let n =
                            self.gateway
                                .cancel_pending(Some(info.symbol()), true, &self.config);
                        format!("Cancelled {} pending order(s) for {}.", n, info.symbol())
                    }
                    None => format!("Symbol '{}' not found.", requested),
                },
                None => {
                    let n = self.gateway.cancel_pending(None, true, &self.config);
                    format!("Cancelled {} pending order(s) (all symbols).", n)
                }
            },
            Command::ClosePositions {
                symbol,
                profit_filter,
            } => match symbol {
                Some(requested) => match self.resolve_symbol_strict(&requested) {
                    Some(info) => {
                        let n = self.gateway.close_positions(
                            Some(info.symbol()),
                            true,
                            profit_filter,
                            &self.config,
                        );
                        format!("Closed {} open position(s) for {}.", n, info.symbol())
                    }
                    None => format!("Symbol '{}' not found.", requested),
                },
                None => {
                    let n = self
                        .gateway
                        .close_positions(None, true, profit_filter, &self.config);
                    match profit_filter {
                        Some(true) => format!("Closed {} profitable position(s) (all symbols).", n),
                        Some(false) => format!("Closed {} losing position(s) (all symbols).", n),
                        None => format!("Closed {} open position(s) (all symbols).", n),
                    }
                }
            },
            Command::Kill { symbol } => match symbol {
                Some(requested) => match self.resolve_symbol_strict(&requested) {
                    Some(info) => {
                        let closed = self.gateway.close_positions(
                            Some(info.symbol()),
                            true,
                            None,
                            &self.config,
                        );
                        let cancelled =
                            self.gateway
                                .cancel_pending(Some(info.symbol()), true, &self.config);
                        format!(
                            "Kill {}: closed {} positions, cancelled {} pending.",
                            info.symbol(),
                            closed,
                            cancelled
                        )
                    }
                    None => format!("Symbol '{}' not found.", requested),
                },
                None => {
                    let closed = self.gateway.close_positions(None, true, None, &self.config);
                    let cancelled = self.gateway.cancel_pending(None, true, &self.config);
                    format!(
                        "Kill all: closed {} positions, cancelled {} pending.",
                        closed, cancelled
                    )
                }
            },
        }
    }
}
