use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;

/// Comment prefix branded onto every order this bot places.
pub const BRAND_PREFIX: &str = "ForeAi";

/// Comment prefixes of prior incarnations of this bot. Orders carrying one of
/// these are still treated as ours.
pub const LEGACY_PREFIXES: &[&str] = &["MazharBot"];

fn default_symbol() -> String {
    "XAUUSD".to_string()
}

fn default_fallback_lot() -> f64 {
    0.10
}

fn default_slippage() -> u32 {
    30
}

fn default_magic() -> i64 {
    777001
}

/// Immutable runtime settings snapshot. Pipeline invocations receive a
/// reference to the current snapshot; `apply` produces a replacement, so
/// readers never observe a half-updated configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_symbol")]
    default_symbol: String,
    #[serde(default)]
    symbol_suffix: String,
    #[serde(default = "default_fallback_lot")]
    fallback_lot: f64,
    #[serde(default = "default_slippage")]
    slippage: u32,
    /// Numeric ownership tag attached to every order at submission.
    #[serde(default = "default_magic")]
    magic: i64,
    /// Operator-configured lot used when a signal carries none.
    #[serde(default)]
    fixed_lot: Option<f64>,
    /// Submit the laddered plan as soon as a zone signal parses.
    #[serde(default)]
    auto_place: bool,
    /// Only accept messages from this chat. Empty accepts all chats.
    #[serde(default)]
    chat_id: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_symbol: default_symbol(),
            symbol_suffix: String::new(),
            fallback_lot: default_fallback_lot(),
            slippage: default_slippage(),
            magic: default_magic(),
            fixed_lot: None,
            auto_place: false,
            chat_id: String::new(),
        }
    }
}

fn env_any(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|n| env::var(n).ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RuntimeConfig {
    /// Bootstrap a snapshot from process environment variables. Legacy
    /// variable names are resolved here, once, into the canonical fields.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Some(v) = env_any(&["SYMBOL"]) {
            cfg.default_symbol = v.to_uppercase();
        }
        if let Some(v) = env_any(&["SYMBOL_SUFFIX"]) {
            cfg.symbol_suffix = v;
        }
        if let Some(v) = env_any(&["LOT_FALLBACK"]).and_then(|v| v.parse().ok()) {
            cfg.fallback_lot = v;
        }
        if let Some(v) = env_any(&["SLIPPAGE"]).and_then(|v| v.parse().ok()) {
            cfg.slippage = v;
        }
        if let Some(v) = env_any(&["FORE_AI_MAGIC", "MAZHAR_MAGIC"]).and_then(|v| v.parse().ok()) {
            cfg.magic = v;
        }
        if let Some(v) = env_any(&["FIXED_LOT"]).and_then(|v| v.parse::<f64>().ok()) {
            if v > 0.0 {
                cfg.fixed_lot = Some(v);
            }
        }
        if let Some(v) = env_any(&["AUTO_PLACE"]) {
            cfg.auto_place = matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
        if let Some(v) = env_any(&["CHAT_ID", "TELEGRAM_CHANNEL_ID"]) {
            cfg.chat_id = v;
        }
        cfg
    }

    pub fn default_symbol(&self) -> &str {
        &self.default_symbol
    }

    pub fn symbol_suffix(&self) -> &str {
        &self.symbol_suffix
    }

    pub fn fallback_lot(&self) -> f64 {
        self.fallback_lot
    }

    pub fn slippage(&self) -> u32 {
        self.slippage
    }

    pub fn magic(&self) -> i64 {
        self.magic
    }

    pub fn fixed_lot(&self) -> Option<f64> {
        self.fixed_lot
    }

    pub fn auto_place(&self) -> bool {
        self.auto_place
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    /// Order comment for a given direction, e.g. "ForeAi-BUY".
    pub fn comment_for(&self, side: super::Side) -> String {
        format!("{}-{}", BRAND_PREFIX, side)
    }

    /// Dual ownership test: our numeric tag, or a recognized comment prefix
    /// (current brand or a legacy one).
    pub fn owns(&self, magic: i64, comment: &str) -> bool {
        if magic == self.magic {
            return true;
        }
        if comment.starts_with(&format!("{}-", BRAND_PREFIX)) {
            return true;
        }
        LEGACY_PREFIXES
            .iter()
            .any(|p| comment.starts_with(&format!("{}-", p)))
    }

    pub fn with_fixed_lot(&self, value: Option<f64>) -> Self {
        let mut next = self.clone();
        next.fixed_lot = value.filter(|v| *v > 0.0);
        info!("fixed lot updated: {:?}", next.fixed_lot);
        next
    }

    pub fn with_auto_place(&self, flag: bool) -> Self {
        let mut next = self.clone();
        next.auto_place = flag;
        info!("auto-place on signal set to: {}", flag);
        next
    }

    /// Apply a set of named updates, returning the replacement snapshot.
    /// Every accepted change is logged; invalid values are rejected per key
    /// and never abort the rest of the batch. Unknown keys are ignored.
    pub fn apply(&self, updates: &[(String, String)]) -> Self {
        let mut next = self.clone();
        for (key, value) in updates {
            let accepted = match key.as_str() {
                "SYMBOL" => {
                    let v = value.trim().to_uppercase();
                    if v.is_empty() {
                        false
                    } else {
                        next.default_symbol = v;
                        true
                    }
                }
                "SYMBOL_SUFFIX" => {
                    next.symbol_suffix = value.trim().to_string();
                    true
                }
                "LOT_FALLBACK" => match value.trim().parse::<f64>() {
                    Ok(v) if v > 0.0 => {
                        next.fallback_lot = v;
                        true
                    }
                    _ => false,
                },
                "SLIPPAGE" => match value.trim().parse::<u32>() {
                    Ok(v) => {
                        next.slippage = v;
                        true
                    }
                    Err(_) => false,
                },
                "FORE_AI_MAGIC" | "MAZHAR_MAGIC" => match value.trim().parse::<i64>() {
                    Ok(v) => {
                        next.magic = v;
                        true
                    }
                    Err(_) => false,
                },
                "FIXED_LOT" => {
                    if value.trim().is_empty() {
                        next.fixed_lot = None;
                        true
                    } else {
                        match value.trim().parse::<f64>() {
                            Ok(v) => {
                                next.fixed_lot = Some(v).filter(|v| *v > 0.0);
                                true
                            }
                            Err(_) => false,
                        }
                    }
                }
                "AUTO_PLACE" => {
                    next.auto_place =
                        matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
                    true
                }
                "CHAT_ID" | "TELEGRAM_CHANNEL_ID" => {
                    next.chat_id = value.trim().to_string();
                    true
                }
                _ => continue,
            };
            if accepted {
                info!("config updated: {} -> {}", key, value);
            } else {
                warn!("config update rejected: {} = {:?}", key, value);
            }
        }
        next
    }
}
