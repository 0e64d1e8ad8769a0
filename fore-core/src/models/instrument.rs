use serde::{Deserialize, Serialize};

/// Venue metadata for one tradable symbol: price precision and volume grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentInfo {
    symbol: String,
    /// Price precision in decimal digits.
    digits: u32,
    /// Smallest price increment (e.g. 0.01 for 2-digit symbols).
    point: f64,
    lot_step: f64,
    lot_min: f64,
    lot_max: f64,
}

impl InstrumentInfo {
    pub fn new(
        symbol: impl Into<String>,
        digits: u32,
        point: f64,
        lot_step: f64,
        lot_min: f64,
        lot_max: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            digits,
            point,
            lot_step,
            lot_min,
            lot_max,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn point(&self) -> f64 {
        self.point
    }

    pub fn lot_step(&self) -> f64 {
        self.lot_step
    }

    pub fn lot_min(&self) -> f64 {
        self.lot_min
    }

    pub fn lot_max(&self) -> f64 {
        self.lot_max
    }

    /// Round a price onto the symbol's decimal grid.
    pub fn round_price(&self, price: f64) -> f64 {
        let factor = 10f64.powi(self.digits as i32);
        (price * factor).round() / factor
    }

    /// Snap a raw lot onto the venue volume grid: truncate down to the volume
    /// step (never rounds up), then clamp into [lot_min, lot_max].
    pub fn snap_lot(&self, raw: f64) -> f64 {
        let step = if self.lot_step > 0.0 {
            self.lot_step
        } else {
            0.01
        };
        let steps = ((raw / step) + 1e-9).floor();
        let mut lot = steps * step;
        if lot < self.lot_min {
            lot = self.lot_min;
        }
        if lot > self.lot_max {
            lot = self.lot_max;
        }
        // venues quote volumes to two decimals
        (lot * 100.0).round() / 100.0
    }
}
