//! Durable (symbol, side) -> take-profit level store.
//!
//! The intent pipeline overwrites an entry whenever a new signal with numeric
//! take-profits is planned; the trailing engine only ever reads. Entries are
//! kept sorted ascending and de-duplicated. The whole map is rewritten
//! atomically on every update so it survives a process restart.

use crate::models::Side;
use crate::persist;
use log::warn;
use std::collections::HashMap;
use std::path::PathBuf;

fn key(symbol: &str, side: Side) -> String {
    format!("{}|{}", symbol, side.as_str())
}

pub struct TpLadderStore {
    levels: HashMap<String, Vec<f64>>,
    path: Option<PathBuf>,
}

impl TpLadderStore {
    /// Store without a backing file (tests, dry runs).
    pub fn in_memory() -> Self {
        Self {
            levels: HashMap::new(),
            path: None,
        }
    }

    /// Durable store. Entries already on disk are merged into memory; a
    /// corrupt entry is skipped without failing the load.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            levels: HashMap::new(),
            path: Some(path.into()),
        };
        store.load();
        store
    }

    fn load(&mut self) {
        let Some(path) = &self.path else { return };
        if !path.exists() {
            return;
        }
        let raw: HashMap<String, serde_json::Value> = match persist::read_json(path) {
            Ok(v) => v,
            Err(e) => {
                warn!("ladder store: could not read {}: {}", path.display(), e);
                return;
            }
        };
        for (k, v) in raw {
            let Some((_, side)) = k.split_once('|') else {
                continue;
            };
            if Side::parse(side).is_none() {
                continue;
            }
            let Some(items) = v.as_array() else { continue };
            let levels: Vec<f64> = items.iter().filter_map(|x| x.as_f64()).collect();
            if levels.is_empty() || levels.len() != items.len() {
                continue;
            }
            self.levels.insert(k, normalized(levels));
        }
    }

    /// Overwrite the levels for (symbol, side) with the sorted, de-duplicated
    /// set and persist the whole map. Empty input is ignored.
    pub fn record(&mut self, symbol: &str, side: Side, levels: &[f64]) {
        if levels.is_empty() {
            return;
        }
        self.levels
            .insert(key(symbol, side), normalized(levels.to_vec()));
        self.persist();
    }

    /// Sorted ascending levels for (symbol, side), if any were recorded.
    pub fn get(&self, symbol: &str, side: Side) -> Option<&[f64]> {
        self.levels.get(&key(symbol, side)).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn persist(&self) {
        let Some(path) = &self.path else { return };
        // best-effort: a failed write must not break the pipeline
        if let Err(e) = persist::write_json_atomic(path, &self.levels) {
            warn!("ladder store: persist to {} failed: {}", path.display(), e);
        }
    }
}

fn normalized(mut levels: Vec<f64>) -> Vec<f64> {
    levels.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    levels.dedup();
    levels
}
