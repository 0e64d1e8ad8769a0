//! Ordered grammar recognizers for inbound chat text.
//!
//! Three mutually exclusive grammars are tried in fixed priority: the
//! repeat-count format, the entry->tp pair list, then the zone format. Each
//! recognizer is a pure function over the raw text; one grammar's patterns
//! never influence another's match.

mod flexible;
mod zone;

pub use flexible::{parse_pairs_list, parse_repeat};
pub use zone::parse_zone;

use crate::models::Signal;

/// Recognize a chat message as a trade instruction. Unrecognized text yields
/// `None`, never an error.
pub fn parse_signal(text: &str) -> Option<Signal> {
    if text.trim().is_empty() {
        return None;
    }
    if let Some(intent) = flexible::parse_repeat(text) {
        return Some(Signal::Repeat(intent));
    }
    if let Some(intent) = flexible::parse_pairs_list(text) {
        return Some(Signal::Pairs(intent));
    }
    zone::parse_zone(text).map(Signal::Zone)
}

#[cfg(test)]
mod tests;
