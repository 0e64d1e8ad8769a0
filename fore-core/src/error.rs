use thiserror::Error;

/// Failures at the venue boundary. Bulk operations tally these per item and
/// keep going; a single rejection never aborts the batch.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The venue refused the request with an explicit return code.
    #[error("request rejected by venue (code {0})")]
    Rejected(i32),

    /// No usable venue session.
    #[error("venue session unavailable")]
    NotConnected,

    /// Symbol unknown to the venue.
    #[error("unknown symbol {0}")]
    UnknownSymbol(String),

    /// No live quote for the symbol.
    #[error("no quote available for {0}")]
    NoQuote(String),

    /// Referenced order or position no longer exists.
    #[error("unknown ticket {0}")]
    UnknownTicket(u64),
}

/// A specialized Result type for venue calls.
pub type BrokerResult<T> = std::result::Result<T, BrokerError>;
