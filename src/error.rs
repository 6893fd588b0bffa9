use std::num::ParseFloatError;

use reqwest::StatusCode;
use thiserror::Error;
use tokio::task::JoinError;

use crate::models::Quote;

/// Outcome of one fetch cycle, delivered in-band on a quote stream.
pub type QuoteResult = Result<Quote, QuoteError>;

#[derive(Debug, Error)]
pub enum QuoteError {
    /// Fetcher was asked for an empty symbol
    #[error("symbol must not be empty")]
    EmptySymbol,

    /// Network, DNS or connection failure
    #[error("forex error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("forex error: request failed with status {0}")]
    Status(StatusCode),

    /// Body is not JSON or does not have the expected shape
    #[error("forex error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("forex error: invalid price {value:?}: {source}")]
    InvalidPrice {
        value: String,
        source: ParseFloatError,
    },

    /// `resources` list was present but empty
    #[error("malformed response: no resources")]
    NoResources,

    /// Startup check got a parseable quote with a price of exactly zero
    #[error("price is zero for {0}")]
    ZeroPrice(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("stream task failed: {0}")]
    Join(#[from] JoinError),
}
