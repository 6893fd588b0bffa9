pub mod base;
pub mod forex;
pub mod forex_dto;

use async_trait::async_trait;

use crate::error::QuoteResult;

pub use forex::ForexApi;

/// One request-response cycle against a quote provider.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self, symbol: &str) -> QuoteResult;
}
