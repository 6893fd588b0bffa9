use async_trait::async_trait;
use reqwest::Client;

use super::{QuoteSource, base::make_request, forex_dto::ForexQuoteResponseDto};
use crate::{
    config::{DEFAULT_BASE_URL, FxConfig},
    error::{QuoteError, QuoteResult},
    models::Quote,
};

#[derive(Clone, Debug)]
pub struct ForexApi {
    client: Client,
    base_url: String,
}

impl Default for ForexApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ForexApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &FxConfig) -> Result<Self, QuoteError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(*timeout);
        }

        Ok(Self::with_client(builder.build()?, config.base_url().clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(symbol: &str) -> String {
        format!("{}=x/quote?format=json", symbol)
    }

    pub fn quote_url(&self, symbol: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            Self::endpoint(symbol)
        )
    }

    pub async fn get_quote(&self, symbol: &str) -> QuoteResult {
        if symbol.trim().is_empty() {
            return Err(QuoteError::EmptySymbol);
        }

        let text = make_request(&self.client, &self.quote_url(symbol)).await?;
        let response = serde_json::from_str::<ForexQuoteResponseDto>(&text)?;

        Ok(Quote::now(symbol, response.first_price()?))
    }
}

#[async_trait]
impl QuoteSource for ForexApi {
    async fn fetch(&self, symbol: &str) -> QuoteResult {
        self.get_quote(symbol).await
    }
}
