use log::debug;
use reqwest::Client;

use crate::error::QuoteError;

pub async fn make_request(client: &Client, url: &str) -> Result<String, QuoteError> {
    debug!("GET {}", url);

    let res = client.get(url).send().await?;

    if !res.status().is_success() {
        return Err(QuoteError::Status(res.status()));
    }

    Ok(res.text().await?)
}
