use derive_getters::Getters;
use serde::Deserialize;

use crate::error::QuoteError;

#[derive(Debug, Deserialize, Getters)]
pub struct ForexQuoteResponseDto {
    list: ForexListDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ForexListDto {
    resources: Vec<ForexResourceDto>,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ForexResourceDto {
    resource: ForexResourceBodyDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ForexResourceBodyDto {
    fields: ForexFieldsDto,
}

#[derive(Debug, Deserialize, Getters)]
pub struct ForexFieldsDto {
    #[serde(default)]
    price: Option<String>,
}

impl ForexQuoteResponseDto {
    /// Price of the first resource. Further resources are ignored.
    pub fn first_price(&self) -> Result<f64, QuoteError> {
        let first = self
            .list
            .resources
            .first()
            .ok_or(QuoteError::NoResources)?;

        first.resource.fields.parse_price()
    }
}

impl ForexFieldsDto {
    // An absent price reads as 0.0, which the startup check rejects.
    fn parse_price(&self) -> Result<f64, QuoteError> {
        match &self.price {
            None => Ok(0.0),
            Some(value) => value
                .trim()
                .parse::<f64>()
                .map_err(|source| QuoteError::InvalidPrice {
                    value: value.clone(),
                    source,
                }),
        }
    }
}
