use std::fmt;

use chrono::{DateTime, Local};
use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;

#[derive(Clone, Debug, Getters, PartialEq, Serialize, new)]
pub struct Quote {
    symbol: String,
    price: f64,
    fetched_at: DateTime<Local>,
}

impl Quote {
    pub fn now(symbol: impl Into<String>, price: f64) -> Self {
        Self::new(symbol.into(), price, Local::now())
    }

    /// Zero is what upstream reports before a price is available.
    pub fn is_zero(&self) -> bool {
        self.price == 0.0
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @ {}",
            self.symbol,
            self.price,
            self.fetched_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
