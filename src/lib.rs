//! Streams forex quotes polled from a remote JSON endpoint.
//!
//! [`ForexApi`](api::ForexApi) performs a single fetch. [`QuoteStreamer`](services::QuoteStreamer)
//! checks the feed once and then polls it on a fixed period from an owned
//! background task, publishing every [`QuoteResult`](error::QuoteResult) to a
//! channel until the caller cancels.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

#[cfg(test)]
mod test;
