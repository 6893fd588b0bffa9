pub mod quote_streamer;

pub use quote_streamer::{QuoteStreamer, QuoteSubscription, StopHandle, StreamTask};
