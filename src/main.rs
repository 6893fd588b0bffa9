use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use fx_quote_stream::{api::ForexApi, config::FxConfig, services::QuoteStreamer};
use log::{error, info};
use tokio_stream::StreamExt;

/// Polls a forex quote endpoint and prints the price on every tick.
#[derive(Debug, Parser)]
#[command(name = "fx-quote-stream", version, about)]
struct Args {
    /// Currency symbol to watch, e.g. EUR or CNY
    #[arg(default_value = "EUR")]
    symbol: String,

    /// Seconds between fetches (overrides FX_POLL_INTERVAL_SECS)
    #[arg(long)]
    interval: Option<f64>,

    /// Quote endpoint root (overrides FX_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Stop after this many quotes
    #[arg(long)]
    count: Option<usize>,

    /// Print quotes as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = FxConfig::from_env().context("Failed to load configuration")?;
    if let Some(base_url) = args.base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(secs) = args.interval {
        let interval = Duration::try_from_secs_f64(secs)
            .with_context(|| format!("Invalid interval '{}'", secs))?;
        config = config.with_poll_interval(interval);
    }
    config.validate()?;

    let api = ForexApi::from_config(&config)?;
    let streamer = QuoteStreamer::new(api, *config.poll_interval());

    let subscription = streamer
        .subscribe(&args.symbol, *config.channel_capacity())
        .await
        .with_context(|| format!("Failed to start {} stream", args.symbol))?;
    let (mut quotes, stop) = subscription.split();

    let mut received = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
            next = quotes.next() => {
                let Some(result) = next else { break };
                match result {
                    Ok(quote) if args.json => println!("{}", serde_json::to_string(&quote)?),
                    Ok(quote) => println!("{}", quote),
                    Err(e) => error!("{}", e),
                }
                received += 1;
                if args.count.is_some_and(|count| received >= count) {
                    break;
                }
            }
        }
    }

    stop.stop().await?;

    Ok(())
}
