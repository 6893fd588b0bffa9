use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_stream::wrappers::ReceiverStream;

use crate::{
    api::QuoteSource,
    error::{QuoteError, QuoteResult},
};

/// Validates a symbol against a [`QuoteSource`] and then polls it on a fixed
/// period, publishing every result to a channel until cancelled.
pub struct QuoteStreamer<S> {
    source: Arc<S>,
    poll_interval: Duration,
}

impl<S> QuoteStreamer<S>
where
    S: QuoteSource + 'static,
{
    pub fn new(source: S, poll_interval: Duration) -> Self {
        Self::from_arc(Arc::new(source), poll_interval)
    }

    pub fn from_arc(source: Arc<S>, poll_interval: Duration) -> Self {
        Self {
            source,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Fetches once to check the feed, then spawns the publish loop.
    ///
    /// Returns as soon as the check passes. On failure nothing is spawned and
    /// `sink` is dropped without a value, so its receiver just sees a closed
    /// channel. The loop closes `sink` when `cancel` fires or its sender is
    /// dropped.
    pub async fn start(
        &self,
        symbol: &str,
        sink: mpsc::Sender<QuoteResult>,
        cancel: oneshot::Receiver<()>,
    ) -> Result<StreamTask, QuoteError> {
        self.first_tick()?;

        let quote = self.source.fetch(symbol).await?;
        if quote.is_zero() {
            return Err(QuoteError::ZeroPrice(symbol.to_string()));
        }

        info!(
            "Starting {} stream at {} every {:?}",
            symbol,
            quote.price(),
            self.poll_interval
        );

        let handle = tokio::spawn(run_loop(
            Arc::clone(&self.source),
            symbol.to_string(),
            self.first_tick()?,
            self.poll_interval,
            sink,
            cancel,
        ));

        Ok(StreamTask {
            symbol: symbol.to_string(),
            handle: Some(handle),
        })
    }

    /// Deadline of the first tick if the loop started now.
    fn first_tick(&self) -> Result<Instant, QuoteError> {
        if self.poll_interval.is_zero() {
            return Err(QuoteError::Config(
                "poll interval must be greater than zero".to_string(),
            ));
        }

        Instant::now().checked_add(self.poll_interval).ok_or_else(|| {
            QuoteError::Config(format!(
                "poll interval {:?} is out of range",
                self.poll_interval
            ))
        })
    }

    /// Like [`start`](Self::start), with the channel and cancel signal owned by
    /// the returned subscription.
    pub async fn subscribe(
        &self,
        symbol: &str,
        capacity: usize,
    ) -> Result<QuoteSubscription, QuoteError> {
        if capacity == 0 {
            return Err(QuoteError::Config(
                "channel capacity must be greater than zero".to_string(),
            ));
        }

        let (sink, receiver) = mpsc::channel(capacity);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let task = self.start(symbol, sink, cancel_rx).await?;

        Ok(QuoteSubscription {
            receiver,
            stop: StopHandle {
                cancel: Some(cancel_tx),
                task,
            },
        })
    }
}

async fn run_loop<S>(
    source: Arc<S>,
    symbol: String,
    first_tick: Instant,
    period: Duration,
    sink: mpsc::Sender<QuoteResult>,
    mut cancel: oneshot::Receiver<()>,
) where
    S: QuoteSource + ?Sized,
{
    let mut ticker = time::interval_at(first_tick, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut published: u64 = 0;

    loop {
        // Cancel is polled first so a pending tick is never handled after it fired.
        tokio::select! {
            biased;
            _ = &mut cancel => break,
            _ = ticker.tick() => {}
        }

        let publish = async {
            let result = source.fetch(&symbol).await;
            match &result {
                Ok(quote) => debug!("{}", quote),
                Err(e) => warn!("{} fetch failed: {}", symbol, e),
            }
            sink.send(result).await
        };

        tokio::select! {
            biased;
            _ = &mut cancel => break,
            sent = publish => {
                if sent.is_err() {
                    warn!("{} stream receiver dropped", symbol);
                    break;
                }
                published += 1;
            }
        }
    }

    drop(sink);
    info!("Stopped {} stream after {} quotes", symbol, published);
}

/// Owner of a running publish loop. Dropping it aborts the loop.
#[derive(Debug)]
pub struct StreamTask {
    symbol: String,
    handle: Option<JoinHandle<()>>,
}

impl StreamTask {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(|handle| handle.is_finished())
    }

    /// Waits for the loop to exit. Does not cancel it.
    pub async fn join(mut self) -> Result<(), QuoteError> {
        match self.handle.take() {
            Some(handle) => Ok(handle.await?),
            None => Ok(()),
        }
    }
}

impl Drop for StreamTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Cancel side of a [`QuoteSubscription`].
#[derive(Debug)]
pub struct StopHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: StreamTask,
}

impl StopHandle {
    pub fn symbol(&self) -> &str {
        self.task.symbol()
    }

    /// Fires the cancel signal. Later calls do nothing.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn stop(mut self) -> Result<(), QuoteError> {
        self.cancel();
        self.task.join().await
    }
}

#[derive(Debug)]
pub struct QuoteSubscription {
    receiver: mpsc::Receiver<QuoteResult>,
    stop: StopHandle,
}

impl QuoteSubscription {
    pub fn symbol(&self) -> &str {
        self.stop.symbol()
    }

    /// Next published result, or `None` once the loop has closed the channel.
    pub async fn recv(&mut self) -> Option<QuoteResult> {
        self.receiver.recv().await
    }

    pub fn cancel(&mut self) {
        self.stop.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.stop.is_finished()
    }

    pub async fn stop(self) -> Result<(), QuoteError> {
        self.stop.stop().await
    }

    pub fn split(self) -> (ReceiverStream<QuoteResult>, StopHandle) {
        (ReceiverStream::new(self.receiver), self.stop)
    }
}
