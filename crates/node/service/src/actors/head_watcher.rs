//! [`NodeActor`] implementation turning new L1 headers into [`HeadSignal`]s.

use crate::{CancellableContext, HeadSubscription, NewHeadSource, NodeActor};
use async_trait::async_trait;
use opnode_protocol::HeadSignal;
use thiserror::Error;
use tokio::{select, sync::mpsc};
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// The capacity of the channel between a head source and its watcher.
pub const HEAD_CHANNEL_CAPACITY: usize = 10;

/// The error type for the [`HeadWatcher`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HeadWatcherError<E> {
    /// The source refused the subscription.
    #[error("Failed to subscribe to new heads: {0}")]
    Subscribe(#[source] E),
    /// The source reported an error on an active subscription.
    #[error("Head subscription failed: {0}")]
    Subscription(#[source] E),
    /// The source ended the subscription without reporting an error.
    #[error("Head subscription closed unexpectedly")]
    SubscriptionClosed,
    /// The watcher was cancelled by its caller.
    #[error("Head watcher cancelled")]
    Cancelled,
    /// The watcher task panicked or was aborted.
    #[error("Head watcher task aborted")]
    Aborted,
}

impl<E> HeadWatcherError<E> {
    /// Builds the error reported when the header channel of `subscription` closes.
    pub(crate) fn closed(subscription: &mut HeadSubscription<E>) -> Self {
        subscription.try_failed().map_or(Self::SubscriptionClosed, Self::Subscription)
    }
}

/// Watches an L1 [`NewHeadSource`] and hands every new head, paired with its parent, to a
/// callback.
///
/// The callback runs on the watcher task, synchronously and in arrival order. A slow callback
/// back-pressures the source through the bounded header channel.
pub struct HeadWatcher<S, F> {
    source: S,
    on_head: F,
    quit: CancellationToken,
}

impl<S, F> std::fmt::Debug for HeadWatcher<S, F>
where
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadWatcher")
            .field("source", &self.source)
            .field("quit", &self.quit)
            .finish_non_exhaustive()
    }
}

/// The configuration for the head watcher actor.
#[derive(Debug)]
pub struct HeadWatcherBuilder<S, F> {
    /// The source of new heads.
    pub source: S,
    /// The callback invoked for every head signal.
    pub on_head: F,
}

/// The inbound handles of the head watcher actor.
#[derive(Debug, Clone)]
pub struct HeadWatcherInboundData {
    /// Stops the watcher cleanly when cancelled.
    pub quit: CancellationToken,
}

/// The communication context used by the head watcher actor.
#[derive(Debug)]
pub struct HeadWatcherContext {
    /// The cancellation token, shared between all tasks.
    pub cancellation: CancellationToken,
}

impl CancellableContext for HeadWatcherContext {
    fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancellation.cancelled()
    }
}

#[async_trait]
impl<S, F> NodeActor for HeadWatcher<S, F>
where
    S: NewHeadSource + 'static,
    F: FnMut(HeadSignal) + Send + 'static,
{
    type Error = HeadWatcherError<S::Error>;
    type InboundData = HeadWatcherInboundData;
    type OutboundData = HeadWatcherContext;
    type Builder = HeadWatcherBuilder<S, F>;

    fn build(HeadWatcherBuilder { source, on_head }: Self::Builder) -> (Self::InboundData, Self) {
        let quit = CancellationToken::new();
        (HeadWatcherInboundData { quit: quit.clone() }, Self { source, on_head, quit })
    }

    async fn start(
        mut self,
        HeadWatcherContext { cancellation }: Self::OutboundData,
    ) -> Result<(), Self::Error> {
        let (sink, mut heads) = mpsc::channel(HEAD_CHANNEL_CAPACITY);

        let mut subscription = select! {
            biased;
            _ = cancellation.cancelled() => {
                info!(target: "head_watcher", "Cancelled before the head subscription was established");
                return Err(HeadWatcherError::Cancelled);
            }
            _ = self.quit.cancelled() => return Ok(()),
            subscription = self.source.subscribe_new_heads(sink) => {
                subscription.map_err(HeadWatcherError::Subscribe)?
            }
        };
        info!(target: "head_watcher", "Subscribed to new L1 heads");

        let mut last: Option<HeadSignal> = None;
        loop {
            select! {
                biased;
                _ = cancellation.cancelled() => {
                    info!(target: "head_watcher", "Received shutdown signal. Exiting head watcher task.");
                    return Err(HeadWatcherError::Cancelled);
                }
                _ = self.quit.cancelled() => {
                    info!(target: "head_watcher", "Head watcher quit");
                    return Ok(());
                }
                header = heads.recv() => match header {
                    Some(header) => {
                        let signal = HeadSignal::from(&header);
                        if let Some(previous) = last.filter(|previous| !signal.extends(previous)) {
                            warn!(
                                target: "head_watcher",
                                previous = %previous.head,
                                parent = %signal.parent,
                                "New head does not extend the previous head"
                            );
                            #[cfg(feature = "metrics")]
                            metrics::counter!(crate::Metrics::HEAD_LINKAGE_BREAKS_TOTAL).increment(1);
                        }
                        debug!(target: "head_watcher", head = %signal.head, "New L1 head");
                        #[cfg(feature = "metrics")]
                        {
                            metrics::counter!(crate::Metrics::HEAD_SIGNALS_TOTAL).increment(1);
                            metrics::gauge!(crate::Metrics::HEAD_NUMBER).set(signal.head.number as f64);
                        }
                        last = Some(signal);
                        (self.on_head)(signal);
                    }
                    None => {
                        let err = HeadWatcherError::closed(&mut subscription);
                        error!(target: "head_watcher", %err, "Head channel closed");
                        return Err(err);
                    }
                },
                err = subscription.failed() => {
                    let err = err.map_or(HeadWatcherError::SubscriptionClosed, HeadWatcherError::Subscription);
                    error!(target: "head_watcher", %err, "Head subscription ended");
                    return Err(err);
                }
            }
        }
    }
}
