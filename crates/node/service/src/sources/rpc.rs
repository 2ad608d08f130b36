//! A [`NewHeadSource`] polling an L1 node over JSON-RPC.

use crate::{HeadSubscription, NewHeadSource};
use alloy_eips::BlockNumberOrTag;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_client::PollerBuilder;
use alloy_rpc_types_eth::{Block, Header};
use alloy_transport::TransportError;
use async_stream::stream;
use async_trait::async_trait;
use futures::{Stream, StreamExt};
use std::time::Duration;
use thiserror::Error;
use tokio::{select, sync::mpsc};

/// The default interval between two polls of the latest block.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(4);

/// The error type for the [`RpcHeadSource`].
#[derive(Error, Debug)]
pub enum RpcHeadSourceError {
    /// Error in the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// Stream ended unexpectedly.
    #[error("Stream ended unexpectedly")]
    StreamEnded,
}

/// Observes the L1 head by polling `eth_getBlockByNumber("latest")`.
///
/// Polling may miss heads that were replaced before the next poll. Consecutive duplicates are
/// suppressed.
#[derive(Debug, Clone)]
pub struct RpcHeadSource {
    /// The L1 provider.
    l1_provider: RootProvider,
    /// The poll interval.
    poll_interval: Duration,
}

impl RpcHeadSource {
    /// Creates a new [`RpcHeadSource`] instance.
    pub const fn new(l1_provider: RootProvider, poll_interval: Duration) -> Self {
        Self { l1_provider, poll_interval }
    }

    /// Transforms the poller into a de-duplicated [`Stream`] of headers.
    fn head_stream(&self) -> impl Stream<Item = Header> + Unpin + Send + 'static {
        let mut poll_stream = PollerBuilder::<_, Block>::new(
            self.l1_provider.weak_client(),
            "eth_getBlockByNumber",
            (BlockNumberOrTag::Latest, false),
        )
        .with_poll_interval(self.poll_interval)
        .into_stream();

        Box::pin(stream! {
            let mut last_hash = None;
            while let Some(next) = poll_stream.next().await {
                if last_hash != Some(next.header.hash) {
                    last_hash = Some(next.header.hash);
                    yield next.header;
                }
            }
        })
    }
}

#[async_trait]
impl NewHeadSource for RpcHeadSource {
    type Error = RpcHeadSourceError;

    async fn subscribe_new_heads(
        &self,
        sink: mpsc::Sender<Header>,
    ) -> Result<HeadSubscription<Self::Error>, Self::Error> {
        // Surface an unreachable node at subscription time.
        let latest = self.l1_provider.get_block_number().await?;
        debug!(target: "head_source", latest, "Subscribing to L1 heads");

        let (handle, subscription) = HeadSubscription::new();
        let unsubscribed = handle.unsubscribed();
        let mut heads = self.head_stream();

        tokio::spawn(async move {
            loop {
                select! {
                    _ = unsubscribed.cancelled() => {
                        debug!(target: "head_source", "Unsubscribed from L1 heads");
                        return;
                    }
                    head = heads.next() => match head {
                        Some(head) => {
                            if sink.send(head).await.is_err() {
                                debug!(target: "head_source", "Head sink closed");
                                return;
                            }
                        }
                        None => {
                            error!(target: "head_source", "L1 head stream ended");
                            handle.fail(RpcHeadSourceError::StreamEnded);
                            return;
                        }
                    }
                }
            }
        });

        Ok(subscription)
    }
}
