//! Fetches L1 blocks together with their receipts.

use alloy_consensus::ReceiptEnvelope;
use alloy_eips::BlockId;
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types_eth::Header;
use alloy_transport::TransportError;
use backon::{ExponentialBuilder, Retryable};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// The number of times a failed request is retried.
const MAX_RETRIES: usize = 5;

/// The delay before the first retry.
const MIN_RETRY_DELAY: Duration = Duration::from_millis(250);

/// An error fetching L1 block inputs.
#[derive(Error, Debug)]
pub enum L1FetchError {
    /// Error in the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    /// The node does not know the block.
    #[error("Block not found: {0}")]
    BlockNotFound(BlockId),
    /// The node returned no receipts for the block.
    #[error("Receipts not found for block {0}")]
    ReceiptsNotFound(BlockId),
}

impl L1FetchError {
    /// Returns `true` if the request may succeed when retried.
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Reads the header and receipts of L1 blocks.
#[derive(Debug, Clone)]
pub struct L1BlockFetcher {
    provider: RootProvider,
}

impl L1BlockFetcher {
    /// Creates a new [`L1BlockFetcher`].
    pub const fn new(provider: RootProvider) -> Self {
        Self { provider }
    }

    /// Fetches the header of `block` and the receipts of its transactions in block order.
    ///
    /// Receipts are requested by the hash of the fetched header, so both belong to the same
    /// block even if `block` names a tag. Transport errors are retried with exponential backoff.
    pub async fn block_inputs(
        &self,
        block: BlockId,
    ) -> Result<(Header, Vec<ReceiptEnvelope>), L1FetchError> {
        (|| self.fetch(block))
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(MIN_RETRY_DELAY)
                    .with_max_times(MAX_RETRIES),
            )
            .when(L1FetchError::is_transient)
            .notify(|err, duration| {
                debug!(target: "l1_fetcher", %block, %err, "Retrying L1 fetch after {duration:?}");
            })
            .await
    }

    async fn fetch(&self, block: BlockId) -> Result<(Header, Vec<ReceiptEnvelope>), L1FetchError> {
        let header =
            self.provider.get_block(block).await?.ok_or(L1FetchError::BlockNotFound(block))?.header;

        let hash = BlockId::from(header.hash);
        let receipts = self
            .provider
            .get_block_receipts(hash)
            .await?
            .ok_or(L1FetchError::ReceiptsNotFound(hash))?
            .into_iter()
            .map(|receipt| receipt.inner.into_primitives_receipt())
            .collect();

        Ok((header, receipts))
    }
}
