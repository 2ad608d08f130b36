//! Node Subcommand.

use crate::{
    flags::{GlobalArgs, L1Args},
    l1::L1BlockFetcher,
};
use alloy_eips::BlockId;
use clap::Parser;
use opnode_cli::LogConfig;
use opnode_derive::derive_block_inputs;
use opnode_node_service::{DEFAULT_POLL_INTERVAL, RpcHeadSource, follow_head_changes};
use opnode_protocol::HeadSignal;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Follows the L1 head and derives the L2 block inputs of every new L1 block.
///
/// ```bash
/// opnode node --l1-eth-rpc http://localhost:8545 --poll-interval 12
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Follows the L1 head and derives L2 block inputs")]
pub struct NodeCommand {
    /// L1 connection flags.
    #[command(flatten)]
    pub l1: L1Args,
    /// Seconds between two polls of the latest L1 block.
    #[arg(
        long = "poll-interval",
        default_value_t = DEFAULT_POLL_INTERVAL.as_secs(),
        env = "OPNODE_POLL_INTERVAL"
    )]
    pub poll_interval: u64,
}

impl NodeCommand {
    /// Initializes the logging system based on global arguments.
    pub fn init_logs(&self, args: &GlobalArgs) -> anyhow::Result<()> {
        LogConfig::new(args.log_args.clone()).init_tracing_subscriber(None)?;
        Ok(())
    }

    /// Returns the configured poll interval.
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval)
    }

    /// Run the Node subcommand.
    ///
    /// Runs until `cancellation` fires or the L1 source fails. Heads are derived one at a time
    /// and the source is not read while a head is being derived.
    pub async fn run(
        self,
        _args: &GlobalArgs,
        cancellation: CancellationToken,
    ) -> anyhow::Result<()> {
        let provider = self.l1.provider();
        let fetcher = L1BlockFetcher::new(provider.clone());
        let source = RpcHeadSource::new(provider, self.poll_interval());

        info!(
            target: "rollup_node",
            l1_eth_rpc = %self.l1.l1_eth_rpc,
            poll_interval = ?self.poll_interval(),
            "Starting L1 head watcher"
        );

        follow_head_changes(cancellation, source, |signal| Self::derive_head(&fetcher, signal))
            .await?;
        info!(target: "rollup_node", "L1 head watcher stopped");
        Ok(())
    }

    async fn derive_head(fetcher: &L1BlockFetcher, signal: HeadSignal) {
        let (header, receipts) = match fetcher.block_inputs(BlockId::from(signal.head.hash)).await
        {
            Ok(inputs) => inputs,
            Err(err) => {
                warn!(target: "rollup_node", head = %signal.head, %err, "Failed to fetch L1 block");
                return;
            }
        };

        match derive_block_inputs(&header, &receipts) {
            Ok(attributes) => info!(
                target: "rollup_node",
                head = %signal.head,
                parent = %signal.parent,
                timestamp = attributes.timestamp,
                user_deposits = attributes.user_deposits().len(),
                "Derived L2 block inputs"
            ),
            Err(err) => warn!(
                target: "rollup_node",
                head = %signal.head,
                kind = err.kind(),
                %err,
                "Failed to derive L2 block inputs"
            ),
        }
    }
}
