//! Derive Subcommand.

use crate::{
    flags::{GlobalArgs, L1Args},
    l1::L1BlockFetcher,
};
use alloy_eips::BlockNumberOrTag;
use clap::Parser;
use op_alloy_rpc_types_engine::OpPayloadAttributes;
use opnode_cli::LogConfig;
use opnode_derive::derive_block_inputs;
use opnode_protocol::PayloadAttributes;
use tracing::info;

/// Derives the L2 block inputs of a single L1 block and prints them as JSON.
///
/// ```bash
/// opnode derive --l1-eth-rpc http://localhost:8545 --l1-block 19000000
/// ```
#[derive(Parser, PartialEq, Eq, Debug, Clone)]
#[command(about = "Derives the L2 block inputs of a single L1 block")]
pub struct DeriveCommand {
    /// L1 connection flags.
    #[command(flatten)]
    pub l1: L1Args,
    /// The L1 block to derive from: a number, or one of latest, safe, finalized.
    #[arg(
        long = "l1-block",
        default_value = "latest",
        value_parser = parse_l1_block,
        env = "OPNODE_L1_BLOCK"
    )]
    pub l1_block: BlockNumberOrTag,
    /// Print the inputs in the engine API payload attributes format.
    #[arg(long = "engine", default_value_t = false)]
    pub engine: bool,
}

/// Parses a decimal or `0x`-prefixed block number, or a block tag.
fn parse_l1_block(value: &str) -> Result<BlockNumberOrTag, String> {
    match value.parse::<u64>() {
        Ok(number) => Ok(BlockNumberOrTag::Number(number)),
        Err(_) => value.parse::<BlockNumberOrTag>().map_err(|err| err.to_string()),
    }
}

impl DeriveCommand {
    /// Initializes the logging system based on global arguments.
    pub fn init_logs(&self, args: &GlobalArgs) -> anyhow::Result<()> {
        LogConfig::new(args.log_args.clone()).init_tracing_subscriber(None)?;
        Ok(())
    }

    /// Run the Derive subcommand.
    pub async fn run(self, _args: &GlobalArgs) -> anyhow::Result<()> {
        let fetcher = L1BlockFetcher::new(self.l1.provider());
        let (header, receipts) = fetcher.block_inputs(self.l1_block.into()).await?;
        info!(
            target: "derive_cmd",
            number = header.number,
            hash = %header.hash,
            receipts = receipts.len(),
            "Fetched L1 block"
        );

        let attributes = derive_block_inputs(&header, &receipts)?;
        println!("{}", self.render(attributes)?);
        Ok(())
    }

    /// Serializes the attributes in the requested format.
    fn render(&self, attributes: PayloadAttributes) -> serde_json::Result<String> {
        if self.engine {
            serde_json::to_string_pretty(&OpPayloadAttributes::from(attributes))
        } else {
            serde_json::to_string_pretty(&attributes)
        }
    }
}
