//! L1 connection flags.

use alloy_provider::RootProvider;
use clap::Args;
use url::Url;

/// The default L1 execution RPC.
const DEFAULT_L1_ETH_RPC: &str = "http://localhost:8545";

/// Flags for connecting to the L1 execution node.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct L1Args {
    /// URL of the L1 execution client RPC API.
    #[arg(
        long = "l1-eth-rpc",
        visible_alias = "l1",
        default_value = DEFAULT_L1_ETH_RPC,
        env = "OPNODE_L1_ETH_RPC"
    )]
    pub l1_eth_rpc: Url,
}

impl L1Args {
    /// Returns an HTTP provider for the L1 RPC.
    pub fn provider(&self) -> RootProvider {
        RootProvider::new_http(self.l1_eth_rpc.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        l1: L1Args,
    }

    #[test]
    fn test_l1_args_default() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        assert_eq!(cli.l1.l1_eth_rpc, Url::parse(DEFAULT_L1_ETH_RPC).unwrap());
    }

    #[rstest]
    #[case::long("--l1-eth-rpc")]
    #[case::alias("--l1")]
    fn test_l1_args_url(#[case] flag: &str) {
        let cli = TestCli::try_parse_from(["test", flag, "https://eth.example.org:8545/"]).unwrap();
        assert_eq!(cli.l1.l1_eth_rpc.as_str(), "https://eth.example.org:8545/");
    }

    #[test]
    fn test_l1_args_invalid_url() {
        assert!(TestCli::try_parse_from(["test", "--l1-eth-rpc", "not a url"]).is_err());
    }
}
