//! Global arguments for the CLI.

use clap::Parser;
use opnode_cli::{LogArgs, MetricsArgs};

/// Global arguments for the CLI.
#[derive(Parser, Default, Clone, Debug, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Logging arguments.
    #[command(flatten)]
    pub log_args: LogArgs,
    /// Prometheus CLI arguments.
    #[command(flatten)]
    pub metrics: MetricsArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_args_default() {
        let args = GlobalArgs::try_parse_from(["test"]).unwrap();
        assert_eq!(args.log_args.level, 3);
        assert!(!args.metrics.enabled);
    }

    #[test]
    fn test_global_args_verbosity_and_metrics() {
        let args =
            GlobalArgs::try_parse_from(["test", "-vvvv", "--metrics.enabled", "--metrics.port", "0"])
                .unwrap();
        assert_eq!(args.log_args.level, 4);
        assert!(args.metrics.enabled);
        assert_eq!(args.metrics.port, 0);
    }
}
