//! Metrics initialization for the `opnode` binary.

use opnode_cli::MetricsArgs;

/// Starts the Prometheus exporter and registers the pipeline metrics.
///
/// Does nothing unless metrics are enabled.
pub fn init_unified_metrics(args: &MetricsArgs) -> anyhow::Result<()> {
    args.init_metrics()?;
    if args.enabled {
        opnode_derive::metrics::Metrics::init();
        opnode_node_service::Metrics::init();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_metrics_are_a_noop() {
        assert!(init_unified_metrics(&MetricsArgs::default()).is_ok());
    }
}
