//! Prometheus metrics CLI args
//!
//! Specifies the available flags for prometheus metric configuration inside CLI

use crate::{PrometheusError, init_prometheus_server};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

/// Configuration for Prometheus metrics.
#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[command(next_help_heading = "Metrics")]
pub struct MetricsArgs {
    /// Controls whether Prometheus metrics are enabled. Disabled by default.
    #[arg(
        long = "metrics.enabled",
        global = true,
        default_value_t = false,
        env = "OPNODE_METRICS_ENABLED"
    )]
    pub enabled: bool,
    /// The port to serve Prometheus metrics on.
    #[arg(
        id = "metrics_port",
        long = "metrics.port",
        global = true,
        default_value = "9090",
        env = "OPNODE_METRICS_PORT"
    )]
    pub port: u16,
    /// The IP address to use for Prometheus metrics.
    #[arg(
        long = "metrics.addr",
        global = true,
        default_value = "0.0.0.0",
        env = "OPNODE_METRICS_ADDR"
    )]
    pub addr: IpAddr,
}

impl Default for MetricsArgs {
    fn default() -> Self {
        Self { enabled: false, port: 9090, addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED) }
    }
}

impl MetricsArgs {
    /// Starts the prometheus exporter if metrics are enabled.
    pub fn init_metrics(&self) -> Result<(), PrometheusError> {
        if self.enabled {
            init_prometheus_server(self.addr, self.port)?;
        }
        Ok(())
    }
}
