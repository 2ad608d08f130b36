//! Utilities for spinning up a prometheus metrics server.

use crate::PrometheusError;
use metrics_exporter_prometheus::PrometheusBuilder;
use metrics_process::Collector;
use std::{
    net::{IpAddr, SocketAddr, TcpListener},
    thread::{self, sleep},
    time::Duration,
};
use tracing::info;

/// How often process metrics are refreshed.
const PROCESS_METRICS_INTERVAL: Duration = Duration::from_secs(60);

/// Start a Prometheus metrics server on the given address and port.
///
/// A port of `0` serves on a port picked by the OS.
pub fn init_prometheus_server(addr: IpAddr, metrics_port: u16) -> Result<(), PrometheusError> {
    let actual_addr = if metrics_port == 0 {
        // The builder binds its own listener, so resolve the port up front.
        TcpListener::bind((addr, 0))?.local_addr()?
    } else {
        SocketAddr::from((addr, metrics_port))
    };

    PrometheusBuilder::new().with_http_listener(actual_addr).install()?;

    let collector = Collector::default();
    collector.describe();
    thread::spawn(move || {
        loop {
            collector.collect();
            sleep(PROCESS_METRICS_INTERVAL);
        }
    });

    info!(target: "prometheus", "Serving metrics at: http://{}", actual_addr);
    Ok(())
}
