//! Error types for CLI utilities.

use std::io;
use thiserror::Error;

/// Error type for prometheus server initialization.
#[derive(Debug, Error)]
pub enum PrometheusError {
    /// Failed to bind to the specified address.
    #[error("failed to bind metrics listener: {0}")]
    Bind(#[from] io::Error),
    /// Failed to build or install the prometheus recorder.
    #[error("failed to install prometheus recorder: {0}")]
    Build(#[from] metrics_exporter_prometheus::BuildError),
}
