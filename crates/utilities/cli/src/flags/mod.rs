//! Common CLI Flags
//!
//! These are cli flags shared across the `opnode` binaries.

mod log;
pub use log::LogArgs;

mod metrics;
pub use metrics::MetricsArgs;
