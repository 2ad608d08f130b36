//! CLI Flags

mod globals;
pub use globals::GlobalArgs;

mod l1;
pub use l1::L1Args;

mod metrics;
pub use metrics::init_unified_metrics;
