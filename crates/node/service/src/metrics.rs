//! Metrics for the node service.

/// Container for node service metric names.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Total number of head signals emitted.
    pub const HEAD_SIGNALS_TOTAL: &'static str = "opnode_head_signals_total";
    /// The number of the latest observed L1 head.
    pub const HEAD_NUMBER: &'static str = "opnode_head_number";
    /// Total number of heads not building on the previously observed head.
    pub const HEAD_LINKAGE_BREAKS_TOTAL: &'static str = "opnode_head_linkage_breaks_total";

    /// Describes the metrics and zeroes them.
    #[cfg(feature = "metrics")]
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    #[cfg(feature = "metrics")]
    fn describe() {
        metrics::describe_counter!(
            Self::HEAD_SIGNALS_TOTAL,
            metrics::Unit::Count,
            "Total number of new L1 heads observed by the head watcher",
        );
        metrics::describe_gauge!(Self::HEAD_NUMBER, "The number of the latest observed L1 head");
        metrics::describe_counter!(
            Self::HEAD_LINKAGE_BREAKS_TOTAL,
            metrics::Unit::Count,
            "Total number of new L1 heads whose parent is not the previously observed head",
        );
    }

    #[cfg(feature = "metrics")]
    fn zero() {
        metrics::counter!(Self::HEAD_SIGNALS_TOTAL).increment(0);
        metrics::gauge!(Self::HEAD_NUMBER).set(0.0);
        metrics::counter!(Self::HEAD_LINKAGE_BREAKS_TOTAL).increment(0);
    }
}
