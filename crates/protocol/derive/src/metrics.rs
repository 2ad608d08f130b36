//! Metrics for block input derivation.

use crate::DeriveError;

/// Container for derivation metric names.
#[derive(Debug, Clone)]
pub struct Metrics;

impl Metrics {
    /// Total number of L1 blocks successfully derived.
    pub const DERIVED_BLOCKS_TOTAL: &'static str = "opnode_derive_blocks_total";
    /// Total number of user deposits derived.
    pub const DERIVED_USER_DEPOSITS_TOTAL: &'static str = "opnode_derive_user_deposits_total";
    /// Total number of failed derivations, labelled by error kind.
    pub const DERIVE_ERRORS_TOTAL: &'static str = "opnode_derive_errors_total";

    /// Describes the metrics and zeroes the counters.
    pub fn init() {
        Self::describe();
        Self::zero();
    }

    fn describe() {
        metrics::describe_counter!(
            Self::DERIVED_BLOCKS_TOTAL,
            metrics::Unit::Count,
            "Total number of L1 blocks derived into payload attributes",
        );
        metrics::describe_counter!(
            Self::DERIVED_USER_DEPOSITS_TOTAL,
            metrics::Unit::Count,
            "Total number of user deposits derived from L1 receipts",
        );
        metrics::describe_counter!(
            Self::DERIVE_ERRORS_TOTAL,
            metrics::Unit::Count,
            "Total number of failed block input derivations",
        );
    }

    fn zero() {
        metrics::counter!(Self::DERIVED_BLOCKS_TOTAL).increment(0);
        metrics::counter!(Self::DERIVED_USER_DEPOSITS_TOTAL).increment(0);
        for kind in ["integrity_mismatch", "malformed_deposit", "encoding"] {
            metrics::counter!(Self::DERIVE_ERRORS_TOTAL, "kind" => kind).increment(0);
        }
    }

    pub(crate) fn record_derived(user_deposits: usize) {
        metrics::counter!(Self::DERIVED_BLOCKS_TOTAL).increment(1);
        metrics::counter!(Self::DERIVED_USER_DEPOSITS_TOTAL).increment(user_deposits as u64);
    }

    pub(crate) fn record_error(err: &DeriveError) {
        metrics::counter!(Self::DERIVE_ERRORS_TOTAL, "kind" => err.kind()).increment(1);
    }
}
