#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[macro_use]
extern crate tracing;

mod actors;
pub use actors::{
    CancellableContext, HEAD_CHANNEL_CAPACITY, HeadWatcher, HeadWatcherBuilder,
    HeadWatcherContext, HeadWatcherError, HeadWatcherInboundData, NodeActor,
};

mod sources;
pub use sources::{
    DEFAULT_POLL_INTERVAL, HeadSubscription, NewHeadSource, RpcHeadSource, RpcHeadSourceError,
    SubscriptionHandle,
};

mod watch;
pub use watch::{HeadWatch, follow_head_changes, head_signal_stream, watch_head_changes};

mod metrics;
pub use metrics::Metrics;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
