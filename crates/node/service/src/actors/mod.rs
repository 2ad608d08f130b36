//! [NodeActor] services for the node.
//!
//! [NodeActor]: super::NodeActor

mod traits;
pub use traits::{CancellableContext, NodeActor};

mod head_watcher;
pub use head_watcher::{
    HEAD_CHANNEL_CAPACITY, HeadWatcher, HeadWatcherBuilder, HeadWatcherContext, HeadWatcherError,
    HeadWatcherInboundData,
};
