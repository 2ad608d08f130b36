//! Sources of new L1 heads.

mod traits;
pub use traits::{HeadSubscription, NewHeadSource, SubscriptionHandle};

mod rpc;
pub use rpc::{DEFAULT_POLL_INTERVAL, RpcHeadSource, RpcHeadSourceError};
