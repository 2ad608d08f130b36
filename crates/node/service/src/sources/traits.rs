//! The [`NewHeadSource`] capability.

use alloy_rpc_types_eth::Header;
use async_trait::async_trait;
use tokio::sync::{
    mpsc,
    oneshot::{self, error::TryRecvError},
};
use tokio_util::sync::{CancellationToken, DropGuard};

/// A source of new L1 chain heads.
#[async_trait]
pub trait NewHeadSource: Send + Sync {
    /// The error reported by the source.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Subscribes to new heads.
    ///
    /// Every new head is pushed into `sink`, in the order the source observed them. The source
    /// waits for room in the sink rather than dropping heads. It stops once the returned
    /// [`HeadSubscription`] is dropped or the sink is closed.
    async fn subscribe_new_heads(
        &self,
        sink: mpsc::Sender<Header>,
    ) -> Result<HeadSubscription<Self::Error>, Self::Error>;
}

/// The consumer end of an active head subscription.
///
/// Dropping the subscription unsubscribes from the source.
#[derive(Debug)]
pub struct HeadSubscription<E> {
    errors: oneshot::Receiver<E>,
    unsubscribe: DropGuard,
}

/// The source end of a [`HeadSubscription`].
#[derive(Debug)]
pub struct SubscriptionHandle<E> {
    errors: oneshot::Sender<E>,
    unsubscribed: CancellationToken,
}

impl<E> HeadSubscription<E> {
    /// Creates a linked subscription and source handle.
    pub fn new() -> (SubscriptionHandle<E>, Self) {
        let (errors_tx, errors) = oneshot::channel();
        let unsubscribed = CancellationToken::new();
        let subscription = Self { errors, unsubscribe: unsubscribed.clone().drop_guard() };
        (SubscriptionHandle { errors: errors_tx, unsubscribed }, subscription)
    }

    /// Waits for the source to fail.
    ///
    /// Returns `None` if the source ended the subscription without reporting an error.
    pub async fn failed(&mut self) -> Option<E> {
        (&mut self.errors).await.ok()
    }

    /// Returns the error reported by the source, if one is pending.
    pub fn try_failed(&mut self) -> Option<E> {
        match self.errors.try_recv() {
            Ok(err) => Some(err),
            Err(TryRecvError::Empty | TryRecvError::Closed) => None,
        }
    }

    /// Releases the subscription.
    pub fn unsubscribe(self) {
        drop(self.unsubscribe);
    }
}

impl<E> SubscriptionHandle<E> {
    /// Reports a terminal error to the subscriber.
    pub fn fail(self, err: E) {
        let _ = self.errors.send(err);
    }

    /// Returns `true` once the subscriber has unsubscribed.
    pub fn is_unsubscribed(&self) -> bool {
        self.unsubscribed.is_cancelled()
    }

    /// Returns a token cancelled once the subscriber unsubscribes.
    pub fn unsubscribed(&self) -> CancellationToken {
        self.unsubscribed.clone()
    }
}
