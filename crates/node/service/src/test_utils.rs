//! Test utilities for the head watcher.

use crate::{HeadSubscription, NewHeadSource, SubscriptionHandle};
use alloy_primitives::B256;
use alloy_rpc_types_eth::Header;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, Notify, mpsc};
use tokio_util::sync::CancellationToken;

/// The error reported by a [`TestHeadSource`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("test source error: {0}")]
pub struct TestSourceError(pub &'static str);

#[derive(Debug, Default)]
struct Subscriber {
    sink: Option<mpsc::Sender<Header>>,
    handle: Option<SubscriptionHandle<TestSourceError>>,
    unsubscribed: Option<CancellationToken>,
}

/// A [`NewHeadSource`] driven by the test.
///
/// Clones share the same subscriber, so a test keeps one clone to push headers while the watcher
/// owns the other.
#[derive(Debug, Clone, Default)]
pub struct TestHeadSource {
    subscriber: Arc<Mutex<Subscriber>>,
    subscribed: Arc<Notify>,
    refusal: Option<TestSourceError>,
}

impl TestHeadSource {
    /// Creates a source refusing every subscription with `err`.
    pub fn refusing(err: TestSourceError) -> Self {
        Self { refusal: Some(err), ..Default::default() }
    }

    /// Waits until a subscriber is attached.
    pub async fn wait_subscribed(&self) {
        loop {
            if self.subscriber.lock().await.sink.is_some() {
                return;
            }
            self.subscribed.notified().await;
        }
    }

    /// Pushes a header to the subscriber, waiting for room in its channel.
    ///
    /// Returns `false` if there is no subscriber or it has gone away.
    pub async fn send(&self, header: Header) -> bool {
        let sink = self.subscriber.lock().await.sink.clone();
        match sink {
            Some(sink) => sink.send(header).await.is_ok(),
            None => false,
        }
    }

    /// Fails the active subscription with `err`.
    pub async fn fail(&self, err: TestSourceError) {
        if let Some(handle) = self.subscriber.lock().await.handle.take() {
            handle.fail(err);
        }
    }

    /// Ends the active subscription without reporting an error.
    pub async fn close(&self) {
        let mut subscriber = self.subscriber.lock().await;
        subscriber.sink.take();
        subscriber.handle.take();
    }

    /// Waits until the subscriber has unsubscribed.
    pub async fn wait_unsubscribed(&self) {
        let token = self.subscriber.lock().await.unsubscribed.clone();
        if let Some(token) = token {
            token.cancelled().await;
        }
    }

    /// Returns `true` if a subscriber attached and has since unsubscribed.
    pub async fn is_unsubscribed(&self) -> bool {
        self.subscriber
            .lock()
            .await
            .unsubscribed
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }
}

#[async_trait]
impl NewHeadSource for TestHeadSource {
    type Error = TestSourceError;

    async fn subscribe_new_heads(
        &self,
        sink: mpsc::Sender<Header>,
    ) -> Result<HeadSubscription<Self::Error>, Self::Error> {
        if let Some(err) = &self.refusal {
            return Err(err.clone());
        }
        let (handle, subscription) = HeadSubscription::new();
        *self.subscriber.lock().await = Subscriber {
            sink: Some(sink),
            unsubscribed: Some(handle.unsubscribed()),
            handle: Some(handle),
        };
        self.subscribed.notify_one();
        Ok(subscription)
    }
}

/// Builds an RPC header with the given identity.
pub fn header(number: u64, hash: B256, parent_hash: B256) -> Header {
    Header {
        hash,
        inner: alloy_consensus::Header { number, parent_hash, ..Default::default() },
        total_difficulty: None,
        size: None,
    }
}

/// Builds a linked chain of `len` headers starting at genesis.
pub fn chain(len: u64) -> Vec<Header> {
    (0..len)
        .map(|number| {
            let parent_hash =
                if number == 0 { B256::ZERO } else { B256::with_last_byte(number as u8) };
            header(number, B256::with_last_byte(number as u8 + 1), parent_hash)
        })
        .collect()
}
