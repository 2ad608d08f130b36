//! Entry points for watching L1 head changes.

use crate::{
    HEAD_CHANNEL_CAPACITY, HeadWatcher, HeadWatcherBuilder, HeadWatcherContext, HeadWatcherError,
    HeadWatcherInboundData, NewHeadSource, NodeActor,
};
use async_stream::stream;
use futures::{Stream, StreamExt};
use opnode_protocol::HeadSignal;
use std::{future::Future, pin::pin};
use tokio::{select, sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

/// A handle to a running head watcher.
#[derive(Debug)]
pub struct HeadWatch<E> {
    quit: CancellationToken,
    handle: JoinHandle<Result<(), HeadWatcherError<E>>>,
}

impl<E> HeadWatch<E> {
    /// Stops the watcher and waits for it to exit.
    ///
    /// Returns `Ok(())` unless the watcher had already terminated with an error.
    pub async fn quit(self) -> Result<(), HeadWatcherError<E>> {
        self.quit.cancel();
        self.join().await
    }

    /// Waits for the watcher to exit.
    pub async fn join(self) -> Result<(), HeadWatcherError<E>> {
        self.handle.await.unwrap_or(Err(HeadWatcherError::Aborted))
    }

    /// Returns `true` if the watcher has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Spawns a head watcher on `source`, invoking `on_head` for every new head.
///
/// The watcher runs until `cancellation` is cancelled, [`HeadWatch::quit`] is called or the
/// source fails. Cancellation ends it with [`HeadWatcherError::Cancelled`], quitting ends it
/// cleanly. The subscription is released in every case.
pub fn watch_head_changes<S, F>(
    cancellation: CancellationToken,
    source: S,
    on_head: F,
) -> HeadWatch<S::Error>
where
    S: NewHeadSource + 'static,
    F: FnMut(HeadSignal) + Send + 'static,
{
    let (HeadWatcherInboundData { quit }, watcher) =
        HeadWatcher::build(HeadWatcherBuilder { source, on_head });
    let handle = tokio::spawn(watcher.start(HeadWatcherContext { cancellation }));
    HeadWatch { quit, handle }
}

/// Subscribes to `source` and yields a [`HeadSignal`] per new head.
///
/// The stream ends after yielding the first error. Dropping the stream releases the
/// subscription.
pub fn head_signal_stream<S>(
    source: S,
) -> impl Stream<Item = Result<HeadSignal, HeadWatcherError<S::Error>>> + Send
where
    S: NewHeadSource + 'static,
{
    stream! {
        let (sink, mut heads) = mpsc::channel(HEAD_CHANNEL_CAPACITY);
        let mut subscription = match source.subscribe_new_heads(sink).await {
            Ok(subscription) => subscription,
            Err(err) => {
                yield Err(HeadWatcherError::Subscribe(err));
                return;
            }
        };

        loop {
            let next = select! {
                biased;
                header = heads.recv() => match header {
                    Some(header) => Ok(HeadSignal::from(&header)),
                    None => Err(HeadWatcherError::closed(&mut subscription)),
                },
                err = subscription.failed() => Err(
                    err.map_or(HeadWatcherError::SubscriptionClosed, HeadWatcherError::Subscription),
                ),
            };
            let done = next.is_err();
            yield next;
            if done {
                break;
            }
        }
    }
}

/// Pulls new heads from `source` and awaits `on_head` for each of them, one at a time.
///
/// No head is read while `on_head` runs, so a slow handler back-pressures the source through
/// the bounded header channel. Returns `Ok(())` once `cancellation` fires, including while a
/// handler is running, and the first source error otherwise. The subscription is released on
/// return.
pub async fn follow_head_changes<S, F, Fut>(
    cancellation: CancellationToken,
    source: S,
    mut on_head: F,
) -> Result<(), HeadWatcherError<S::Error>>
where
    S: NewHeadSource + 'static,
    F: FnMut(HeadSignal) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut heads = pin!(head_signal_stream(source));
    loop {
        let next = select! {
            biased;
            _ = cancellation.cancelled() => return Ok(()),
            next = heads.next() => next,
        };
        let Some(signal) = next.transpose()? else {
            return Err(HeadWatcherError::SubscriptionClosed);
        };
        select! {
            biased;
            _ = cancellation.cancelled() => return Ok(()),
            _ = on_head(signal) => {}
        }
    }
}
