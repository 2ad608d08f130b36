//! [NodeActor] trait.

use async_trait::async_trait;
use tokio_util::sync::WaitForCancellationFuture;

/// The context an actor runs with, carrying its cancellation signal.
pub trait CancellableContext: Send {
    /// Returns a future that resolves when the actor is cancelled.
    fn cancelled(&self) -> WaitForCancellationFuture<'_>;
}

/// A long-lived service task of the node.
///
/// An actor is built from its configuration, handing back the handles other tasks use to talk
/// to it, and then runs until it finishes, fails or is cancelled through its context.
#[async_trait]
pub trait NodeActor: Send + 'static {
    /// The error type for the actor.
    type Error: std::fmt::Debug;
    /// The context the actor runs with.
    type OutboundData: CancellableContext;
    /// The handles used by other tasks to reach the actor.
    type InboundData: Sized;
    /// The configuration needed to build the actor.
    type Builder;

    /// Builds the actor.
    fn build(builder: Self::Builder) -> (Self::InboundData, Self);

    /// Starts the actor.
    async fn start(self, context: Self::OutboundData) -> Result<(), Self::Error>;
}
