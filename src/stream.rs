//! The single consumable stream every fetch hands back. Producer tasks
//! feed it through a bounded channel, so a slow consumer stalls fetching
//! instead of growing a buffer.

use crate::error::NoaaError;
use crate::types::observation::Observation;
use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc::{self, Receiver, Sender};

pub(crate) const OBSERVATION_CHANNEL_CAPACITY: usize = 10;

/// An ordered stream of [`Observation`]s from one fetch.
///
/// Yields observations until all producers finish, or until a failure is
/// reached, in which case the final item is the single `Err` describing
/// it. Dropping the stream cancels the fetch: producers stop as soon as
/// their next send fails.
///
/// Implements [`futures_util::Stream`], so it composes with `StreamExt`
/// combinators, or it can be drained directly with [`ObservationStream::recv`].
pub struct ObservationStream {
    receiver: Receiver<Result<Observation, NoaaError>>,
}

impl ObservationStream {
    /// Creates the bounded channel backing one fetch, returning the sender
    /// half for the producer tasks.
    pub(crate) fn channel() -> (Sender<Result<Observation, NoaaError>>, Self) {
        let (sender, receiver) = mpsc::channel(OBSERVATION_CHANNEL_CAPACITY);
        (sender, Self { receiver })
    }

    /// Receives the next observation, or `None` once the stream is closed.
    pub async fn recv(&mut self) -> Option<Result<Observation, NoaaError>> {
        self.receiver.recv().await
    }
}

impl Stream for ObservationStream {
    type Item = Result<Observation, NoaaError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
