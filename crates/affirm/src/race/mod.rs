//! First-of-two combinator and the timeout built on it.
//!
//! The losing future is dropped as soon as the winner settles, which
//! releases whatever it held (timer registrations, event subscriptions).

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};
use futures::pin_mut;

/// Which of two raced futures settled first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Race<A, B> {
    First(A),
    Second(B),
}

/// Poll both futures; return the first output and drop the other future.
///
/// When both are ready on the same poll, `first` wins.
pub async fn race<A, B>(first: A, second: B) -> Race<A::Output, B::Output>
where
    A: Future,
    B: Future,
{
    pin_mut!(first);
    pin_mut!(second);
    match future::select(first, second).await {
        Either::Left((output, _)) => Race::First(output),
        Either::Right((output, _)) => Race::Second(output),
    }
}

/// A deadline passed before the future settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("timed out after {}ms", .0.as_millis())]
pub struct Elapsed(pub Duration);

/// Await `future` for at most `limit`.
///
/// # Errors
///
/// `Elapsed` when the timer fires first; `future` is dropped.
pub async fn within<F: Future>(limit: Duration, future: F) -> Result<F::Output, Elapsed> {
    match race(future, tokio::time::sleep(limit)).await {
        Race::First(output) => Ok(output),
        Race::Second(()) => Err(Elapsed(limit)),
    }
}
