// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Values computed from other streams.
//!
//! A derivation waits until every input has emitted, recomputes on every input
//! emission, drops results equal to the previous one, and replays its latest
//! result to new subscribers.
//!
//! The `try_` forms take a fallible function: its first error is emitted as an
//! [`RxError::UserError`] item and ends the derivation for every subscriber.

use futures::{Stream, StreamExt};
use rxlens_core::{RxError, StreamItem};
use rxlens_stream::{
    combine_latest_all, DistinctUntilChangedExt, ShareExt, SharedStream, ValueStreamExt,
};

/// Combines the latest values of `streams` through `combine`.
///
/// ```
/// use rxlens_state::derive_n;
/// use rxlens_test_utils::{test_channel, unwrap_value};
/// use futures::StreamExt;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tx_a, a) = test_channel();
/// let (tx_b, b) = test_channel();
/// let sum = derive_n(vec![a, b], |values: &[i32]| values.iter().sum::<i32>());
/// let mut sums = sum.to_stream();
///
/// tx_a.send(1).unwrap();
/// tx_b.send(10).unwrap();
/// assert_eq!(unwrap_value(sums.next().await), 11);
/// # }
/// ```
pub fn derive_n<S, T, Out, F>(streams: Vec<S>, combine: F) -> SharedStream<Out>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
    Out: Clone + PartialEq + Send + 'static,
    F: Fn(&[T]) -> Out + Send + 'static,
{
    combine_latest_all(streams)
        .map_value(move |values| combine(&values))
        .distinct_until_changed()
        .share_replay()
}

/// Single-input form of [`derive_n`].
pub fn derive<S, T, Out, F>(stream: S, f: F) -> SharedStream<Out>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
    Out: Clone + PartialEq + Send + 'static,
    F: FnMut(T) -> Out + Send + 'static,
{
    stream.map_value(f).distinct_until_changed().share_replay()
}

fn user_result<Out, E>(result: Result<Out, E>) -> StreamItem<Out>
where
    E: std::error::Error + Send + Sync + 'static,
{
    match result {
        Ok(value) => StreamItem::Value(value),
        Err(e) => StreamItem::Error(RxError::user_error(e)),
    }
}

/// [`derive_n`] with a fallible `combine`.
pub fn try_derive_n<S, T, Out, E, F>(streams: Vec<S>, combine: F) -> SharedStream<Out>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
    Out: Clone + PartialEq + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: Fn(&[T]) -> Result<Out, E> + Send + 'static,
{
    combine_latest_all(streams)
        .map(move |item| item.and_then(|values| user_result(combine(&values))))
        .distinct_until_changed()
        .share_replay()
}

/// [`derive`] with a fallible `f`.
pub fn try_derive<S, T, Out, E, F>(stream: S, mut f: F) -> SharedStream<Out>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
    Out: Clone + PartialEq + Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: FnMut(T) -> Result<Out, E> + Send + 'static,
{
    stream
        .map(move |item| item.and_then(|value| user_result(f(value))))
        .distinct_until_changed()
        .share_replay()
}
