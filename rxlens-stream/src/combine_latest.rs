// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Combining the latest values of several streams.
//!
//! # Behavior
//!
//! - Waits until every input has emitted at least one value
//! - Afterwards emits on every input emission, carrying the latest value of each input
//! - Items are processed in arrival order (`select_all`)
//! - Errors from any input are forwarded immediately, without touching the state
//! - Completes when all inputs have completed
//!
//! # Example
//!
//! ```
//! use rxlens_core::StreamItem;
//! use rxlens_stream::CombineLatestExt;
//! use futures::{stream, StreamExt};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let a = stream::iter(vec![StreamItem::Value(1)]);
//! let b = stream::iter(vec![StreamItem::Value(10)]);
//! let mut combined = a.combine_latest(vec![b]);
//!
//! assert_eq!(combined.next().await, Some(StreamItem::Value(vec![1, 10])));
//! # }
//! ```

use futures::future::ready;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use rxlens_core::{RxStream, StreamItem};
use std::sync::Arc;

type TaggedStream<T> = std::pin::Pin<Box<dyn Stream<Item = (StreamItem<T>, usize)> + Send>>;

struct IntermediateState<T> {
    values: Vec<Option<T>>,
}

impl<T: Clone> IntermediateState<T> {
    fn new(size: usize) -> Self {
        Self {
            values: vec![None; size],
        }
    }

    fn insert(&mut self, index: usize, value: T) {
        self.values[index] = Some(value);
    }

    // `None` until every slot has been filled once
    fn snapshot(&self) -> Option<Vec<T>> {
        self.values.iter().cloned().collect()
    }
}

/// Combines the latest values of every stream in `streams`, in input order.
///
/// An empty input completes immediately.
pub fn combine_latest_all<S, T>(streams: Vec<S>) -> RxStream<Vec<T>>
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
    let tagged: Vec<TaggedStream<T>> = streams
        .into_iter()
        .enumerate()
        .map(|(index, stream)| -> TaggedStream<T> {
            Box::pin(stream.map(move |item| (item, index)))
        })
        .collect();

    let state = Arc::new(Mutex::new(IntermediateState::new(tagged.len())));

    let combined = futures::stream::select_all(tagged).filter_map(move |(item, index)| {
        let emitted = match item {
            StreamItem::Value(value) => {
                let mut guard = state.lock();
                guard.insert(index, value);
                guard.snapshot().map(StreamItem::Value)
            }
            StreamItem::Error(e) => Some(StreamItem::Error(e)),
        };
        ready(emitted)
    });

    Box::pin(combined)
}

enum Side<A, B> {
    Left(StreamItem<A>),
    Right(StreamItem<B>),
}

/// Extension trait providing the `combine_latest` operators.
pub trait CombineLatestExt<T>: Stream<Item = StreamItem<T>> + Sized
where
    T: Clone + Send + 'static,
{
    /// Combines this stream with `others` (all of the same item type).
    ///
    /// Emitted vectors hold `self`'s value first, then `others` in order.
    fn combine_latest<IS>(self, others: Vec<IS>) -> RxStream<Vec<T>>
    where
        IS: Stream<Item = StreamItem<T>> + Send + 'static;

    /// Combines this stream with one stream of a different item type.
    fn combine_latest_with<U, IS>(self, other: IS) -> RxStream<(T, U)>
    where
        IS: Stream<Item = StreamItem<U>> + Send + 'static,
        U: Clone + Send + 'static;
}

impl<S, T> CombineLatestExt<T> for S
where
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
    fn combine_latest<IS>(self, others: Vec<IS>) -> RxStream<Vec<T>>
    where
        IS: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        let mut streams: Vec<RxStream<T>> = Vec::with_capacity(others.len() + 1);
        streams.push(Box::pin(self));
        streams.extend(others.into_iter().map(|s| -> RxStream<T> { Box::pin(s) }));
        combine_latest_all(streams)
    }

    fn combine_latest_with<U, IS>(self, other: IS) -> RxStream<(T, U)>
    where
        IS: Stream<Item = StreamItem<U>> + Send + 'static,
        U: Clone + Send + 'static,
    {
        let latest: Arc<Mutex<(Option<T>, Option<U>)>> = Arc::new(Mutex::new((None, None)));

        let merged = futures::stream::select(self.map(Side::Left), other.map(Side::Right));

        let combined = merged.filter_map(move |side| {
            let mut guard = latest.lock();
            let emitted = match side {
                Side::Left(StreamItem::Value(value)) => {
                    guard.0 = Some(value);
                    pair(&guard)
                }
                Side::Right(StreamItem::Value(value)) => {
                    guard.1 = Some(value);
                    pair(&guard)
                }
                Side::Left(StreamItem::Error(e)) | Side::Right(StreamItem::Error(e)) => {
                    Some(StreamItem::Error(e))
                }
            };
            ready(emitted)
        });

        Box::pin(combined)
    }
}

fn pair<T: Clone, U: Clone>(latest: &(Option<T>, Option<U>)) -> Option<StreamItem<(T, U)>> {
    match latest {
        (Some(left), Some(right)) => Some(StreamItem::Value((left.clone(), right.clone()))),
        _ => None,
    }
}
