// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turning events into store transitions.
//!
//! Every mutator is curried: `mutator(path, ...)` returns a function from an event
//! stream to a stream of [`Transition`]s that a [`Store`](crate::Store) can consume.
//!
//! ```
//! use rxlens_state::{mutators::to_over_state, Store};
//! use rxlens_test_utils::test_channel;
//! use futures::StreamExt;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, clicks) = test_channel();
//! let add = to_over_state("count", |step: &i64, count| json!(count.as_i64().unwrap_or(0) + step));
//! let store = Store::new(json!({ "count": 0 }), add(clicks));
//! let mut counts = store.view("count").to_stream();
//!
//! tx.send(5).unwrap();
//! assert_eq!(counts.next().await.unwrap().unwrap(), json!(0));
//! assert_eq!(counts.next().await.unwrap().unwrap(), json!(5));
//! # }
//! ```

use crate::lens::Lens;
use crate::transition::Transition;
use futures::{Stream, StreamExt};
use rxlens_core::{RxError, RxStream, StreamItem};
use rxlens_stream::ValueStreamExt;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

fn set_to(lens: Lens, value: Value) -> Transition {
    Transition::new(move |state| lens.set(state, value.clone()))
}

/// Event `e` becomes `state ↦ over(path, |sub| f(&e, sub), state)`.
pub fn to_over_state<S, E, F>(path: impl Into<Lens>, f: F) -> impl FnOnce(S) -> RxStream<Transition>
where
    S: Stream<Item = StreamItem<E>> + Send + 'static,
    E: Send + Sync + 'static,
    F: Fn(&E, Value) -> Value + Send + Sync + 'static,
{
    let lens = path.into();
    let f = Arc::new(f);
    move |events: S| {
        events.map_value(move |event| {
            let lens = lens.clone();
            let f = Arc::clone(&f);
            Transition::new(move |state| lens.over(state, |focused| f(&event, focused)))
        })
    }
}

/// Event `e` becomes `state ↦ set(path, e, state)`, with `e` serialized to JSON.
///
/// An event that fails to serialize becomes an [`RxError::UserError`] item, which
/// stops a store fed by this stream.
pub fn to_set_state<S, E>(path: impl Into<Lens>) -> impl FnOnce(S) -> RxStream<Transition>
where
    S: Stream<Item = StreamItem<E>> + Send + 'static,
    E: Serialize + Send + 'static,
{
    let lens = path.into();
    move |events: S| {
        let transitions = events.map(move |item| {
            item.and_then(|event| match serde_json::to_value(&event) {
                Ok(value) => StreamItem::Value(set_to(lens.clone(), value)),
                Err(e) => StreamItem::Error(RxError::user_error(e)),
            })
        });
        Box::pin(transitions) as RxStream<Transition>
    }
}

/// Event `e` becomes `state ↦ set(path, f(&e), state)`; `f` runs once per event.
pub fn to_state<S, E, F>(path: impl Into<Lens>, mut f: F) -> impl FnOnce(S) -> RxStream<Transition>
where
    S: Stream<Item = StreamItem<E>> + Send + 'static,
    E: Send + 'static,
    F: FnMut(&E) -> Value + Send + 'static,
{
    let lens = path.into();
    move |events: S| events.map_value(move |event| set_to(lens.clone(), f(&event)))
}

/// Each incoming function `f` becomes `state ↦ over(path, f, state)`.
pub fn over_state<S, F>(path: impl Into<Lens>) -> impl FnOnce(S) -> RxStream<Transition>
where
    S: Stream<Item = StreamItem<F>> + Send + 'static,
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    let lens = path.into();
    move |functions: S| {
        functions.map_value(move |f| {
            let lens = lens.clone();
            Transition::new(move |state| lens.over(state, &f))
        })
    }
}

/// Each incoming value `v` becomes `state ↦ set(path, v, state)`.
pub fn set_state<S>(path: impl Into<Lens>) -> impl FnOnce(S) -> RxStream<Transition>
where
    S: Stream<Item = StreamItem<Value>> + Send + 'static,
{
    let lens = path.into();
    move |values: S| values.map_value(move |value| set_to(lens.clone(), value))
}
