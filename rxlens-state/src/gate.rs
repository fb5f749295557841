// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Passing data through conditionally, based on a companion boolean stream.
//!
//! There are two ways to pair data with a gate:
//!
//! | Operators | Pairing | Gate flips alone emit |
//! |-----------|---------|-----------------------|
//! | [`filter_by`], [`reject_by`], [`pass_if_high`], [`pass_if_low`] | latest gate value when data emits | no |
//! | [`pass_if_up`], [`pass_if_down`] | combine-latest of data and gate | yes, with the last data value |
//!
//! [`at`] gates a state stream on a projection of itself.

use crate::lens::{is_truthy, Lens};
use crate::State;
use futures::Stream;
use rxlens_core::{RxStream, StreamItem};
use rxlens_stream::{CombineLatestExt, ValueStreamExt, WithLatestFromExt};
use serde_json::Value;

/// Passes data values while the latest gate value is `true`.
///
/// Data arriving before the first gate value is dropped.
pub fn filter_by<D, G, T>(data: D, gate: G) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    sampled(data, gate, true)
}

/// Passes data values while the latest gate value is `false`.
pub fn reject_by<D, G, T>(data: D, gate: G) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    sampled(data, gate, false)
}

fn sampled<D, G, T>(data: D, gate: G, pass_when: bool) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    data.with_latest_from(gate)
        .filter_value(move |(_, open)| *open == pass_when)
        .map_value(|(value, _)| value)
}

fn combined<D, G, T>(data: D, gate: G, pass_when: bool) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    data.combine_latest_with(gate)
        .filter_value(move |(_, open)| *open == pass_when)
        .map_value(|(value, _)| value)
}

/// Curried [`filter_by`]: `pass_if_high(gate)(data)`.
pub fn pass_if_high<G, D, T>(gate: G) -> impl FnOnce(D) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    move |data| sampled(data, gate, true)
}

/// Curried [`reject_by`]: `pass_if_low(gate)(data)`.
pub fn pass_if_low<G, D, T>(gate: G) -> impl FnOnce(D) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    move |data| sampled(data, gate, false)
}

/// Passes data while the gate is `true`, including the moment the gate switches
/// on, which re-emits the last data value.
pub fn pass_if_up<G, D, T>(gate: G) -> impl FnOnce(D) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    move |data| combined(data, gate, true)
}

/// Passes data while the gate is `false`, including the moment the gate switches
/// off.
pub fn pass_if_down<G, D, T>(gate: G) -> impl FnOnce(D) -> RxStream<T>
where
    D: Stream<Item = StreamItem<T>> + Send + 'static,
    G: Stream<Item = StreamItem<bool>> + Send + 'static,
    T: Clone + Send + 'static,
{
    move |data| combined(data, gate, false)
}

/// Re-emits each state whose value at `path` satisfies `predicate`.
///
/// The projection is not deduplicated: while it keeps satisfying `predicate`,
/// every emission of `data` is passed on, including those where the projected
/// value did not change. Deduplicate the input (or gate on a
/// [`view`](crate::ProjectionCache::view)) to react to projection changes only.
///
/// The trigger is a projection of the same stream, so the state and its
/// projection are always evaluated together, from a single subscription.
pub fn at<D, P>(data: D, path: impl Into<Lens>, predicate: P) -> RxStream<State>
where
    D: Stream<Item = StreamItem<State>> + Send + 'static,
    P: Fn(&Value) -> bool + Send + 'static,
{
    let lens = path.into();
    data.filter_value(move |state| predicate(&lens.get(state)))
}

/// [`at`] with a truthy projection.
pub fn at_true<D>(data: D, path: impl Into<Lens>) -> RxStream<State>
where
    D: Stream<Item = StreamItem<State>> + Send + 'static,
{
    at(data, path, is_truthy)
}

/// [`at`] with a falsy projection.
pub fn at_false<D>(data: D, path: impl Into<Lens>) -> RxStream<State>
where
    D: Stream<Item = StreamItem<State>> + Send + 'static,
{
    at(data, path, |value| !is_truthy(value))
}
