// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The single-writer fold that owns a state root.
//!
//! A store consumes a stream of [`Transition`]s and produces the canonical state
//! stream:
//!
//! - transitions are applied one at a time, in the order they arrive
//! - a transition whose result equals the current state emits nothing
//! - the stream replays its latest state to every new subscriber, starting with
//!   the seed, which is available synchronously
//! - the first error (arity violation, failing transition, upstream error) is
//!   emitted as the last item and stops the store
//!
//! ```
//! use rxlens_state::{Store, Transition};
//! use rxlens_test_utils::test_channel;
//! use futures::StreamExt;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let (tx, updates) = test_channel();
//! let store = Store::new(json!({ "count": 0 }), updates);
//! let mut states = store.subscribe();
//!
//! tx.send(Transition::new(|_| json!({ "count": 1 }))).unwrap();
//!
//! assert_eq!(states.next().await.unwrap().unwrap(), json!({ "count": 0 }));
//! assert_eq!(states.next().await.unwrap().unwrap(), json!({ "count": 1 }));
//! # }
//! ```

use crate::lens::Lens;
use crate::projection::{self, ProjectionCache};
use crate::transition::{apply_transition, Transition};
use crate::State;
use futures::{stream, Stream, StreamExt};
use rxlens_core::{RxStream, StreamItem};
use rxlens_stream::SharedStream;
use serde_json::Value;

/// Folds `updates` over `seed` into a hot, replaying canonical state stream.
///
/// Works for any state type with value equality; [`Store`] adds lens
/// projections for [`State`] trees.
pub fn store<S, U>(seed: S, updates: U) -> SharedStream<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    U: Stream<Item = StreamItem<Transition<S>>> + Send + 'static,
{
    SharedStream::replay_seeded(fold_transitions(seed.clone(), updates), seed)
}

/// The fold behind [`store`], without the sharing.
///
/// Emits each state that differs from its predecessor. The first error item is
/// the last item: the stream ends right after it, without waiting on `updates`.
pub fn fold_transitions<S, U>(seed: S, updates: U) -> RxStream<S>
where
    S: Clone + PartialEq + Send + Sync + 'static,
    U: Stream<Item = StreamItem<Transition<S>>> + Send + 'static,
{
    // `None` once an error has been emitted
    let initial = (Box::pin(updates), Some(seed));

    let folded = stream::unfold(initial, |(mut updates, current)| async move {
        let mut state = current?;
        loop {
            match updates.next().await? {
                StreamItem::Value(transition) => match apply_transition(state.clone(), &transition) {
                    Ok(next) if next == state => {}
                    Ok(next) => {
                        state = next.clone();
                        return Some((StreamItem::Value(next), (updates, Some(state))));
                    }
                    Err(e) => {
                        error!("store stopped, transition failed: {}", e);
                        return Some((StreamItem::Error(e), (updates, None)));
                    }
                },
                StreamItem::Error(e) => {
                    error!("store stopped by upstream error: {}", e);
                    return Some((StreamItem::Error(e), (updates, None)));
                }
            }
        }
    });

    Box::pin(folded)
}

/// A store over a [`State`] tree, with its own projection cache.
pub struct Store {
    states: SharedStream<State>,
    projections: ProjectionCache,
}

impl Store {
    /// Starts folding `updates` over `seed`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new<U>(seed: State, updates: U) -> Self
    where
        U: Stream<Item = StreamItem<Transition>> + Send + 'static,
    {
        let states = store(seed, updates);
        let projections = ProjectionCache::new(states.clone());
        Self {
            states,
            projections,
        }
    }

    /// The canonical state stream.
    #[must_use]
    pub fn state_stream(&self) -> &SharedStream<State> {
        &self.states
    }

    /// Subscribes to the canonical state stream, starting with the current state.
    #[must_use]
    pub fn subscribe(&self) -> RxStream<State> {
        self.states.to_stream()
    }

    /// The most recently emitted state.
    #[must_use]
    pub fn snapshot(&self) -> State {
        self.states.latest().unwrap_or(Value::Null)
    }

    /// Memoized, deduplicated, replaying projection at `path`.
    pub fn view(&self, path: impl Into<Lens>) -> SharedStream<Value> {
        self.projections.view(path)
    }

    /// Memoized, deduplicated, replaying projection at several paths.
    pub fn view_n<I, P>(&self, paths: I) -> SharedStream<Vec<Value>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Lens>,
    {
        self.projections.view_n(paths)
    }

    /// Fresh, non-replaying projection at `path`.
    pub fn pluck(&self, path: impl Into<Lens>) -> SharedStream<Value> {
        projection::pluck(self.subscribe(), path)
    }

    /// Fresh, non-replaying projection at several paths.
    pub fn pluck_n<I, P>(&self, paths: I) -> SharedStream<Vec<Value>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Lens>,
    {
        projection::pluck_n(self.subscribe(), paths)
    }

    #[must_use]
    pub fn projections(&self) -> &ProjectionCache {
        &self.projections
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("states", &self.states)
            .field("views", &self.projections.len())
            .finish()
    }
}
