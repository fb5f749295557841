// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sub-state streams derived through lenses.
//!
//! - [`pluck`] / [`pluck_n`] build a fresh shared projection on every call; it has
//!   no replay and does not deduplicate.
//! - [`ProjectionCache::view`] / [`ProjectionCache::view_n`] deduplicate consecutive
//!   equal values, replay the latest value, and are built once per path: asking the
//!   same cache for the same path again returns the same [`SharedStream`], so a path
//!   has one upstream subscription and one lens read per state no matter how many
//!   subscribers it has.

use crate::lens::Lens;
use crate::State;
use futures::Stream;
use parking_lot::Mutex;
use rxlens_core::StreamItem;
use rxlens_stream::{DistinctUntilChangedExt, ShareExt, SharedStream, ValueStreamExt};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Projects every state of `source` through `path`.
pub fn pluck<S>(source: S, path: impl Into<Lens>) -> SharedStream<Value>
where
    S: Stream<Item = StreamItem<State>> + Send + 'static,
{
    let lens = path.into();
    source.map_value(move |state| lens.get(&state)).share()
}

/// Projects every state of `source` through each of `paths`, in order.
pub fn pluck_n<S, I, P>(source: S, paths: I) -> SharedStream<Vec<Value>>
where
    S: Stream<Item = StreamItem<State>> + Send + 'static,
    I: IntoIterator<Item = P>,
    P: Into<Lens>,
{
    let lenses = collect_lenses(paths);
    source.map_value(move |state| read_all(&lenses, &state)).share()
}

fn collect_lenses<I, P>(paths: I) -> Vec<Lens>
where
    I: IntoIterator<Item = P>,
    P: Into<Lens>,
{
    paths.into_iter().map(Into::into).collect()
}

fn read_all(lenses: &[Lens], state: &State) -> Vec<Value> {
    lenses.iter().map(|lens| lens.get(state)).collect()
}

/// Memoized projections of one state stream.
///
/// Owned by a [`Store`](crate::Store); two caches never share projections.
pub struct ProjectionCache {
    source: SharedStream<State>,
    views: Mutex<HashMap<Lens, SharedStream<Value>>>,
    multi_views: Mutex<HashMap<Vec<Lens>, SharedStream<Vec<Value>>>>,
    computations: Arc<AtomicUsize>,
}

impl ProjectionCache {
    #[must_use]
    pub fn new(source: SharedStream<State>) -> Self {
        Self {
            source,
            views: Mutex::new(HashMap::new()),
            multi_views: Mutex::new(HashMap::new()),
            computations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The state stream the projections are built on.
    #[must_use]
    pub fn source(&self) -> &SharedStream<State> {
        &self.source
    }

    /// Returns the projection at `path`, building it on first use.
    pub fn view(&self, path: impl Into<Lens>) -> SharedStream<Value> {
        let lens = path.into();
        let mut views = self.views.lock();
        if let Some(existing) = views.get(&lens) {
            debug!("view cache hit for '{}'", lens);
            return existing.clone();
        }

        debug!("view cache miss for '{}', subscribing", lens);
        let getter = lens.clone();
        let computations = Arc::clone(&self.computations);
        let view = self
            .source
            .to_stream()
            .map_value(move |state| {
                computations.fetch_add(1, Ordering::Relaxed);
                getter.get(&state)
            })
            .distinct_until_changed()
            .share_replay();
        views.insert(lens, view.clone());
        view
    }

    /// Returns the projection at `paths`, building it on first use.
    ///
    /// The cache key is the ordered list of paths.
    pub fn view_n<I, P>(&self, paths: I) -> SharedStream<Vec<Value>>
    where
        I: IntoIterator<Item = P>,
        P: Into<Lens>,
    {
        let lenses = collect_lenses(paths);
        let mut views = self.multi_views.lock();
        if let Some(existing) = views.get(&lenses) {
            debug!("view_n cache hit for {} path(s)", lenses.len());
            return existing.clone();
        }

        debug!("view_n cache miss for {} path(s), subscribing", lenses.len());
        let getters = lenses.clone();
        let computations = Arc::clone(&self.computations);
        let view = self
            .source
            .to_stream()
            .map_value(move |state| {
                computations.fetch_add(1, Ordering::Relaxed);
                read_all(&getters, &state)
            })
            .distinct_until_changed()
            .share_replay();
        views.insert(lenses, view.clone());
        view
    }

    /// Number of distinct projections built so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.lock().len() + self.multi_views.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of times any cached projection has been computed from a state.
    ///
    /// Grows by one per state per projection, independent of subscriber count.
    #[must_use]
    pub fn computations(&self) -> usize {
        self.computations.load(Ordering::Relaxed)
    }
}

/// [`ProjectionCache::view`] as a free function.
pub fn view(cache: &ProjectionCache, path: impl Into<Lens>) -> SharedStream<Value> {
    cache.view(path)
}

/// [`ProjectionCache::view_n`] as a free function.
pub fn view_n<I, P>(cache: &ProjectionCache, paths: I) -> SharedStream<Vec<Value>>
where
    I: IntoIterator<Item = P>,
    P: Into<Lens>,
{
    cache.view_n(paths)
}
