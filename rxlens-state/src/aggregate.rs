// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Merging and combining named sets of streams.

use futures::Stream;
use rxlens_core::{RxStream, StreamItem};
use rxlens_stream::{combine_latest_all, merge_all, ValueStreamExt};
use std::collections::BTreeMap;

/// A tree of named streams.
///
/// [`flatten`](Self::flatten) turns it into a flat list keyed by dotted paths, so
/// `Group([("user", Group([("name", s)]))])` yields `("user.name", s)`.
pub enum StreamTree<T> {
    Stream(RxStream<T>),
    Group(Vec<(String, StreamTree<T>)>),
}

impl<T: Send + 'static> StreamTree<T> {
    pub fn leaf<S>(stream: S) -> Self
    where
        S: Stream<Item = StreamItem<T>> + Send + 'static,
    {
        Self::Stream(Box::pin(stream))
    }

    pub fn group<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, StreamTree<T>)>,
        K: Into<String>,
    {
        Self::Group(
            entries
                .into_iter()
                .map(|(key, tree)| (key.into(), tree))
                .collect(),
        )
    }

    /// Depth-first list of `(dotted key, stream)` pairs. A bare root stream gets the
    /// empty key.
    #[must_use]
    pub fn flatten(self) -> Vec<(String, RxStream<T>)> {
        let mut out = Vec::new();
        self.flatten_into(&mut Vec::new(), &mut out);
        out
    }

    fn flatten_into(self, prefix: &mut Vec<String>, out: &mut Vec<(String, RxStream<T>)>) {
        match self {
            Self::Stream(stream) => out.push((prefix.join("."), stream)),
            Self::Group(entries) => {
                for (key, tree) in entries {
                    prefix.push(key);
                    tree.flatten_into(prefix, out);
                    prefix.pop();
                }
            }
        }
    }
}

/// An emission tagged with the key of the stream it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<T> {
    pub key: String,
    pub data: T,
}

/// Merges every stream in `tree`, in arrival order, discarding the names.
pub fn merge_obj<T: Send + 'static>(tree: StreamTree<T>) -> RxStream<T> {
    let streams: Vec<RxStream<T>> = tree.flatten().into_iter().map(|(_, s)| s).collect();
    merge_all(streams)
}

/// Merges the named streams, tagging each value with its key.
pub fn merge_obj_tracking<I, K, S, T>(named: I) -> RxStream<Tagged<T>>
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Send + 'static,
{
    let tagged: Vec<RxStream<Tagged<T>>> = named
        .into_iter()
        .map(|(key, stream)| {
            let key = key.into();
            stream.map_value(move |data| Tagged {
                key: key.clone(),
                data,
            })
        })
        .collect();
    merge_all(tagged)
}

/// Once every named stream has emitted, emits a fresh key to latest value map on
/// each emission.
///
/// An empty set of streams completes immediately.
pub fn combine_latest_obj<I, K, S, T>(named: I) -> RxStream<BTreeMap<String, T>>
where
    I: IntoIterator<Item = (K, S)>,
    K: Into<String>,
    S: Stream<Item = StreamItem<T>> + Send + 'static,
    T: Clone + Send + 'static,
{
    let (keys, streams): (Vec<String>, Vec<S>) = named
        .into_iter()
        .map(|(key, stream)| (key.into(), stream))
        .unzip();

    combine_latest_all(streams)
        .map_value(move |values| keys.iter().cloned().zip(values).collect())
}
