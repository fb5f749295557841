// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # rxlens
//!
//! Reactive, lens-based state management over async streams.
//!
//! ## Overview
//!
//! An application keeps its state in a single [`Store`]: an immutable JSON tree
//! that only changes through [`Transition`]s folded one at a time. Everything
//! else is a stream built on the canonical state stream:
//!
//! - **Projections**: [`Store::view`] focuses a [`Lens`] path, deduplicated and memoized
//! - **Derivations**: [`derive_n`] combines several streams through a pure function
//! - **Gates**: [`filter_by`], [`pass_if_up`], [`at_true`] and friends
//! - **Time**: [`history`] windows and debounced [`render`]s
//!
//! Events come in through a [`Chan`] or any stream, and [`mutators`] turn them into
//! transitions, closing the loop.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlens::prelude::*;
//! use rxlens::mutators::to_over_state;
//! use futures::StreamExt;
//! use serde_json::{json, Value};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let clicks: Chan<i64, i64> = Chan::new(|events| events);
//! let add = to_over_state("count", |step: &i64, count: Value| {
//!     json!(count.as_i64().unwrap_or(0) + step)
//! });
//!
//! let store = Store::new(json!({ "count": 0 }), add(clicks.output().to_stream()));
//! let mut count = store.view("count").to_stream();
//! assert_eq!(count.next().await, Some(StreamItem::Value(json!(0))));
//!
//! clicks.call(2).unwrap();
//! assert_eq!(count.next().await, Some(StreamItem::Value(json!(2))));
//! # }
//! ```

pub mod receiver_ext;

pub use rxlens_core::{
    CancellationToken, IntoRxError, Result, RxError, RxStream, RxSubject, RxTask, StreamItem,
    SubjectError,
};
pub use rxlens_state::*;
pub use rxlens_stream::{
    combine_latest_all, merge_all, CombineLatestExt, DistinctUntilChangedExt, ShareExt,
    SharedStream, ValueStreamExt, WithLatestFromExt,
};
pub use rxlens_stream_time::DebounceExt;

pub use self::receiver_ext::UnboundedReceiverExt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::receiver_ext::UnboundedReceiverExt;
    pub use rxlens_state::prelude::*;
    pub use rxlens_stream_time::prelude::*;
}
