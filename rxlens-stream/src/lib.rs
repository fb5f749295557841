// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Stream primitives for rxlens.
//!
//! Every operator consumes and produces streams of [`StreamItem<T>`](rxlens_core::StreamItem):
//! values are transformed, errors are forwarded untouched.
//!
//! ## Operator Categories
//!
//! ### Sharing
//!
//! - **[`share`](ShareExt::share)** / **[`share_replay`](ShareExt::share_replay)**: turn a
//!   cold stream into a hot [`SharedStream`] consumed once by a background task
//!
//! ### Combination
//!
//! - **[`combine_latest`](CombineLatestExt::combine_latest)** / [`combine_latest_all`]:
//!   latest value of every input, once all inputs have emitted
//! - **[`combine_latest_with`](CombineLatestExt::combine_latest_with)**: the same for two
//!   streams of different types
//! - **[`with_latest_from`](WithLatestFromExt::with_latest_from)**: sample a secondary stream
//!   when the primary emits
//! - **[`merge_all`]**: arrival-order merge
//!
//! ### Filtering & Transformation
//!
//! - **[`distinct_until_changed`](DistinctUntilChangedExt::distinct_until_changed)**
//! - **[`map_value`](ValueStreamExt::map_value)** / **[`filter_value`](ValueStreamExt::filter_value)**

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod combine_latest;
pub mod distinct_until_changed;
pub mod merge_all;
pub mod prelude;
pub mod share;
pub mod value_ops;
pub mod with_latest_from;

pub use self::combine_latest::{combine_latest_all, CombineLatestExt};
pub use self::distinct_until_changed::DistinctUntilChangedExt;
pub use self::merge_all::merge_all;
pub use self::share::{ShareExt, SharedStream};
pub use self::value_ops::ValueStreamExt;
pub use self::with_latest_from::WithLatestFromExt;
