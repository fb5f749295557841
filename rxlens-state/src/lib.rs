// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Lens-based state management over rxlens streams.
//!
//! # Data flow
//!
//! ```text
//! events ──► mutators ──► Store (fold) ──► canonical state ──► views / derivations / gates
//!   ▲                                                                 │
//!   └──────────────────────────── Chan ◄──────────────────────────────┘
//! ```
//!
//! - [`Lens`]: pure get / set / over on a [`State`] tree
//! - [`Transition`] + [`apply_transition`]: the only way state changes
//! - [`Store`] / [`store`]: serialized fold of transitions into one deduplicated,
//!   replaying state stream
//! - [`projection`]: [`pluck`](projection::pluck) and memoized [`view`](Store::view)s
//! - [`derive`](derive()) / [`derive_n`]: glitch-free computed values, with fallible
//!   [`try_derive`] / [`try_derive_n`] forms
//! - [`aggregate`]: `merge_obj`, `merge_obj_tracking`, `combine_latest_obj`
//! - [`gate`]: boolean gating of data streams
//! - [`history`](history()): sliding windows of past values
//! - [`render`](render()): one output per settled batch of changes
//! - [`mutators`]: events to transitions
//! - [`Chan`]: a callable event source with an attached pipeline

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
#[macro_use]
mod logging;
pub mod aggregate;
pub mod chan;
pub mod derive;
pub mod gate;
pub mod history;
pub mod lens;
pub mod mutators;
pub mod prelude;
pub mod projection;
pub mod render;
pub mod store;
pub mod transition;

/// The state tree: an immutable JSON value, `Null` standing for absence.
pub type State = serde_json::Value;

pub use self::aggregate::{combine_latest_obj, merge_obj, merge_obj_tracking, StreamTree, Tagged};
pub use self::chan::Chan;
pub use self::derive::{derive, derive_n, try_derive, try_derive_n};
pub use self::gate::{
    at, at_false, at_true, filter_by, pass_if_down, pass_if_high, pass_if_low, pass_if_up,
    reject_by,
};
pub use self::history::{history, Window};
pub use self::lens::{is_truthy, Lens, MAX_ARRAY_PADDING};
pub use self::projection::{pluck, pluck_n, view, view_n, ProjectionCache};
pub use self::render::{render, try_render, RENDER_DEBOUNCE};
pub use self::store::{fold_transitions, store, Store};
pub use self::transition::{apply_transition, Transition};
