// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Everything needed to build a store-backed pipeline, in one import.

pub use crate::mutators::{over_state, set_state, to_over_state, to_set_state, to_state};
pub use crate::{
    apply_transition, at, at_false, at_true, combine_latest_obj, derive, derive_n, filter_by,
    history, is_truthy, merge_obj, merge_obj_tracking, pass_if_down, pass_if_high, pass_if_low,
    pass_if_up, pluck, pluck_n, reject_by, render, store, try_derive, try_derive_n, try_render,
    Chan, Lens, ProjectionCache, State, Store, StreamTree, Tagged, Transition, Window,
    RENDER_DEBOUNCE,
};
pub use rxlens_stream::prelude::*;
