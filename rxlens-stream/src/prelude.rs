// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Brings every operator extension trait into scope.
//!
//! ```
//! use rxlens_stream::prelude::*;
//! ```

pub use crate::combine_latest::{combine_latest_all, CombineLatestExt};
pub use crate::distinct_until_changed::DistinctUntilChangedExt;
pub use crate::merge_all::merge_all;
pub use crate::share::{ShareExt, SharedStream};
pub use crate::value_ops::ValueStreamExt;
pub use crate::with_latest_from::WithLatestFromExt;
pub use rxlens_core::{RxError, RxStream, StreamItem};
