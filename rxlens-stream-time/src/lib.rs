// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based operators for rxlens streams, driven by the tokio timer.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod debounce;

pub use self::debounce::DebounceExt;

pub mod prelude {
    pub use crate::debounce::DebounceExt;
}
