// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub use docmodel_core::*;
pub use docmodel_derive_impl::Document;

/// Convenient re-exports, including the derive.
///
/// ```rust,ignore
/// use docmodel::prelude::*;
/// ```
pub mod prelude {
    pub use docmodel_core::prelude::*;
    pub use docmodel_derive_impl::Document;
}
