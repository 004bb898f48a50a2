//! # featloc
//!
//! Umbrella crate for the featloc workspace. Each member is re-exported behind a cargo feature
//! of the same name:
//!
//! - `core`: location algebra, regions, the location grammar and annotation values
//! - `io`: qualifier and feature-table record grammars
//! - `edit`: sequence edits that keep feature locations in step with the bytes
//!
#[cfg(feature = "core")]
#[doc(inline)]
pub use featloc_core as core;

#[cfg(feature = "io")]
#[doc(inline)]
pub use featloc_io as io;

#[cfg(feature = "edit")]
#[doc(inline)]
pub use featloc_edit as edit;
