//! # Sequence edits that carry their annotations along.
//!
//! Every operation takes an immutable [`Sequence`](featloc_core::models::Sequence) and returns
//! a new one whose feature locations still point at the same bases. Inserted material either
//! splits the features it lands in or extends them, deleted material collapses features to
//! junction markers, and reversing or rotating the bytes moves every location with them.
//!
//! [`Locate`] goes the other way: it extracts the bases addressed by a location or region as a
//! sequence of its own.
//!
//! ```
//! use featloc_core::models::{Feature, FeatureTable, Location, Sequence};
//! use featloc_edit::SequenceEdit;
//!
//! let source = Feature::new("source", Location::range(0, 8).unwrap());
//! let seq = Sequence::new((), FeatureTable::from(vec![source]), "atgcatgc");
//!
//! let edited = seq.delete(2, 4).unwrap();
//! assert_eq!(edited.bytes(), b"atgc");
//! assert_eq!(edited.features().features[0].location.to_string(), "1..4");
//! ```
//!
pub mod edit;
pub mod error;
pub mod locate;

pub use edit::*;
pub use error::*;
pub use locate::*;
