//! # Feature locations on biological sequences.
//!
//! This crate holds the value types used to describe where an annotation sits on a
//! sequence, and the arithmetic that keeps those values consistent when the
//! underlying sequence is edited:
//!
//! - [`Location`]: points, junctions, ranges with partial ends, ambiguous positions,
//!   and their complemented, joined and ordered composites
//! - [`Region`]: directional spans with signed resize operators
//! - the GenBank location grammar ([`parser`]), rendered through `Display`
//! - plain [`Qualifier`], [`Feature`] and [`Sequence`] values for the record layer
//!
//! # Example
//!
//! ```
//! use featloc_core::models::Location;
//!
//! let loc: Location = "join(1..2,4..5)".parse().unwrap();
//! assert_eq!(loc.len(), 4);
//! assert_eq!(loc.reverse(10).to_string(), "join(6..7,9..10)");
//! ```
pub mod errors;
pub mod models;
pub mod parser;
pub mod utils;

// re-exports
pub use errors::*;
pub use models::*;
pub use parser::{MAX_NESTING, parse_location_prefix};
