//! # Text record grammars for annotated sequences.
//!
//! This crate reads and writes the column-oriented text records used by GenBank-style feature
//! tables: wrapped `/key=value` qualifier records, and whole feature records made of a key, a
//! location and their qualifiers. The column layout is configurable and can be loaded from a
//! TOML file.
//!
//! ```
//! use featloc_io::{FeatureFormat, QualifierFormat};
//!
//! let qualifier = QualifierFormat::new(0, 80).parse("/gene=\"dnaA\"").unwrap();
//! assert_eq!(qualifier.text(), Some("dnaA"));
//!
//! let feature = FeatureFormat::default().parse("     gene            complement(3..9)").unwrap();
//! assert_eq!(feature.location.len(), 7);
//! ```
//!
pub mod config;
pub mod error;
pub mod feature;
pub mod qualifier;

// re-expose core functions
pub use config::*;
pub use error::*;
pub use feature::*;
pub use qualifier::*;
