pub mod feature;
pub mod location;
pub mod qualifier;
pub mod region;
pub mod sequence;

// re-export for cleaner imports
pub use self::feature::{Feature, FeatureTable};
pub use self::location::{Ambiguous, Location, Partial, Ranged};
pub use self::qualifier::{Layout, Qualifier, QualifierValue, Qualifiers};
pub use self::region::{Modifier, Region, Segment};
pub use self::sequence::Sequence;
