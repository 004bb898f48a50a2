#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::models::location::Location;
use crate::models::qualifier::Qualifiers;

/// An annotated location on a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feature {
    pub key: String,
    pub location: Location,
    pub qualifiers: Qualifiers,
    /// Disambiguates features that share a key and a location.
    pub order: Option<usize>,
}

impl Feature {
    pub fn new(key: impl Into<String>, location: Location) -> Self {
        Feature {
            key: key.into(),
            location,
            qualifiers: Qualifiers::new(),
            order: None,
        }
    }

    pub fn with_qualifiers(self, qualifiers: Qualifiers) -> Self {
        Feature { qualifiers, ..self }
    }

    pub fn with_order(self, order: usize) -> Self {
        Feature {
            order: Some(order),
            ..self
        }
    }

    /// The same feature at another location.
    pub fn relocated(&self, location: Location) -> Self {
        Feature {
            key: self.key.clone(),
            location,
            qualifiers: self.qualifiers.clone(),
            order: self.order,
        }
    }
}

///
/// Ordered list of features belonging to one sequence.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureTable {
    pub features: Vec<Feature>,
}

impl FeatureTable {
    pub fn new() -> Self {
        FeatureTable {
            features: Vec::new(),
        }
    }

    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Stable sort by position. Features at the same position sort by order
    /// index, unindexed first.
    pub fn sorted(&self) -> FeatureTable {
        let mut features = self.features.clone();
        features.sort_by(|a, b| {
            a.location
                .cmp_position(&b.location)
                .then_with(|| a.order.cmp(&b.order))
        });
        FeatureTable { features }
    }

    /// Features whose key equals `key`, in table order.
    pub fn filter_key(&self, key: &str) -> FeatureTable {
        self.features
            .iter()
            .filter(|f| f.key == key)
            .cloned()
            .collect()
    }
}

impl From<Vec<Feature>> for FeatureTable {
    fn from(features: Vec<Feature>) -> Self {
        FeatureTable { features }
    }
}

impl FromIterator<Feature> for FeatureTable {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        FeatureTable {
            features: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FeatureTable {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

impl<'a> IntoIterator for &'a FeatureTable {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
