#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::models::feature::FeatureTable;

///
/// An immutable sequence snapshot: opaque metadata, a feature table and the
/// sequence bytes.
///
/// The `with_*` builders consume the value and return a new one; nothing
/// mutates a sequence in place.
///
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sequence<M = ()> {
    info: M,
    features: FeatureTable,
    bytes: Vec<u8>,
}

impl<M> Sequence<M> {
    pub fn new(info: M, features: FeatureTable, bytes: impl Into<Vec<u8>>) -> Self {
        Sequence {
            info,
            features,
            bytes: bytes.into(),
        }
    }

    pub fn info(&self) -> &M {
        &self.info
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn with_info<N>(self, info: N) -> Sequence<N> {
        Sequence {
            info,
            features: self.features,
            bytes: self.bytes,
        }
    }

    pub fn with_features(self, features: FeatureTable) -> Self {
        Sequence { features, ..self }
    }

    pub fn with_bytes(self, bytes: impl Into<Vec<u8>>) -> Self {
        Sequence {
            bytes: bytes.into(),
            ..self
        }
    }

    pub fn into_parts(self) -> (M, FeatureTable, Vec<u8>) {
        (self.info, self.features, self.bytes)
    }
}

impl From<&[u8]> for Sequence {
    fn from(bytes: &[u8]) -> Self {
        Sequence::new((), FeatureTable::new(), bytes)
    }
}

impl From<&str> for Sequence {
    fn from(text: &str) -> Self {
        Sequence::from(text.as_bytes())
    }
}
