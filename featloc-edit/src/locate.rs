use featloc_core::models::{Location, Region, Segment, Sequence};

use crate::edit::{SequenceEdit, concat_with};
use crate::error::EditResult;

///
/// Extract the bases a value addresses from a sequence.
///
/// The result keeps the sequence's metadata and the features that survive
/// [`SequenceEdit::slice`] of each extracted span. Spans traversed in reverse are
/// reverse complemented, and composite regions are concatenated in
/// traversal order.
///
pub trait Locate {
    fn locate<M: Clone>(&self, seq: &Sequence<M>) -> EditResult<Sequence<M>>;
}

impl Locate for Segment {
    fn locate<M: Clone>(&self, seq: &Sequence<M>) -> EditResult<Sequence<M>> {
        let piece = seq.slice(self.start(), self.end())?;
        if self.is_reverse() {
            Ok(piece.reverse())
        } else {
            Ok(piece)
        }
    }
}

impl Locate for Region {
    fn locate<M: Clone>(&self, seq: &Sequence<M>) -> EditResult<Sequence<M>> {
        match self {
            Region::Segment(segment) => segment.locate(seq),
            Region::Regions(segments) => {
                let pieces = segments
                    .iter()
                    .map(|segment| segment.locate(seq))
                    .collect::<EditResult<Vec<_>>>()?;
                Ok(concat_with(seq.info().clone(), &pieces))
            }
        }
    }
}

impl Locate for Location {
    fn locate<M: Clone>(&self, seq: &Sequence<M>) -> EditResult<Sequence<M>> {
        self.region().locate(seq)
    }
}
