//! Byte edits on annotated sequences.
//!
//! All coordinates are 0-based. Windows are half-open and given either as
//! `(offset, count)` for removals or as `[lower, upper)` for slices.
use log::debug;

use featloc_core::models::{Feature, FeatureTable, Location, Sequence};
use featloc_core::utils::{complement_bytes, reverse_complement};

use crate::error::{EditError, EditResult};

fn check_bounds(pos: usize, len: usize) -> EditResult<()> {
    if pos > len {
        Err(EditError::OutOfBounds { pos, len })
    } else {
        Ok(())
    }
}

fn relocate_all(features: &FeatureTable, f: impl Fn(&Location) -> Location) -> FeatureTable {
    features
        .iter()
        .map(|feature| feature.relocated(f(&feature.location)))
        .collect()
}

// Features of `other` moved onto a new origin.
fn rebased<'a>(other: &'a FeatureTable, offset: usize) -> impl Iterator<Item = Feature> + 'a {
    other
        .iter()
        .map(move |feature| feature.relocated(feature.location.translate(offset as isize)))
}

// A single range covering all of `[lower, upper)`, cut down to the window
// and moved onto its origin.
fn clipped(location: &Location, lower: usize, upper: usize) -> Option<Location> {
    match location {
        Location::Range(r) if r.start() <= lower && upper <= r.end() && lower < upper => {
            Location::range(0, upper - lower).ok()
        }
        Location::Complement(inner) => clipped(inner, lower, upper).map(|loc| loc.complement()),
        _ => None,
    }
}

fn spans_whole(location: &Location, length: usize) -> bool {
    match location {
        Location::Range(r) => r.start() == 0 && r.end() == length,
        Location::Complement(inner) => spans_whole(inner, length),
        _ => false,
    }
}

///
/// Edit operations on a [`Sequence`]. Each returns a new sequence whose
/// feature table has been carried through the edit.
///
pub trait SequenceEdit: Sized {
    /// Splice `payload` in at `pos`. Features straddling `pos` split around
    /// the inserted bases, and the payload's features are carried over onto
    /// the inserted span.
    fn insert<N>(&self, pos: usize, payload: &Sequence<N>) -> EditResult<Self>;

    /// Like [`SequenceEdit::insert`], except that straddling features grow
    /// to cover the inserted bases instead of splitting.
    fn embed<N>(&self, pos: usize, payload: &Sequence<N>) -> EditResult<Self>;

    /// Remove `count` bases starting at `offset`. A feature that loses all
    /// of its bases is kept as a junction marker at `offset`.
    fn delete(&self, offset: usize, count: usize) -> EditResult<Self>;

    /// Like [`SequenceEdit::delete`], except that features lying entirely
    /// inside the removed window are dropped.
    fn erase(&self, offset: usize, count: usize) -> EditResult<Self>;

    /// Extract `[lower, upper)`, keeping the features that lie entirely
    /// inside it. A range covering the whole window is clipped to it; any
    /// other feature that reaches outside the window is dropped. When
    /// `lower > upper` the window wraps around the origin of a circular
    /// sequence.
    fn slice(&self, lower: usize, upper: usize) -> EditResult<Self>;

    /// Reverse complement the bytes and mirror every feature.
    fn reverse(&self) -> Self;

    /// Complement every base, keeping base order and features.
    fn complement(&self) -> Self;

    /// Rotate a circular sequence by `by` positions; positive values move
    /// bases toward higher coordinates.
    fn rotate(&self, by: isize) -> Self;
}

fn splice<M: Clone, N>(
    seq: &Sequence<M>,
    pos: usize,
    payload: &Sequence<N>,
    expand: bool,
) -> EditResult<Sequence<M>> {
    check_bounds(pos, seq.len())?;

    let mut bytes = Vec::with_capacity(seq.len() + payload.len());
    bytes.extend_from_slice(&seq.bytes()[..pos]);
    bytes.extend_from_slice(payload.bytes());
    bytes.extend_from_slice(&seq.bytes()[pos..]);

    let by = payload.len() as isize;
    let mut features = relocate_all(seq.features(), |loc| loc.shift(pos, by, expand));
    features.features.extend(rebased(payload.features(), pos));

    Ok(Sequence::new(seq.info().clone(), features, bytes))
}

fn remove<M: Clone>(seq: &Sequence<M>, offset: usize, count: usize, erase: bool) -> EditResult<Sequence<M>> {
    let len = seq.len();
    let end = offset.saturating_add(count);
    check_bounds(end, len)?;

    let mut bytes = seq.bytes()[..offset].to_vec();
    bytes.extend_from_slice(&seq.bytes()[end..]);

    let by = -(count as isize);
    let features: FeatureTable = seq
        .features()
        .iter()
        .filter_map(|feature| {
            if erase && count > 0 && feature.location.region().within(offset, end) {
                debug!(
                    "erase [{}, {}): dropping {} at {}",
                    offset, end, feature.key, feature.location
                );
                return None;
            }
            let location = feature.location.shift(offset, by, true);
            if location.is_empty() && !feature.location.is_empty() {
                debug!(
                    "delete [{}, {}): {} at {} collapses to {}",
                    offset, end, feature.key, feature.location, location
                );
            }
            Some(feature.relocated(location))
        })
        .collect();

    Ok(Sequence::new(seq.info().clone(), features, bytes))
}

impl<M: Clone> SequenceEdit for Sequence<M> {
    fn insert<N>(&self, pos: usize, payload: &Sequence<N>) -> EditResult<Self> {
        splice(self, pos, payload, false)
    }

    fn embed<N>(&self, pos: usize, payload: &Sequence<N>) -> EditResult<Self> {
        splice(self, pos, payload, true)
    }

    fn delete(&self, offset: usize, count: usize) -> EditResult<Self> {
        remove(self, offset, count, false)
    }

    fn erase(&self, offset: usize, count: usize) -> EditResult<Self> {
        remove(self, offset, count, true)
    }

    fn slice(&self, lower: usize, upper: usize) -> EditResult<Self> {
        let len = self.len();
        check_bounds(lower, len)?;
        check_bounds(upper, len)?;

        if lower > upper {
            return self.rotate(-(lower as isize)).slice(0, len - lower + upper);
        }

        let features: FeatureTable = self
            .features()
            .iter()
            .filter_map(|feature| {
                if feature.location.region().within(lower, upper) {
                    return Some(feature.relocated(feature.location.translate(-(lower as isize))));
                }
                if let Some(location) = clipped(&feature.location, lower, upper) {
                    debug!(
                        "slice [{}, {}): clipping {} at {} to {}",
                        lower, upper, feature.key, feature.location, location
                    );
                    return Some(feature.relocated(location));
                }
                debug!(
                    "slice [{}, {}): dropping {} at {}",
                    lower, upper, feature.key, feature.location
                );
                None
            })
            .collect();

        Ok(Sequence::new(
            self.info().clone(),
            features,
            &self.bytes()[lower..upper],
        ))
    }

    fn reverse(&self) -> Self {
        let len = self.len();
        Sequence::new(
            self.info().clone(),
            relocate_all(self.features(), |loc| loc.reverse(len)),
            reverse_complement(self.bytes()),
        )
    }

    fn complement(&self) -> Self {
        Sequence::new(
            self.info().clone(),
            self.features().clone(),
            complement_bytes(self.bytes()),
        )
    }

    fn rotate(&self, by: isize) -> Self {
        let len = self.len();
        if len == 0 {
            return self.clone();
        }
        let by = by.rem_euclid(len as isize) as usize;

        let mut bytes = self.bytes().to_vec();
        bytes.rotate_right(by);

        let features = relocate_all(self.features(), |loc| {
            if spans_whole(loc, len) {
                loc.clone()
            } else {
                loc.rotate(by, len)
            }
        });

        Sequence::new(self.info().clone(), features, bytes)
    }
}

// Concatenate pieces under the given metadata, moving each piece's features
// past everything before it.
pub(crate) fn concat_with<M, N>(info: M, pieces: &[Sequence<N>]) -> Sequence<M> {
    let mut bytes = Vec::with_capacity(pieces.iter().map(Sequence::len).sum());
    let mut features = FeatureTable::new();
    for piece in pieces {
        features.features.extend(rebased(piece.features(), bytes.len()));
        bytes.extend_from_slice(piece.bytes());
    }
    Sequence::new(info, features, bytes)
}

/// Concatenate sequences in order. The result takes the metadata of the
/// first sequence.
pub fn concat<M: Clone + Default>(seqs: &[Sequence<M>]) -> Sequence<M> {
    let info = seqs.first().map(|s| s.info().clone()).unwrap_or_default();
    concat_with(info, seqs)
}
