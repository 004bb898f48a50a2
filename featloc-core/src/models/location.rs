//! The location algebra.
//!
//! Coordinates are 0-based. A [`Location::Point`] addresses the single base at
//! its position, a [`Location::Range`] addresses `[start, end)` and a
//! [`Location::Between`] marks the junction just after its anchor. Text
//! rendering follows the 1-based closed notation used by GenBank feature
//! tables (`Display` here, parsing in [`crate::parser`]).
use std::cmp::Ordering;
use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{LocationError, LocationResult};
use crate::models::region::{Region, Segment};

/// Marks range boundaries known to extend past the stated coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Partial {
    /// Rendered as `<` before the start coordinate.
    pub start: bool,
    /// Rendered as `>` before the end coordinate.
    pub end: bool,
}

impl Partial {
    pub const COMPLETE: Partial = Partial {
        start: false,
        end: false,
    };
    pub const START: Partial = Partial {
        start: true,
        end: false,
    };
    pub const END: Partial = Partial {
        start: false,
        end: true,
    };
    pub const BOTH: Partial = Partial {
        start: true,
        end: true,
    };

    pub fn new(start: bool, end: bool) -> Self {
        Partial { start, end }
    }

    /// The same flags seen from the opposite strand.
    pub fn reversed(self) -> Partial {
        Partial {
            start: self.end,
            end: self.start,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.start && !self.end
    }
}

/// A half-open range `[start, end)` with optional partial ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ranged {
    start: usize,
    end: usize,
    partial: Partial,
}

impl Ranged {
    pub fn new(start: usize, end: usize) -> LocationResult<Ranged> {
        Ranged::with_partial(start, end, Partial::COMPLETE)
    }

    pub fn with_partial(start: usize, end: usize, partial: Partial) -> LocationResult<Ranged> {
        if start > end {
            return Err(LocationError::InvalidRange { start, end });
        }
        Ok(Ranged {
            start,
            end,
            partial,
        })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn partial(&self) -> Partial {
        self.partial
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Display for Ranged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lt = if self.partial.start { "<" } else { "" };
        let gt = if self.partial.end { ">" } else { "" };
        write!(f, "{}{}..{}{}", lt, self.start + 1, gt, self.end)
    }
}

/// A single position known only to lie somewhere in `[lo, hi)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ambiguous {
    lo: usize,
    hi: usize,
}

impl Ambiguous {
    pub fn new(lo: usize, hi: usize) -> LocationResult<Ambiguous> {
        if lo >= hi {
            return Err(LocationError::InvalidAmbiguous { lo, hi });
        }
        Ok(Ambiguous { lo, hi })
    }

    pub fn lo(&self) -> usize {
        self.lo
    }

    pub fn hi(&self) -> usize {
        self.hi
    }
}

impl Display for Ambiguous {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.lo + 1, self.hi)
    }
}

///
/// A symbolic address on a sequence.
///
/// Values are immutable: every operation returns a new `Location`. The
/// composite variants are built through [`Location::join`] and
/// [`Location::order`], which reject empty child lists. Neither constructor
/// normalises its children, so parsed text renders back exactly; call
/// [`Location::reduce`] to normalise.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Location {
    /// Zero-width junction between the base at `p - 1` and the base at `p`.
    Between(usize),
    Point(usize),
    Range(Ranged),
    Ambiguous(Ambiguous),
    Complement(Box<Location>),
    /// Children concatenate into one logical extent.
    Join(Vec<Location>),
    /// Children are separate occurrences, not concatenated.
    Order(Vec<Location>),
}

impl From<Ranged> for Location {
    fn from(value: Ranged) -> Self {
        Location::Range(value)
    }
}

impl From<Ambiguous> for Location {
    fn from(value: Ambiguous) -> Self {
        Location::Ambiguous(value)
    }
}

// Ordering rank used once positions and partial flags tie.
fn rank(loc: &Location) -> u8 {
    match loc {
        Location::Between(_) => 0,
        Location::Range(_) => 1,
        Location::Ambiguous(_) => 2,
        Location::Point(_) => 3,
        Location::Join(_) => 4,
        Location::Order(_) => 5,
        Location::Complement(inner) => rank(inner),
    }
}

// Start, end and partial flags of a child that can merge with its neighbour
// inside a join.
fn contiguous_span(loc: &Location) -> Option<(usize, usize, Partial)> {
    match loc {
        Location::Point(p) => Some((*p, p + 1, Partial::COMPLETE)),
        Location::Range(r) => Some((r.start, r.end, r.partial)),
        _ => None,
    }
}

fn merge_spans(
    (s1, e1, p1): (usize, usize, Partial),
    (s2, e2, p2): (usize, usize, Partial),
) -> Option<Ranged> {
    if e1 == s2 && !p1.end && !p2.start {
        Some(Ranged {
            start: s1,
            end: e2,
            partial: Partial::new(p1.start, p2.end),
        })
    } else {
        None
    }
}

fn merge_joined(prev: &Location, next: &Location) -> Option<Location> {
    match (prev, next) {
        (Location::Complement(a), Location::Complement(b)) => {
            // on the reverse strand the later child sits at lower coordinates
            let lower = contiguous_span(b)?;
            let upper = contiguous_span(a)?;
            merge_spans(lower, upper).map(|r| Location::Complement(Box::new(Location::Range(r))))
        }
        _ => merge_spans(contiguous_span(prev)?, contiguous_span(next)?).map(Location::Range),
    }
}

fn merge_ordered(prev: &Location, next: &Location) -> Option<Location> {
    match (prev, next) {
        (Location::Ambiguous(a), Location::Ambiguous(b)) if a.hi == b.lo => {
            Some(Location::Ambiguous(Ambiguous { lo: a.lo, hi: b.hi }))
        }
        _ => None,
    }
}

fn reduce_children(children: &[Location], joined: bool) -> Location {
    let mut flat: Vec<Location> = Vec::with_capacity(children.len());
    for child in children {
        match (child.reduce(), joined) {
            (Location::Join(nested), true) | (Location::Order(nested), false) => flat.extend(nested),
            (other, _) => flat.push(other),
        }
    }

    if flat.iter().any(|c| !matches!(c, Location::Between(_))) {
        flat.retain(|c| !matches!(c, Location::Between(_)));
    } else {
        flat.truncate(1);
    }

    let mut merged: Vec<Location> = Vec::with_capacity(flat.len());
    for child in flat {
        let combined = merged.last().and_then(|prev| {
            if joined {
                merge_joined(prev, &child)
            } else {
                merge_ordered(prev, &child)
            }
        });
        match combined {
            Some(loc) => {
                merged.pop();
                merged.push(loc);
            }
            None => merged.push(child),
        }
    }

    match merged.len() {
        1 => merged.remove(0),
        _ if joined => Location::Join(merged),
        _ => Location::Order(merged),
    }
}

// Range-like bounds after an edit. A range that loses all its bases becomes
// a junction marker.
fn bounded(start: usize, end: usize, partial: Partial) -> Location {
    if start == end {
        Location::Between(start)
    } else {
        Location::Range(Ranged {
            start,
            end,
            partial,
        })
    }
}

fn bounded_ambiguous(lo: usize, hi: usize) -> Location {
    if lo < hi {
        Location::Ambiguous(Ambiguous { lo, hi })
    } else {
        Location::Between(lo)
    }
}

impl Location {
    pub fn range(start: usize, end: usize) -> LocationResult<Location> {
        Ok(Location::Range(Ranged::new(start, end)?))
    }

    pub fn partial_range(start: usize, end: usize, partial: Partial) -> LocationResult<Location> {
        Ok(Location::Range(Ranged::with_partial(start, end, partial)?))
    }

    pub fn ambiguous(lo: usize, hi: usize) -> LocationResult<Location> {
        Ok(Location::Ambiguous(Ambiguous::new(lo, hi)?))
    }

    pub fn join(children: Vec<Location>) -> LocationResult<Location> {
        if children.is_empty() {
            return Err(LocationError::EmptyJoin);
        }
        Ok(Location::Join(children))
    }

    pub fn order(children: Vec<Location>) -> LocationResult<Location> {
        if children.is_empty() {
            return Err(LocationError::EmptyOrder);
        }
        Ok(Location::Order(children))
    }

    /// The location on the opposite strand. Complementing a complemented
    /// location unwraps it.
    pub fn complement(&self) -> Location {
        match self {
            Location::Complement(inner) => (**inner).clone(),
            other => Location::Complement(Box::new(other.clone())),
        }
    }

    /// Number of bases addressed. An ordered location sums its children.
    pub fn len(&self) -> usize {
        match self {
            Location::Between(_) => 0,
            Location::Point(_) | Location::Ambiguous(_) => 1,
            Location::Range(r) => r.len(),
            Location::Complement(inner) => inner.len(),
            Location::Join(children) | Location::Order(children) => {
                children.iter().map(Location::len).sum()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lowest coordinate of the first child, ignoring strand.
    pub fn head(&self) -> usize {
        match self {
            Location::Between(p) | Location::Point(p) => *p,
            Location::Range(r) => r.start,
            Location::Ambiguous(a) => a.lo,
            Location::Complement(inner) => inner.head(),
            Location::Join(children) | Location::Order(children) => {
                children.first().map_or(0, Location::head)
            }
        }
    }

    /// Exclusive upper coordinate of the last child, ignoring strand.
    pub fn tail(&self) -> usize {
        match self {
            Location::Between(p) => *p,
            Location::Point(p) => p + 1,
            Location::Range(r) => r.end,
            Location::Ambiguous(a) => a.hi,
            Location::Complement(inner) => inner.tail(),
            Location::Join(children) | Location::Order(children) => {
                children.last().map_or(0, Location::tail)
            }
        }
    }

    pub fn partial_start(&self) -> bool {
        match self {
            Location::Range(r) => r.partial.start,
            Location::Complement(inner) => inner.partial_start(),
            Location::Join(children) | Location::Order(children) => {
                children.first().is_some_and(Location::partial_start)
            }
            _ => false,
        }
    }

    pub fn partial_end(&self) -> bool {
        match self {
            Location::Range(r) => r.partial.end,
            Location::Complement(inner) => inner.partial_end(),
            Location::Join(children) | Location::Order(children) => {
                children.last().is_some_and(Location::partial_end)
            }
            _ => false,
        }
    }

    /// Spans addressed by the location in traversal order. Complemented
    /// spans run in reverse.
    pub fn regions(&self) -> Vec<Segment> {
        match self {
            Location::Between(p) => vec![Segment::new(*p, *p)],
            Location::Point(p) => vec![Segment::new(*p, p + 1)],
            Location::Range(r) => vec![Segment::new(r.start, r.end)],
            Location::Ambiguous(a) => vec![Segment::new(a.lo, a.hi)],
            Location::Complement(inner) => inner
                .regions()
                .into_iter()
                .rev()
                .map(|s| s.complement())
                .collect(),
            Location::Join(children) | Location::Order(children) => {
                children.iter().flat_map(Location::regions).collect()
            }
        }
    }

    /// [`Location::regions`] as a single region value.
    pub fn region(&self) -> Region {
        let mut segments = self.regions();
        if segments.len() == 1 {
            Region::Segment(segments.remove(0))
        } else {
            Region::Regions(segments)
        }
    }

    ///
    /// Adjust the location for `by` bases inserted (positive) or deleted
    /// (negative) at index `at`.
    ///
    /// Positions past `at` move by `by`. A point or range start sitting at
    /// `at` moves too, while a junction marker or range end sitting at `at`
    /// stays. Deleted positions clamp to `at`, and a point or range left with
    /// no bases becomes a [`Location::Between`] marker.
    ///
    /// With `expand` unset, an insertion strictly inside a range splits it
    /// into a joined pair around the inserted bases (an ordered pair for an
    /// ambiguous location). With `expand` set the range grows instead.
    ///
    pub fn shift(&self, at: usize, by: isize, expand: bool) -> Location {
        if by == 0 {
            return self.clone();
        }
        let moved = |p: usize| -> usize {
            if by > 0 {
                p + by.unsigned_abs()
            } else {
                p.saturating_sub(by.unsigned_abs()).max(at)
            }
        };
        let splits = |lo: usize, hi: usize| by > 0 && !expand && lo < at && at < hi;

        match self {
            Location::Between(p) if *p > at => Location::Between(moved(*p)),
            Location::Between(p) => Location::Between(*p),
            Location::Point(p) if *p < at => Location::Point(*p),
            Location::Point(p) if by < 0 && *p < at + by.unsigned_abs() => Location::Between(at),
            Location::Point(p) => Location::Point(moved(*p)),
            Location::Range(r) if splits(r.start, r.end) => Location::Join(vec![
                Location::Range(Ranged {
                    start: r.start,
                    end: at,
                    partial: Partial::new(r.partial.start, false),
                }),
                Location::Range(Ranged {
                    start: moved(at),
                    end: moved(r.end),
                    partial: Partial::new(false, r.partial.end),
                }),
            ]),
            Location::Range(r) => {
                let start = if r.start >= at { moved(r.start) } else { r.start };
                let end = if r.end > at { moved(r.end) } else { r.end };
                bounded(start, end, r.partial)
            }
            Location::Ambiguous(a) if splits(a.lo, a.hi) => Location::Order(vec![
                Location::Ambiguous(Ambiguous { lo: a.lo, hi: at }),
                Location::Ambiguous(Ambiguous {
                    lo: moved(at),
                    hi: moved(a.hi),
                }),
            ]),
            Location::Ambiguous(a) => {
                let lo = if a.lo >= at { moved(a.lo) } else { a.lo };
                let hi = if a.hi > at { moved(a.hi) } else { a.hi };
                bounded_ambiguous(lo, hi)
            }
            Location::Complement(inner) => {
                Location::Complement(Box::new(inner.shift(at, by, expand)))
            }
            Location::Join(children) => {
                let shifted: Vec<Location> =
                    children.iter().map(|c| c.shift(at, by, expand)).collect();
                reduce_children(&shifted, true)
            }
            Location::Order(children) => {
                let shifted: Vec<Location> =
                    children.iter().map(|c| c.shift(at, by, expand)).collect();
                reduce_children(&shifted, false)
            }
        }
    }

    /// Move every coordinate by `delta`, clamping at zero.
    pub fn translate(&self, delta: isize) -> Location {
        let mv = |p: usize| p.saturating_add_signed(delta);
        match self {
            Location::Between(p) => Location::Between(mv(*p)),
            Location::Point(p) => Location::Point(mv(*p)),
            Location::Range(r) => bounded(mv(r.start), mv(r.end), r.partial),
            Location::Ambiguous(a) => bounded_ambiguous(mv(a.lo), mv(a.hi)),
            Location::Complement(inner) => Location::Complement(Box::new(inner.translate(delta))),
            Location::Join(children) => {
                Location::Join(children.iter().map(|c| c.translate(delta)).collect())
            }
            Location::Order(children) => {
                Location::Order(children.iter().map(|c| c.translate(delta)).collect())
            }
        }
    }

    ///
    /// Mirror the location onto the opposite end of a sequence of `length`
    /// bases. Range ends swap along with their partial flags, composite
    /// children are reversed in order, and a complement keeps its wrapper.
    ///
    pub fn reverse(&self, length: usize) -> Location {
        let flip = |p: usize| length.saturating_sub(p);
        match self {
            Location::Between(p) => Location::Between(flip(*p)),
            Location::Point(p) => Location::Point(flip(p + 1)),
            Location::Range(r) => Location::Range(Ranged {
                start: flip(r.end),
                end: flip(r.start),
                partial: r.partial.reversed(),
            }),
            Location::Ambiguous(a) => bounded_ambiguous(flip(a.hi), flip(a.lo)),
            Location::Complement(inner) => Location::Complement(Box::new(inner.reverse(length))),
            Location::Join(children) => {
                Location::Join(children.iter().rev().map(|c| c.reverse(length)).collect())
            }
            Location::Order(children) => {
                Location::Order(children.iter().rev().map(|c| c.reverse(length)).collect())
            }
        }
    }

    /// Move the location `by` positions toward higher coordinates on a
    /// circular sequence of `length` bases. A span that crosses the origin
    /// splits into a joined pair (an ordered pair for an ambiguous location).
    pub fn rotate(&self, by: usize, length: usize) -> Location {
        if length == 0 || by % length == 0 {
            return self.clone();
        }
        let by = by % length;
        let wrap = |p: usize| (p + by) % length;
        let moved = |start: usize, end: usize| {
            let (s, e) = (start + by, end + by);
            if s >= length {
                (s - length, e - length)
            } else {
                (s, e)
            }
        };
        let flatten = |children: &[Location], joined: bool| -> Vec<Location> {
            children
                .iter()
                .flat_map(|c| match (c.rotate(by, length), joined) {
                    (Location::Join(nested), true) | (Location::Order(nested), false) => nested,
                    (other, _) => vec![other],
                })
                .collect()
        };

        match self {
            Location::Between(p) => Location::Between(wrap(*p)),
            Location::Point(p) => Location::Point(wrap(*p)),
            Location::Range(r) => match moved(r.start, r.end) {
                (s, e) if e > length => Location::Join(vec![
                    Location::Range(Ranged {
                        start: s,
                        end: length,
                        partial: Partial::new(r.partial.start, false),
                    }),
                    Location::Range(Ranged {
                        start: 0,
                        end: e - length,
                        partial: Partial::new(false, r.partial.end),
                    }),
                ]),
                (s, e) => Location::Range(Ranged {
                    start: s,
                    end: e,
                    partial: r.partial,
                }),
            },
            Location::Ambiguous(a) => match moved(a.lo, a.hi) {
                (lo, hi) if hi > length => Location::Order(vec![
                    Location::Ambiguous(Ambiguous { lo, hi: length }),
                    Location::Ambiguous(Ambiguous {
                        lo: 0,
                        hi: hi - length,
                    }),
                ]),
                (lo, hi) => Location::Ambiguous(Ambiguous { lo, hi }),
            },
            Location::Complement(inner) => Location::Complement(Box::new(inner.rotate(by, length))),
            Location::Join(children) => Location::Join(flatten(children, true)),
            Location::Order(children) => Location::Order(flatten(children, false)),
        }
    }

    ///
    /// Normalise composite locations: nested composites of the same kind are
    /// flattened, junction markers are dropped next to real content, and
    /// contiguous neighbours merge. A composite left with one child becomes
    /// that child.
    ///
    pub fn reduce(&self) -> Location {
        match self {
            Location::Join(children) => reduce_children(children, true),
            Location::Order(children) => reduce_children(children, false),
            Location::Complement(inner) => inner.reduce().complement(),
            other => other.clone(),
        }
    }

    fn strip_complement(&self) -> &Location {
        match self {
            Location::Complement(inner) => inner.strip_complement(),
            other => other,
        }
    }

    ///
    /// Positional ordering that ignores strand. Locations compare by head,
    /// then tail; a partial start sorts first and a partial end sorts last.
    /// Remaining ties fall back to the variant and then to the children, so
    /// two locations without complements compare equal only when they are
    /// equal.
    ///
    pub fn cmp_position(&self, other: &Location) -> Ordering {
        let (a, b) = (self.strip_complement(), other.strip_complement());
        a.head()
            .cmp(&b.head())
            .then_with(|| a.tail().cmp(&b.tail()))
            .then_with(|| b.partial_start().cmp(&a.partial_start()))
            .then_with(|| a.partial_end().cmp(&b.partial_end()))
            .then_with(|| rank(a).cmp(&rank(b)))
            .then_with(|| match (a, b) {
                (Location::Join(xs), Location::Join(ys))
                | (Location::Order(xs), Location::Order(ys)) => xs
                    .iter()
                    .zip(ys.iter())
                    .map(|(x, y)| x.cmp_position(y))
                    .find(|o| o.is_ne())
                    .unwrap_or_else(|| xs.len().cmp(&ys.len())),
                _ => Ordering::Equal,
            })
    }

    pub fn less(&self, other: &Location) -> bool {
        self.cmp_position(other) == Ordering::Less
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, children: &[Location]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{}", child)?;
    }
    f.write_str(")")
}

impl Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Between(p) => write!(f, "{}^{}", p, p + 1),
            Location::Point(p) => write!(f, "{}", p + 1),
            Location::Range(r) => write!(f, "{}", r),
            Location::Ambiguous(a) => write!(f, "{}", a),
            Location::Complement(inner) => write!(f, "complement({})", inner),
            Location::Join(children) => write_list(f, "join", children),
            Location::Order(children) => write_list(f, "order", children),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn range(start: usize, end: usize) -> Location {
        Location::range(start, end).unwrap()
    }

    fn partial(start: usize, end: usize, partial: Partial) -> Location {
        Location::partial_range(start, end, partial).unwrap()
    }

    fn ambiguous(lo: usize, hi: usize) -> Location {
        Location::ambiguous(lo, hi).unwrap()
    }

    fn join(children: Vec<Location>) -> Location {
        Location::join(children).unwrap()
    }

    fn order(children: Vec<Location>) -> Location {
        Location::order(children).unwrap()
    }

    #[rstest]
    #[case(Location::Between(0), "0^1", 0)]
    #[case(Location::Point(0), "1", 1)]
    #[case(range(0, 2), "1..2", 2)]
    #[case(partial(0, 2, Partial::COMPLETE), "1..2", 2)]
    #[case(partial(0, 2, Partial::START), "<1..2", 2)]
    #[case(partial(0, 2, Partial::END), "1..>2", 2)]
    #[case(partial(0, 2, Partial::BOTH), "<1..>2", 2)]
    #[case(join(vec![range(0, 2), range(3, 5)]), "join(1..2,4..5)", 4)]
    #[case(join(vec![range(0, 2), join(vec![range(3, 5), range(6, 8)])]), "join(1..2,join(4..5,7..8))", 6)]
    #[case(join(vec![Location::Point(0), Location::Point(2)]), "join(1,3)", 2)]
    #[case(ambiguous(0, 2), "1.2", 1)]
    #[case(order(vec![range(0, 2), range(2, 4)]), "order(1..2,3..4)", 4)]
    #[case(order(vec![Location::Point(0), Location::Point(2)]), "order(1,3)", 2)]
    fn test_accessors(#[case] loc: Location, #[case] text: &str, #[case] len: usize) {
        assert_eq!(loc.to_string(), text);
        assert_eq!(loc.len(), len);

        let cmp = loc.complement();
        assert_eq!(cmp.to_string(), format!("complement({})", text));
        assert_eq!(cmp.len(), len);
        assert_eq!(cmp.complement(), loc);
    }

    #[rstest]
    fn test_constructors_validate() {
        assert_eq!(
            Location::range(2, 0),
            Err(LocationError::InvalidRange { start: 2, end: 0 })
        );
        assert_eq!(
            Location::ambiguous(2, 2),
            Err(LocationError::InvalidAmbiguous { lo: 2, hi: 2 })
        );
        assert_eq!(Location::join(vec![]), Err(LocationError::EmptyJoin));
        assert_eq!(Location::order(vec![]), Err(LocationError::EmptyOrder));
    }

    #[rstest]
    #[case(Location::Between(0), 0, 1, true, Location::Between(0))]
    #[case(Location::Between(0), 0, -1, true, Location::Between(0))]
    #[case(Location::Between(1), 0, 1, true, Location::Between(2))]
    #[case(Location::Between(1), 0, -1, true, Location::Between(0))]
    #[case(Location::Point(0), 0, 1, true, Location::Point(1))]
    #[case(Location::Point(0), 0, -1, true, Location::Between(0))]
    #[case(Location::Point(0), 1, 1, true, Location::Point(0))]
    #[case(Location::Point(0), 1, -1, true, Location::Point(0))]
    #[case(Location::Point(1), 0, 1, true, Location::Point(2))]
    #[case(Location::Point(1), 0, -1, true, Location::Point(0))]
    #[case(range(0, 2), 0, 1, true, range(1, 3))]
    #[case(range(0, 2), 0, -1, true, range(0, 1))]
    #[case(range(0, 2), 0, -2, true, Location::Between(0))]
    #[case(range(1, 3), 0, -1, true, range(0, 2))]
    #[case(range(0, 2), 2, 1, true, range(0, 2))]
    #[case(range(0, 2), 2, -1, true, range(0, 2))]
    #[case(range(0, 4), 2, 1, true, range(0, 5))]
    #[case(
        partial(0, 4, Partial::BOTH), 2, 1, false,
        join(vec![partial(0, 2, Partial::START), partial(3, 5, Partial::END)])
    )]
    #[case(join(vec![range(0, 2), range(3, 5)]), 0, 1, true, join(vec![range(1, 3), range(4, 6)]))]
    #[case(join(vec![range(0, 2), range(3, 5)]), 0, -1, true, join(vec![range(0, 1), range(2, 4)]))]
    #[case(join(vec![range(0, 2), range(3, 5)]), 2, 1, true, join(vec![range(0, 2), range(4, 6)]))]
    #[case(join(vec![range(0, 2), range(3, 5)]), 2, -1, true, range(0, 4))]
    #[case(join(vec![range(0, 2), range(3, 5)]), 5, 1, true, join(vec![range(0, 2), range(3, 5)]))]
    #[case(join(vec![range(0, 2), range(3, 5)]), 5, -1, true, join(vec![range(0, 2), range(3, 5)]))]
    #[case(ambiguous(0, 2), 0, 1, true, ambiguous(1, 3))]
    #[case(ambiguous(0, 2), 0, -1, true, ambiguous(0, 1))]
    #[case(ambiguous(0, 2), 0, -2, true, Location::Between(0))]
    #[case(ambiguous(1, 3), 0, -1, true, ambiguous(0, 2))]
    #[case(ambiguous(0, 2), 2, 1, true, ambiguous(0, 2))]
    #[case(ambiguous(0, 2), 2, -1, true, ambiguous(0, 2))]
    #[case(ambiguous(0, 4), 2, 1, false, order(vec![ambiguous(0, 2), ambiguous(3, 5)]))]
    #[case(order(vec![range(0, 2), range(3, 5)]), 0, 1, true, order(vec![range(1, 3), range(4, 6)]))]
    #[case(order(vec![range(0, 2), range(3, 5)]), 0, -1, true, order(vec![range(0, 1), range(2, 4)]))]
    #[case(order(vec![range(0, 2), range(3, 5)]), 2, 1, true, order(vec![range(0, 2), range(4, 6)]))]
    #[case(order(vec![range(0, 2), range(3, 5)]), 2, -1, true, order(vec![range(0, 2), range(2, 4)]))]
    #[case(order(vec![range(0, 2), range(3, 5)]), 5, 1, true, order(vec![range(0, 2), range(3, 5)]))]
    #[case(order(vec![range(0, 2), range(3, 5)]), 5, -1, true, order(vec![range(0, 2), range(3, 5)]))]
    fn test_shift(
        #[case] loc: Location,
        #[case] at: usize,
        #[case] by: isize,
        #[case] expand: bool,
        #[case] expected: Location,
    ) {
        assert_eq!(loc.shift(at, by, expand), expected);
        assert_eq!(
            loc.complement().shift(at, by, expand),
            expected.complement()
        );
    }

    #[rstest]
    #[case(Location::Between(0), Location::Between(10))]
    #[case(Location::Point(0), Location::Point(9))]
    #[case(range(0, 3), range(7, 10))]
    #[case(partial(0, 3, Partial::START), partial(7, 10, Partial::END))]
    #[case(partial(0, 3, Partial::END), partial(7, 10, Partial::START))]
    #[case(partial(0, 3, Partial::BOTH), partial(7, 10, Partial::BOTH))]
    #[case(join(vec![range(0, 3), range(5, 8)]), join(vec![range(2, 5), range(7, 10)]))]
    #[case(range(0, 3).complement(), range(7, 10).complement())]
    #[case(ambiguous(0, 3), ambiguous(7, 10))]
    #[case(order(vec![range(0, 3), range(5, 8)]), order(vec![range(2, 5), range(7, 10)]))]
    fn test_reverse(#[case] loc: Location, #[case] expected: Location) {
        assert_eq!(loc.reverse(10), expected);
        assert_eq!(expected.reverse(10), loc);
    }

    #[rstest]
    #[case(join(vec![range(0, 2), range(2, 4)]), range(0, 4))]
    #[case(join(vec![range(0, 2), Location::Point(2)]), range(0, 3))]
    #[case(join(vec![Location::Point(0), Location::Point(1)]), range(0, 2))]
    #[case(join(vec![range(2, 4).complement(), range(0, 2).complement()]), range(0, 4).complement())]
    #[case(join(vec![partial(0, 2, Partial::END), range(2, 4)]), join(vec![partial(0, 2, Partial::END), range(2, 4)]))]
    #[case(join(vec![range(0, 2), join(vec![range(3, 5), range(6, 8)])]), join(vec![range(0, 2), range(3, 5), range(6, 8)]))]
    #[case(join(vec![Location::Between(2), range(4, 6)]), range(4, 6))]
    #[case(join(vec![Location::Between(2), Location::Between(4)]), Location::Between(2))]
    #[case(order(vec![range(0, 2)]), range(0, 2))]
    #[case(order(vec![range(0, 2), range(2, 4)]), order(vec![range(0, 2), range(2, 4)]))]
    #[case(order(vec![ambiguous(0, 2), ambiguous(2, 4)]), ambiguous(0, 4))]
    #[case(range(0, 2).complement().complement(), range(0, 2))]
    fn test_reduce(#[case] loc: Location, #[case] expected: Location) {
        assert_eq!(loc.reduce(), expected);
    }

    #[rstest]
    #[case(Location::Between(0), vec![Segment::new(0, 0)])]
    #[case(Location::Point(0), vec![Segment::new(0, 1)])]
    #[case(range(0, 2), vec![Segment::new(0, 2)])]
    #[case(join(vec![range(0, 2), range(3, 5)]), vec![Segment::new(0, 2), Segment::new(3, 5)])]
    #[case(join(vec![range(0, 2), range(3, 5)]).complement(), vec![Segment::new(5, 3), Segment::new(2, 0)])]
    fn test_regions(#[case] loc: Location, #[case] expected: Vec<Segment>) {
        assert_eq!(loc.regions(), expected);
    }

    #[rstest]
    #[case(Location::Between(1), Location::Between(2), Ordering::Less)]
    #[case(Location::Between(1), Location::Point(1), Ordering::Less)]
    #[case(Location::Between(1), range(1, 3), Ordering::Less)]
    #[case(Location::Between(1), join(vec![range(1, 3), range(4, 6)]), Ordering::Less)]
    #[case(Location::Between(1), ambiguous(1, 3), Ordering::Less)]
    #[case(Location::Between(1), Location::Between(1), Ordering::Equal)]
    #[case(Location::Between(1), Location::Point(0), Ordering::Greater)]
    #[case(Location::Between(1), range(0, 2), Ordering::Greater)]
    #[case(Location::Point(0), Location::Between(0), Ordering::Greater)]
    #[case(Location::Point(0), Location::Point(1), Ordering::Less)]
    #[case(Location::Point(0), range(0, 2), Ordering::Less)]
    #[case(range(1, 3), range(2, 3), Ordering::Less)]
    #[case(range(1, 3), range(1, 4), Ordering::Less)]
    #[case(range(1, 3), range(0, 3), Ordering::Greater)]
    #[case(range(1, 3), range(1, 2), Ordering::Greater)]
    #[case(range(1, 3), ambiguous(1, 3), Ordering::Less)]
    #[case(range(1, 3), ambiguous(1, 2), Ordering::Greater)]
    #[case(partial(1, 3, Partial::START), range(1, 3), Ordering::Less)]
    #[case(partial(1, 3, Partial::START), ambiguous(1, 3), Ordering::Less)]
    #[case(partial(1, 3, Partial::END), range(1, 3), Ordering::Greater)]
    #[case(partial(1, 3, Partial::END), ambiguous(1, 3), Ordering::Greater)]
    #[case(join(vec![range(0, 2), range(3, 5)]), join(vec![range(1, 2), range(3, 5)]), Ordering::Less)]
    #[case(join(vec![range(0, 2), range(3, 5)]), join(vec![range(0, 3), range(3, 5)]), Ordering::Less)]
    #[case(join(vec![range(0, 2), range(3, 5)]), order(vec![range(0, 2), range(3, 5)]), Ordering::Less)]
    #[case(order(vec![range(0, 2), range(3, 5)]), order(vec![range(1, 2), range(3, 5)]), Ordering::Less)]
    #[case(range(1, 3).complement(), range(2, 3), Ordering::Less)]
    #[case(range(1, 3), range(1, 3).complement(), Ordering::Equal)]
    fn test_cmp_position(#[case] lhs: Location, #[case] rhs: Location, #[case] expected: Ordering) {
        assert_eq!(lhs.cmp_position(&rhs), expected);
        assert_eq!(rhs.cmp_position(&lhs), expected.reverse());
        assert_eq!(lhs.less(&rhs), expected == Ordering::Less);
    }

    #[rstest]
    fn test_translate() {
        let loc = join(vec![Location::Point(1), range(3, 5).complement()]);
        assert_eq!(
            loc.translate(4),
            join(vec![Location::Point(5), range(7, 9).complement()])
        );
        assert_eq!(loc.translate(4).translate(-4), loc);
    }

    #[rstest]
    #[case(Location::Between(3), 2, Location::Between(5))]
    #[case(Location::Point(7), 2, Location::Point(1))]
    #[case(range(1, 3), 2, range(3, 5))]
    #[case(range(6, 8), 2, range(0, 2))]
    #[case(range(4, 8), 2, join(vec![range(6, 8), range(0, 2)]))]
    #[case(
        partial(4, 8, Partial::BOTH),
        2,
        join(vec![partial(6, 8, Partial::START), partial(0, 2, Partial::END)])
    )]
    #[case(ambiguous(5, 8), 2, order(vec![ambiguous(7, 8), ambiguous(0, 2)]))]
    #[case(range(4, 8).complement(), 2, join(vec![range(6, 8), range(0, 2)]).complement())]
    #[case(
        join(vec![range(0, 2), range(5, 7)]),
        2,
        join(vec![range(2, 4), range(7, 8), range(0, 1)])
    )]
    #[case(range(1, 3), 10, range(3, 5))]
    #[case(range(1, 3), 8, range(1, 3))]
    fn test_rotate(#[case] loc: Location, #[case] by: usize, #[case] expected: Location) {
        assert_eq!(loc.rotate(by, 8), expected);
        assert_eq!(loc.rotate(by, 8).len(), loc.len());
    }

    #[rstest]
    fn test_region_of_single_span() {
        assert_eq!(range(2, 6).region(), Region::Segment(Segment::new(2, 6)));
        assert_eq!(
            range(2, 6).complement().region(),
            Region::Segment(Segment::new(6, 2))
        );
    }
}
