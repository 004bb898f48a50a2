//! Directional spans and the resize operators that act on them.
//!
//! A [`Segment`] has a head and a tail. When `head <= tail` the segment runs
//! forward; when `head > tail` it runs in reverse and addresses the reverse
//! complement of `[tail, head)`. A [`Region`] is either a single segment or an
//! ordered list of segments addressed as one composite span.
//!
//! Resizing is expressed with a [`Modifier`]. Offsets are measured along the
//! region's own direction of travel, so `Head(+1)` moves the head one base
//! further into a forward segment and one base further into a reverse one.
use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::ModifierError;

/// A directional two-endpoint span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    pub head: usize,
    pub tail: usize,
}

impl Segment {
    pub fn new(head: usize, tail: usize) -> Self {
        Segment { head, tail }
    }

    pub fn len(&self) -> usize {
        self.head.abs_diff(self.tail)
    }

    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn tail(&self) -> usize {
        self.tail
    }

    /// True when the segment runs from a higher coordinate to a lower one.
    pub fn is_reverse(&self) -> bool {
        self.head > self.tail
    }

    /// Lower coordinate, regardless of orientation.
    pub fn start(&self) -> usize {
        self.head.min(self.tail)
    }

    /// Upper coordinate, regardless of orientation.
    pub fn end(&self) -> usize {
        self.head.max(self.tail)
    }

    /// The same span traversed in the opposite direction.
    pub fn complement(&self) -> Segment {
        Segment::new(self.tail, self.head)
    }

    /// True if the segment lies inside `[lower, upper)`.
    pub fn within(&self, lower: usize, upper: usize) -> bool {
        lower <= self.start() && self.end() <= upper
    }

    pub fn resize(&self, modifier: Modifier) -> Region {
        resize_segments(std::slice::from_ref(self), modifier)
    }

    // Coordinates are clamped at zero.
    fn step(&self, from: usize, delta: isize) -> usize {
        let delta = if self.is_reverse() {
            delta.saturating_neg()
        } else {
            delta
        };
        from.saturating_add_signed(delta)
    }
}

impl From<(usize, usize)> for Segment {
    fn from(value: (usize, usize)) -> Self {
        Segment::new(value.0, value.1)
    }
}

/// A single segment or an ordered list of segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Region {
    Segment(Segment),
    Regions(Vec<Segment>),
}

impl Region {
    pub fn segments(&self) -> &[Segment] {
        match self {
            Region::Segment(segment) => std::slice::from_ref(segment),
            Region::Regions(segments) => segments,
        }
    }

    /// Total number of bases addressed by every segment.
    pub fn len(&self) -> usize {
        self.segments().iter().map(Segment::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Head of the first segment, or 0 for an empty list.
    pub fn head(&self) -> usize {
        self.segments().first().map_or(0, |s| s.head)
    }

    /// Tail of the last segment, or 0 for an empty list.
    pub fn tail(&self) -> usize {
        self.segments().last().map_or(0, |s| s.tail)
    }

    pub fn resize(&self, modifier: Modifier) -> Region {
        resize_segments(self.segments(), modifier)
    }

    /// True if every segment lies inside `[lower, upper)`.
    pub fn within(&self, lower: usize, upper: usize) -> bool {
        self.segments().iter().all(|s| s.within(lower, upper))
    }

    /// Reverse the traversal: flip every segment and reverse their order.
    pub fn complement(&self) -> Region {
        match self {
            Region::Segment(segment) => Region::Segment(segment.complement()),
            Region::Regions(segments) => {
                Region::Regions(segments.iter().rev().map(Segment::complement).collect())
            }
        }
    }

    ///
    /// Merge overlapping and adjacent segments into a minimal list of
    /// forward segments sorted by start.
    ///
    pub fn minimize(&self) -> Vec<Segment> {
        let mut spans: Vec<(usize, usize)> = self
            .segments()
            .iter()
            .map(|s| (s.start(), s.end()))
            .collect();
        spans.sort_unstable();

        let mut merged: Vec<Segment> = Vec::with_capacity(spans.len());
        for (start, end) in spans {
            match merged.last_mut() {
                Some(last) if start <= last.tail => last.tail = last.tail.max(end),
                _ => merged.push(Segment::new(start, end)),
            }
        }
        merged
    }
}

impl From<Segment> for Region {
    fn from(segment: Segment) -> Self {
        Region::Segment(segment)
    }
}

impl From<Vec<Segment>> for Region {
    fn from(segments: Vec<Segment>) -> Self {
        Region::Regions(segments)
    }
}

/// A resize instruction. Positive deltas move an endpoint further along the
/// region's direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Modifier {
    /// A zero-length point at the head moved by the delta.
    Head(isize),
    /// A zero-length point at the tail moved by the delta.
    Tail(isize),
    /// Move the head and the tail independently.
    HeadTail(isize, isize),
    /// A span between two points measured from the head.
    HeadHead(isize, isize),
    /// A span between two points measured from the tail.
    TailTail(isize, isize),
}

impl Modifier {
    // Offsets from the head of a region of the given length. A single offset
    // means a point, a pair means a span.
    fn offsets(&self, len: isize) -> (isize, Option<isize>) {
        match *self {
            Modifier::Head(d) => (d, None),
            Modifier::Tail(d) => (len + d, None),
            Modifier::HeadTail(h, t) => (h, Some(len + t)),
            Modifier::HeadHead(a, b) => (a, Some(b)),
            Modifier::TailTail(a, b) => (len + a, Some(len + b)),
        }
    }
}

fn fmt_offset(delta: isize) -> String {
    if delta == 0 {
        String::new()
    } else {
        format!("{:+}", delta)
    }
}

impl Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Modifier::Head(d) => write!(f, "^{}", fmt_offset(d)),
            Modifier::Tail(d) => write!(f, "${}", fmt_offset(d)),
            Modifier::HeadTail(h, t) => write!(f, "^{}..${}", fmt_offset(h), fmt_offset(t)),
            Modifier::HeadHead(a, b) => write!(f, "^{}..^{}", fmt_offset(a), fmt_offset(b)),
            Modifier::TailTail(a, b) => write!(f, "${}..${}", fmt_offset(a), fmt_offset(b)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Head,
    Tail,
}

fn parse_endpoint(s: &str) -> Result<(Anchor, isize), ModifierError> {
    let anchor = match s.chars().next() {
        Some('^') => Anchor::Head,
        Some('$') => Anchor::Tail,
        _ => return Err(ModifierError::InvalidAnchor(s.to_string())),
    };
    let offset = &s[1..];
    if offset.is_empty() {
        return Ok((anchor, 0));
    }
    if !offset.starts_with(['+', '-']) {
        return Err(ModifierError::InvalidOffset(offset.to_string()));
    }
    let delta = offset
        .parse::<isize>()
        .map_err(|_| ModifierError::InvalidOffset(offset.to_string()))?;
    Ok((anchor, delta))
}

impl FromStr for Modifier {
    type Err = ModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ModifierError::Empty);
        }
        match s.split_once("..") {
            None => {
                let (anchor, delta) = parse_endpoint(s)?;
                Ok(match anchor {
                    Anchor::Head => Modifier::Head(delta),
                    Anchor::Tail => Modifier::Tail(delta),
                })
            }
            Some((lhs, rhs)) => {
                let (a, x) = parse_endpoint(lhs)?;
                let (b, y) = parse_endpoint(rhs)?;
                match (a, b) {
                    (Anchor::Head, Anchor::Head) => Ok(Modifier::HeadHead(x, y)),
                    (Anchor::Head, Anchor::Tail) => Ok(Modifier::HeadTail(x, y)),
                    (Anchor::Tail, Anchor::Tail) => Ok(Modifier::TailTail(x, y)),
                    (Anchor::Tail, Anchor::Head) => Err(ModifierError::InvertedEnds),
                }
            }
        }
    }
}

// Coordinate found by walking `offset` bases from the head through the
// segments in order. Offsets before the head or past the tail extend the
// first or last segment.
fn position_at(segments: &[Segment], offset: isize) -> usize {
    let (Some(first), Some((last, init))) = (segments.first(), segments.split_last()) else {
        return 0;
    };
    if offset < 0 {
        return first.step(first.head, offset);
    }
    let mut remaining = offset as usize;
    for segment in init {
        if remaining <= segment.len() {
            return segment.step(segment.head, remaining as isize);
        }
        remaining -= segment.len();
    }
    last.step(last.head, remaining as isize)
}

fn span_between(segments: &[Segment], from: isize, to: isize) -> Region {
    if from >= to {
        let point = position_at(segments, from);
        return Region::Segment(Segment::new(point, point));
    }

    let last = segments.len() - 1;
    let mut pieces = Vec::with_capacity(segments.len());
    let mut cursor: isize = 0;
    for (idx, segment) in segments.iter().enumerate() {
        let len = segment.len() as isize;
        let lo = if idx == 0 { from } else { from.max(cursor) };
        let hi = if idx == last { to } else { to.min(cursor + len) };
        if lo < hi {
            pieces.push(Segment::new(
                segment.step(segment.head, lo - cursor),
                segment.step(segment.head, hi - cursor),
            ));
        }
        cursor += len;
    }

    match pieces.len() {
        1 => Region::Segment(pieces[0]),
        _ => Region::Regions(pieces),
    }
}

fn resize_segments(segments: &[Segment], modifier: Modifier) -> Region {
    if segments.is_empty() {
        return Region::Regions(Vec::new());
    }
    let len: usize = segments.iter().map(Segment::len).sum();
    match modifier.offsets(len as isize) {
        (offset, None) => {
            let point = position_at(segments, offset);
            Region::Segment(Segment::new(point, point))
        }
        (from, Some(to)) => span_between(segments, from, to),
    }
}
