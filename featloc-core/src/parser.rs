//! Parser for the GenBank location grammar.
//!
//! ```text
//! location   := complement | join | order | simple
//! complement := "complement(" location ")"
//! join       := "join(" location ("," " "* location)* ")"
//! order      := "order(" location ("," " "* location)* ")"
//! simple     := n "^" n+1 | "<"? n ".." (">" n | n ">"?) | n "." n | n
//! ```
//!
//! Rendering is the `Display` implementation of [`Location`]. Spaces after
//! commas and a trailing `>` are accepted on input but never rendered.
use std::str::FromStr;

use log::trace;

use crate::errors::{LocationError, ParseError, ParseResult};
use crate::models::location::{Ambiguous, Location, Partial, Ranged};

/// Deepest nesting of `complement(`, `join(` and `order(` the parser accepts.
pub const MAX_NESTING: usize = 64;

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input,
            pos: 0,
            depth: 0,
        }
    }

    // Run `f` one nesting level down, failing once the limit is reached.
    fn nested<T>(&mut self, start: usize, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth == MAX_NESTING {
            return Err(ParseError::TooDeep {
                position: start,
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_spaces(&mut self) {
        while self.eat(' ') {}
    }

    fn error(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            None => ParseError::UnexpectedEnd {
                position: self.pos,
                expected,
            },
            Some(found) => ParseError::UnexpectedChar {
                position: self.pos,
                found,
                expected,
            },
        }
    }

    fn expect(&mut self, c: char, expected: &'static str) -> ParseResult<()> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn number(&mut self, expected: &'static str) -> ParseResult<usize> {
        let start = self.pos;
        let digits = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 {
            return Err(self.error(expected));
        }
        self.pos += digits;
        self.input[start..self.pos]
            .parse::<usize>()
            .map_err(|e| ParseError::InvalidNumber {
                position: start,
                reason: e.to_string(),
            })
    }

    // A 1-based coordinate converted to its 0-based index.
    fn position(&mut self, expected: &'static str) -> ParseResult<usize> {
        let start = self.pos;
        match self.number(expected)? {
            0 => Err(ParseError::InvalidNumber {
                position: start,
                reason: "positions are 1-based".to_string(),
            }),
            n => Ok(n - 1),
        }
    }
}

fn invalid(position: usize) -> impl FnOnce(LocationError) -> ParseError {
    move |source| ParseError::Invalid { position, source }
}

fn location(cur: &mut Cursor) -> ParseResult<Location> {
    let start = cur.pos;
    if cur.eat_str("complement(") {
        let inner = cur.nested(start, location)?;
        cur.expect(')', "`)`")?;
        return Ok(Location::Complement(Box::new(inner)));
    }
    if cur.eat_str("join(") {
        return Location::join(cur.nested(start, children)?).map_err(invalid(start));
    }
    if cur.eat_str("order(") {
        return Location::order(cur.nested(start, children)?).map_err(invalid(start));
    }
    simple(cur)
}

fn children(cur: &mut Cursor) -> ParseResult<Vec<Location>> {
    let mut list = vec![location(cur)?];
    while cur.eat(',') {
        cur.skip_spaces();
        list.push(location(cur)?);
    }
    cur.expect(')', "`,` or `)`")?;
    Ok(list)
}

fn simple(cur: &mut Cursor) -> ParseResult<Location> {
    let start = cur.pos;
    let partial_start = cur.eat('<');

    if !partial_start {
        // a junction anchor is printed as-is, so it may be zero
        let anchor_pos = cur.pos;
        let anchor = cur.number("a location")?;
        if cur.eat('^') {
            let next_pos = cur.pos;
            let next = cur.number("a position after `^`")?;
            if next != anchor + 1 {
                return Err(ParseError::Invalid {
                    position: next_pos,
                    source: LocationError::InvalidBetween { anchor, next },
                });
            }
            return Ok(Location::Between(anchor));
        }
        cur.pos = anchor_pos;
    }

    let lo = cur.position("a location")?;

    if cur.eat_str("..") {
        let mut partial_end = cur.eat('>');
        let end = cur.number("an end position")?;
        if !partial_end {
            partial_end = cur.eat('>');
        }
        let partial = Partial::new(partial_start, partial_end);
        return Ranged::with_partial(lo, end, partial)
            .map(Location::Range)
            .map_err(invalid(start));
    }

    if partial_start {
        return Err(cur.error("`..`"));
    }

    if cur.eat('.') {
        let hi = cur.number("an upper bound")?;
        return Ambiguous::new(lo, hi)
            .map(Location::Ambiguous)
            .map_err(invalid(start));
    }

    Ok(Location::Point(lo))
}

/// Parse a location at the start of `input`, returning it along with the
/// unconsumed remainder.
pub fn parse_location_prefix(input: &str) -> ParseResult<(Location, &str)> {
    let mut cur = Cursor::new(input);
    let loc = location(&mut cur).inspect_err(|e| {
        trace!("location parse failed at {}: {}", e.position(), e);
    })?;
    Ok((loc, cur.rest()))
}

impl FromStr for Location {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (loc, rest) = parse_location_prefix(s)?;
        if !rest.is_empty() {
            let position = s.len() - rest.len();
            trace!("trailing input after location at {}", position);
            return Err(ParseError::TrailingInput { position });
        }
        Ok(loc)
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

    #[rstest]
    #[case("0^1", Location::Between(0))]
    #[case("1", Location::Point(0))]
    #[case("1..2", range(0, 2))]
    #[case("<1..2", Location::partial_range(0, 2, Partial::START).unwrap())]
    #[case("1..>2", Location::partial_range(0, 2, Partial::END).unwrap())]
    #[case("<1..>2", Location::partial_range(0, 2, Partial::BOTH).unwrap())]
    #[case("1..2>", Location::partial_range(0, 2, Partial::END).unwrap())]
    #[case("<1..2>", Location::partial_range(0, 2, Partial::BOTH).unwrap())]
    #[case("1.2", Location::ambiguous(0, 2).unwrap())]
    #[case("complement(1..2)", range(0, 2).complement())]
    #[case("join(1..2,4..5)", Location::join(vec![range(0, 2), range(3, 5)]).unwrap())]
    #[case("join(1..2, 4..5)", Location::join(vec![range(0, 2), range(3, 5)]).unwrap())]
    #[case("order(1..2,3..4)", Location::order(vec![range(0, 2), range(2, 4)]).unwrap())]
    #[case("order(1..2, 3..4)", Location::order(vec![range(0, 2), range(2, 4)]).unwrap())]
    fn test_parse(#[case] text: &str, #[case] expected: Location) {
        assert_eq!(text.parse::<Location>(), Ok(expected));
    }

    #[rstest]
    #[case("0^1")]
    #[case("41^42")]
    #[case("467")]
    #[case("340..565")]
    #[case("<345..500")]
    #[case("<1..888")]
    #[case("1..>888")]
    #[case("<1..>888")]
    #[case("102.110")]
    #[case("complement(34..126)")]
    #[case("join(12..78,134..202)")]
    #[case("complement(join(2691..4571,4918..5163))")]
    #[case("join(complement(4918..5163),complement(2691..4571))")]
    #[case("order(1..2,join(4..5,complement(7..8)),10.12)")]
    fn test_round_trip(#[case] text: &str) {
        let loc: Location = text.parse().unwrap();
        assert_eq!(loc.to_string(), text);
        assert_eq!(loc.to_string().parse::<Location>(), Ok(loc));
    }

    #[rstest]
    #[case("")]
    #[case("?")]
    #[case("0")]
    #[case("1?")]
    #[case("1^?")]
    #[case("1^3")]
    #[case("1??")]
    #[case("1..?")]
    #[case("3..1")]
    #[case("<1")]
    #[case("<0^1")]
    #[case("1.?")]
    #[case("2.1")]
    #[case("1..>2>")]
    #[case("complement?")]
    #[case("complement(?")]
    #[case("complement(1..2")]
    #[case("complement(1..2?")]
    #[case("join?")]
    #[case("join(")]
    #[case("join()")]
    #[case("join(1..2,?")]
    #[case("join(1..2,3..5")]
    #[case("join(1..2,3..5?")]
    #[case("order(")]
    #[case("order()")]
    #[case("order(1..2,?")]
    #[case("order(1..2,3..5")]
    #[case("order(1..2,3..5?")]
    fn test_parse_fails(#[case] text: &str) {
        assert!(text.parse::<Location>().is_err(), "{:?} should not parse", text);
    }

    #[rstest]
    #[case("", 0)]
    #[case("join(1..2,?", 10)]
    #[case("join(1..2,3..5", 14)]
    #[case("1..2x", 4)]
    #[case("1^3", 2)]
    #[case("complement(3..1)", 11)]
    fn test_error_position(#[case] text: &str, #[case] position: usize) {
        let err = text.parse::<Location>().unwrap_err();
        assert_eq!(err.position(), position);
    }

    #[rstest]
    #[case("complement(", ")")]
    #[case("join(", ")")]
    #[case("order(1,", ")")]
    fn test_nesting_limit(#[case] open: &str, #[case] close: &str) {
        let nest = |depth: usize| format!("{}1{}", open.repeat(depth), close.repeat(depth));

        let deepest = nest(MAX_NESTING).parse::<Location>().unwrap();
        assert_eq!(deepest.to_string(), nest(MAX_NESTING));

        assert_eq!(
            nest(MAX_NESTING + 1).parse::<Location>(),
            Err(ParseError::TooDeep {
                position: MAX_NESTING * open.len(),
                limit: MAX_NESTING
            })
        );
    }

    #[rstest]
    fn test_runaway_nesting_fails() {
        let depth = 200_000;
        let text = format!("{}1{}", "complement(".repeat(depth), ")".repeat(depth));
        let err = text.parse::<Location>().unwrap_err();
        assert!(matches!(err, ParseError::TooDeep { .. }), "{}", err);
    }

    #[rstest]
    fn test_parse_prefix() {
        let (loc, rest) = parse_location_prefix("join(1..2,4..5)\n/gene=\"x\"").unwrap();
        assert_eq!(loc.to_string(), "join(1..2,4..5)");
        assert_eq!(rest, "\n/gene=\"x\"");
    }
}
