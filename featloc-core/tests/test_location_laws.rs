//! Algebraic laws of the location model, checked over a spread of values
//! covering every variant and every partiality combination.

use featloc_core::models::{Location, Partial};
use pretty_assertions::assert_eq;
use rstest::*;

const PARTIALS: [Partial; 4] = [Partial::COMPLETE, Partial::START, Partial::END, Partial::BOTH];

fn range(start: usize, end: usize) -> Location {
    Location::range(start, end).unwrap()
}

#[fixture]
fn locations() -> Vec<Location> {
    let mut locs = vec![
        Location::Between(0),
        Location::Between(3),
        Location::Point(0),
        Location::Point(3),
        Location::ambiguous(3, 5).unwrap(),
        Location::ambiguous(3, 6).unwrap(),
        Location::join(vec![range(3, 5), range(7, 9)]).unwrap(),
        Location::join(vec![range(3, 5), range(8, 9)]).unwrap(),
        Location::join(vec![Location::Point(3), range(7, 9)]).unwrap(),
        Location::order(vec![range(3, 5), range(7, 9)]).unwrap(),
        Location::order(vec![Location::ambiguous(3, 5).unwrap(), range(7, 9)]).unwrap(),
    ];
    for (start, end) in [(3, 5), (3, 6), (4, 5)] {
        for partial in PARTIALS {
            locs.push(Location::partial_range(start, end, partial).unwrap());
        }
    }
    locs
}

#[rstest]
fn test_ordering_is_total(locations: Vec<Location>) {
    for a in &locations {
        for b in &locations {
            let outcomes = [a.less(b), b.less(a), a == b];
            assert_eq!(
                outcomes.iter().filter(|&&x| x).count(),
                1,
                "{} vs {}: {:?}",
                a,
                b,
                outcomes
            );
        }
    }
}

#[rstest]
fn test_ordering_is_transitive(locations: Vec<Location>) {
    for a in &locations {
        for b in &locations {
            for c in &locations {
                if a.less(b) && b.less(c) {
                    assert!(a.less(c), "{} < {} < {}", a, b, c);
                }
            }
        }
    }
}

#[rstest]
fn test_ordering_ignores_complement(locations: Vec<Location>) {
    for a in &locations {
        for b in &locations {
            assert_eq!(a.complement().less(b), a.less(b));
            assert_eq!(a.less(&b.complement()), a.less(b));
        }
    }
}

#[rstest]
fn test_partial_ends_order_same_span() {
    let ranges: Vec<Location> = PARTIALS
        .iter()
        .map(|&p| Location::partial_range(3, 5, p).unwrap())
        .collect();
    let mut sorted = ranges.clone();
    sorted.sort_by(|a, b| a.cmp_position(b));
    let rendered: Vec<String> = sorted.iter().map(|l| l.to_string()).collect();
    assert_eq!(rendered, vec!["<4..5", "<4..>5", "4..5", "4..>5"]);
}

#[rstest]
fn test_render_parse_round_trip(locations: Vec<Location>) {
    for loc in &locations {
        for value in [loc.clone(), loc.complement()] {
            let text = value.to_string();
            let parsed: Location = text.parse().unwrap();
            assert_eq!(parsed, value);
            assert_eq!(parsed.to_string(), text);
        }
    }
}

#[rstest]
fn test_reverse_is_involution(locations: Vec<Location>) {
    for loc in &locations {
        for len in [9, 12, 20] {
            assert_eq!(loc.reverse(len).reverse(len), *loc, "{} over {}", loc, len);
            assert_eq!(loc.reverse(len).len(), loc.len());
        }
    }
}

#[rstest]
fn test_shift_then_unshift(locations: Vec<Location>) {
    for loc in &locations {
        for at in [0, 2, 3, 4, 5, 6, 9, 12] {
            for by in [1, 2, 5] {
                let there = loc.shift(at, by, true);
                let back = there.shift(at, -by, true);
                assert_eq!(back, *loc, "{} shifted by {} at {}", loc, by, at);
            }
        }
    }
}

#[rstest]
fn test_complement_symmetry(locations: Vec<Location>) {
    for loc in &locations {
        let cmp = loc.complement();
        assert_eq!(cmp.len(), loc.len());
        assert_eq!(cmp.complement().to_string(), loc.to_string());
        assert_eq!(cmp.regions().len(), loc.regions().len());
    }
}
