use thiserror::Error;

/// Raised when a location value is built from arguments that break its
/// invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Range start {start} is greater than its end {end}")]
    InvalidRange { start: usize, end: usize },

    #[error("Ambiguous lower bound {lo} must be less than its upper bound {hi}")]
    InvalidAmbiguous { lo: usize, hi: usize },

    #[error("Junction {anchor}^{next} must join adjacent bases")]
    InvalidBetween { anchor: usize, next: usize },

    #[error("join() requires at least one location")]
    EmptyJoin,

    #[error("order() requires at least one location")]
    EmptyOrder,
}

/// Syntax error raised by the location grammar.
///
/// Every variant carries the byte offset into the input where parsing
/// stopped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of input at position {position}: expected {expected}")]
    UnexpectedEnd {
        position: usize,
        expected: &'static str,
    },

    #[error("Unexpected character {found:?} at position {position}: expected {expected}")]
    UnexpectedChar {
        position: usize,
        found: char,
        expected: &'static str,
    },

    #[error("Trailing input at position {position}")]
    TrailingInput { position: usize },

    #[error("Invalid number at position {position}: {reason}")]
    InvalidNumber { position: usize, reason: String },

    #[error("Invalid location at position {position}: {source}")]
    Invalid {
        position: usize,
        #[source]
        source: LocationError,
    },

    #[error("Location nested deeper than {limit} levels at position {position}")]
    TooDeep { position: usize, limit: usize },
}

impl ParseError {
    /// Byte offset of the offending input.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedEnd { position, .. }
            | ParseError::UnexpectedChar { position, .. }
            | ParseError::TrailingInput { position }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::Invalid { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModifierError {
    #[error("Empty modifier")]
    Empty,

    #[error("Modifier endpoint must start with `^` or `$`: {0}")]
    InvalidAnchor(String),

    #[error("Invalid modifier offset: {0}")]
    InvalidOffset(String),

    #[error("`$..^` is not a valid modifier")]
    InvertedEnds,
}

pub type LocationResult<T> = std::result::Result<T, LocationError>;
pub type ParseResult<T> = std::result::Result<T, ParseError>;
