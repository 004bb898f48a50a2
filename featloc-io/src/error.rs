use thiserror::Error;

use featloc_core::errors::ParseError;

/// Error type for the qualifier record grammar.
///
/// Positions are byte offsets into the parsed input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QualifierError {
    /// The record does not start with the expected indentation.
    #[error("Expected {indent} spaces of indentation at position {position}")]
    MissingPrefix { position: usize, indent: usize },

    #[error("Expected `/` at position {position}")]
    MissingSlash { position: usize },

    #[error("Expected a qualifier key at position {position}")]
    InvalidKey { position: usize },

    /// A flag-only key was given a value.
    #[error("/{key} does not take a value (position {position})")]
    UnexpectedValue { key: String, position: usize },

    /// A key that requires a value was given none.
    #[error("/{key} requires a value (position {position})")]
    MissingValue { key: String, position: usize },

    /// The value syntax is not one the key accepts.
    #[error("/{key} does not accept a {form} value (position {position})")]
    InvalidForm {
        key: String,
        form: &'static str,
        position: usize,
    },

    #[error("Unterminated {form} value starting at position {position}")]
    Unterminated { form: &'static str, position: usize },

    /// A continuation line is not indented to the record prefix.
    #[error("Continuation line must be indented by {indent} spaces (position {position})")]
    BadContinuation { position: usize, indent: usize },

    #[error("Unexpected character {found:?} at position {position}")]
    UnexpectedChar { position: usize, found: char },

    #[error("Trailing input at position {position}")]
    TrailingInput { position: usize },
}

impl QualifierError {
    pub fn position(&self) -> usize {
        match self {
            QualifierError::MissingPrefix { position, .. }
            | QualifierError::MissingSlash { position }
            | QualifierError::InvalidKey { position }
            | QualifierError::UnexpectedValue { position, .. }
            | QualifierError::MissingValue { position, .. }
            | QualifierError::InvalidForm { position, .. }
            | QualifierError::Unterminated { position, .. }
            | QualifierError::BadContinuation { position, .. }
            | QualifierError::UnexpectedChar { position, .. }
            | QualifierError::TrailingInput { position } => *position,
        }
    }
}

/// Error type for feature table records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeatureError {
    /// The line fits neither the feature key column nor the qualifier column.
    #[error("Line {line} is not indented as a feature record")]
    MissingIndent { line: usize },

    #[error("Missing location for feature at line {line}")]
    MissingLocation { line: usize },

    #[error("Expected a single feature record, found {0}")]
    RecordCount(usize),

    #[error("Invalid location: {0}")]
    Location(#[from] ParseError),

    #[error("Invalid qualifier: {0}")]
    Qualifier(#[from] QualifierError),
}

pub type QualifierResult<T> = std::result::Result<T, QualifierError>;
pub type FeatureResult<T> = std::result::Result<T, FeatureError>;
