use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A position or window reaches past the end of the sequence.
    #[error("Position {pos} is out of bounds for a sequence of length {len}")]
    OutOfBounds { pos: usize, len: usize },
}

pub type EditResult<T> = std::result::Result<T, EditError>;
