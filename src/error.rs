use std::fmt::{self, Debug, Display};

/// Provides `EntityError`, the single error type for container mutations.
///
/// Reads never produce this type; lookups that find nothing return `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// A position-based mutation addressed an index outside `[0, len)`.
    IndexOutOfBounds { index: usize, len: usize },
    /// A sub-range request was invalid: `start > end` or `end > len`.
    RangeOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
    /// A removal could not locate its target entity or key.
    NotFound(String),
}

impl From<String> for EntityError {
    fn from(message: String) -> Self {
        EntityError::NotFound(message)
    }
}

impl From<&str> for EntityError {
    fn from(message: &str) -> Self {
        EntityError::NotFound(message.to_string())
    }
}

impl std::error::Error for EntityError {}

impl Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EntityError::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            EntityError::RangeOutOfBounds { start, end, len } => {
                write!(f, "range {start}..{end} out of bounds for length {len}")
            }
            EntityError::NotFound(message) => write!(f, "{message}"),
        }
    }
}
