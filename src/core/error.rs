use super::types::Axis;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    #[error("dimension mismatch: expected {}x{}, found {}x{}", .expected.0, .expected.1, .found.0, .found.1)]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },

    #[error("{axis} index {index} out of range (len {len})")]
    IndexOutOfRange { axis: Axis, index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, GridError>;
