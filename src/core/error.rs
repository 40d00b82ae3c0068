use std::fmt;

pub type Result<T> = std::result::Result<T, VectorError>;

/// Names a coordinate in error messages.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Everything that can go wrong when building or operating on a vector.
///
/// All variants are raised at the point of detection and nothing inside the crate recovers from
/// them. [`VectorError::Unsupported`] is only produced when a caller turns a soft
/// [`OpResult::Unsupported`](crate::core::ops::OpResult::Unsupported) into a hard error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum VectorError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("{axis} coordinate: {type_name} value not convertible to float")]
    NotNumeric { axis: Axis, type_name: String },
    #[error("cannot use {0} as a vector-like")]
    NotVectorLike(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("index {0} out of range for a 2D vector")]
    IndexOutOfRange(usize),
    #[error("no component named {0:?}")]
    KeyNotFound(String),
    #[error("operation not supported: {0}")]
    Unsupported(&'static str),
}
