use crate::Point;
use std::{fmt, num::ParseIntError};

/// Error produced while constructing, parsing or validating geometry
#[derive(Debug)]
pub enum GeometryError {
    /// Circle radius must be at least one
    InvalidRadius(i32),
    /// Shape extent does not fit into the coordinate type
    Overflow,
    /// Point lies outside of the target canvas
    OutOfBounds(Point),
    /// Failed to parse integer value
    InvalidInteger(ParseIntError),
    /// Failed to parse colour, expected `#rrggbb`
    InvalidColor,
    /// Unexpected number of components while parsing
    InvalidArity { expected: usize, found: usize },
    /// JSON error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
    /// PNG encoder error
    #[cfg(feature = "png")]
    Png(png::EncodingError),
    /// IO error propagated while writing output
    IoError(std::io::Error),
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::InvalidRadius(radius) => {
                write!(f, "radius must be positive: {}", radius)
            }
            GeometryError::OutOfBounds(point) => write!(f, "point is out of bounds: {:?}", point),
            GeometryError::InvalidArity { expected, found } => {
                write!(f, "expected {} components, found {}", expected, found)
            }
            _ => write!(f, "GeometryError::{:?}", self),
        }
    }
}

impl From<std::io::Error> for GeometryError {
    fn from(error: std::io::Error) -> Self {
        Self::IoError(error)
    }
}

impl From<ParseIntError> for GeometryError {
    fn from(error: ParseIntError) -> Self {
        Self::InvalidInteger(error)
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for GeometryError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

#[cfg(feature = "png")]
impl From<png::EncodingError> for GeometryError {
    fn from(error: png::EncodingError) -> Self {
        Self::Png(error)
    }
}

impl From<GeometryError> for std::io::Error {
    fn from(error: GeometryError) -> Self {
        match error {
            GeometryError::IoError(error) => error,
            _ => Self::new(std::io::ErrorKind::InvalidData, error),
        }
    }
}

impl std::error::Error for GeometryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeometryError::InvalidInteger(error) => Some(error),
            GeometryError::IoError(error) => Some(error),
            #[cfg(feature = "serde")]
            GeometryError::Json(error) => Some(error),
            #[cfg(feature = "png")]
            GeometryError::Png(error) => Some(error),
            _ => None,
        }
    }
}
