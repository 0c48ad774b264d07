//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid configuration, operations attempted before a grid was built or baked,
//! out-of-range cell and world lookups, missing terrain, and cancelled bakes.
//!
//! A ray that misses the terrain is not an error: it is recorded as an unsampled cell.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("grid geometry has not been built")]
    NotBuilt,

    #[error("height cache is not baked or fails validation")]
    NotBaked,

    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i64, y: i64 },

    #[error("world position ({x}, {y}) is outside the baked grid")]
    OutsideGrid { x: f32, y: f32 },

    #[error("no terrain configured")]
    MissingTerrain,

    #[error("bake cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        assert!(matches!(err, Error::Other(_)));
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn out_of_bounds_message_names_cell() {
        let err = Error::OutOfBounds { x: -1, y: 3 };
        assert_eq!(err.to_string(), "cell (-1, 3) is outside the grid");
    }
}
