use geozero::error::GeozeroError;

use crate::de::MAX_PRECISION;

/// Malformed polyshape input. Positions are byte offsets into the input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unsupported key {key:?} at position {position}.")]
    UnsupportedKey { key: char, position: usize },

    #[error("Input ends unexpectedly at position {position}.")]
    Truncated { position: usize },

    #[error("Unexpected key {key:?} inside coordinate data at position {position}.")]
    UnexpectedKey { key: char, position: usize },

    #[error("Invalid character {byte:#04x} at position {position}.")]
    InvalidCharacter { byte: u8, position: usize },

    #[error("Integer overflow at position {position}.")]
    Overflow { position: usize },

    #[error("Input contains no geometry.")]
    Empty,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Invalid polyshape: {0}")]
    Format(#[from] FormatError),

    #[error("Precision {0} is out of range (0..={max}).", max = MAX_PRECISION)]
    Precision(u32),

    #[error("Serde error.")]
    SerdeError(#[from] serde_json::error::Error),

    #[error("Error while processing the geozero geometry.")]
    GeozeroError(#[from] GeozeroError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<Error> for GeozeroError {
    fn from(err: Error) -> Self {
        match err {
            Error::GeozeroError(err) => err,
            other => GeozeroError::Geometry(other.to_string()),
        }
    }
}
