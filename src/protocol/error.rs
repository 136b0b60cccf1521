//! Codec error types

use thiserror::Error;

/// Errors raised while framing an outbound packet
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Dataref name does not fit the fixed subscribe name field
    #[error("dataref name too long: {len} bytes with terminator (max {max})")]
    NameTooLong {
        /// Name length including the NUL terminator
        len: usize,
        /// Size of the name field
        max: usize,
    },

    /// Dataref name contains a NUL byte and cannot be NUL-terminated
    #[error("dataref name contains an interior NUL at byte {position}")]
    InvalidName {
        /// Offset of the first NUL byte
        position: usize,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
