//! Error type.

use core::fmt;

/// Result type with the `gcm` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
///
/// [`Error::AuthenticationFailed`] is the only variant that says anything about the integrity of
/// a message. Every other variant is a usage error detected before any output was produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Key length is not supported by the underlying block cipher.
    InvalidKeyLength,

    /// IV is empty, or longer than 2^64 - 1 bits.
    InvalidIvLength,

    /// Associated data is longer than 2^64 - 1 bits.
    AssociatedDataTooLong,

    /// Message needs more than 2^32 - 2 keystream blocks.
    PlaintextTooLong,

    /// Tag length is not a whole number of bytes between 32 and 128 bits.
    InvalidTagLength,

    /// Computed tag does not match the supplied tag.
    AuthenticationFailed,

    /// Stream was finished with the operation for the opposite direction.
    WrongDirection,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidKeyLength => "invalid key length",
            Error::InvalidIvLength => "invalid IV length",
            Error::AssociatedDataTooLong => "associated data too long",
            Error::PlaintextTooLong => "plaintext too long",
            Error::InvalidTagLength => "invalid tag length",
            Error::AuthenticationFailed => "authentication failed",
            Error::WrongDirection => "stream finished in the wrong direction",
        })
    }
}

impl core::error::Error for Error {}
