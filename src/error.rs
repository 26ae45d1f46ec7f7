//! Error types shared by the header codec, options codec and checksum engine.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while encoding, decoding or validating a TCP segment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied (or received) field holds an out-of-range or
    /// inconsistent value.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Not enough bytes to decode the claimed structure.
    #[error("truncated input: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    /// The options region violates the kind/length encoding rules.
    #[error("malformed options at byte {offset}: {cause}")]
    MalformedOptions { offset: usize, cause: OptionError },

    /// The segment checksum does not validate against the pseudo-header.
    #[error("checksum mismatch: received {received:#06x}, computed {computed:#06x}")]
    ChecksumMismatch { received: u16, computed: u16 },
}

impl Error {
    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Option-level cause carried by [`Error::MalformedOptions`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionError {
    /// A length byte of 0 or 1, which cannot even cover the kind and length bytes.
    #[error("illegal length {length} for option kind {kind}")]
    IllegalLength { kind: u8, length: u8 },

    /// The declared length runs past the end of the options region.
    #[error("option kind {kind} declares {length} bytes but only {remaining} remain")]
    LengthExceedsBuffer {
        kind: u8,
        length: u8,
        remaining: usize,
    },

    /// The options region ends right after a kind byte that needs a length byte.
    #[error("option kind {kind} is missing its length byte")]
    MissingLength { kind: u8 },

    /// Maximum segment size must always be exactly 4 bytes long.
    #[error("maximum segment size option has length {length}, expected 4")]
    BadMssLength { length: u8 },
}
