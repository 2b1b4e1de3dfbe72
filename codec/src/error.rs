//! Error types for codec operations.

use std::fmt;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding or encoding a sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Fewer bytes than the fixed sprite header requires.
    TruncatedInput { actual: usize, required: usize },

    /// The nested record stream never reached its `End` record.
    UnterminatedStream { records_read: usize },

    /// Record framing error.
    Wire(wire::DecodeError),

    /// Record framing error while encoding.
    Encode(wire::EncodeError),

    /// Bitstream error inside a record body.
    Bitstream(bitstream::BitError),

    /// A typed record body is inconsistent with its own flags.
    MalformedRecord { code: u16, reason: RecordReason },
}

/// Details for malformed record errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordReason {
    /// A string is not valid in the version's encoding.
    InvalidString,
    /// A string contains NUL or a character the version cannot encode.
    UnencodableString,
    /// A record lacks a field its flags or kind require.
    MissingRequiredField { field: &'static str },
    /// A record carries a field its flags do not announce.
    UnexpectedField { field: &'static str },
    /// A fixed-layout body has bytes left after its last field.
    TrailingBytes { count: usize },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedInput { actual, required } => {
                write!(
                    f,
                    "sprite body too small: {actual} bytes, need at least {required}"
                )
            }
            Self::UnterminatedStream { records_read } => {
                write!(
                    f,
                    "sprite record stream unterminated after {records_read} records"
                )
            }
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Encode(e) => write!(f, "encode error: {e}"),
            Self::Bitstream(e) => write!(f, "bitstream error: {e}"),
            Self::MalformedRecord { code, reason } => {
                write!(f, "malformed record {code}: {reason}")
            }
        }
    }
}

impl fmt::Display for RecordReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidString => write!(f, "string is not valid UTF-8"),
            Self::UnencodableString => {
                write!(f, "string has NUL or characters the version cannot encode")
            }
            Self::MissingRequiredField { field } => {
                write!(f, "missing required field {field}")
            }
            Self::UnexpectedField { field } => {
                write!(f, "field {field} is not announced by the record flags")
            }
            Self::TrailingBytes { count } => {
                write!(f, "{count} trailing bytes after the last field")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Wire(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::Bitstream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wire::DecodeError> for CodecError {
    fn from(err: wire::DecodeError) -> Self {
        match err {
            wire::DecodeError::UnterminatedStream { records_read, .. } => {
                Self::UnterminatedStream { records_read }
            }
            other => Self::Wire(other),
        }
    }
}

impl From<wire::EncodeError> for CodecError {
    fn from(err: wire::EncodeError) -> Self {
        Self::Encode(err)
    }
}

impl From<bitstream::BitError> for CodecError {
    fn from(err: bitstream::BitError) -> Self {
        Self::Bitstream(err)
    }
}
