//! Error types for record framing.

use std::fmt;

/// Result type for record framing operations.
pub type WireResult<T> = Result<T, DecodeError>;

/// Decode errors for record framing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The buffer ended before the `End` record was read, either inside a
    /// record header or inside the body a header declares.
    UnterminatedStream {
        /// Records framed completely before the buffer ran out.
        records_read: usize,
        /// Byte offset of the record the buffer could not complete.
        offset: usize,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific framing limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    BodyBytes,
    RecordCount,
    RecordLength,
}

/// Errors that can occur while framing records for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Record body does not fit the 32-bit length field.
    LengthOverflow { length: usize },
    /// Tag code does not fit in 10 bits or collides with `End`.
    InvalidCode { code: u16 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedStream {
                records_read,
                offset,
            } => {
                write!(
                    f,
                    "record stream ended at byte {offset} after {records_read} records without an End record"
                )
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BodyBytes => "body bytes",
            Self::RecordCount => "record count",
            Self::RecordLength => "record length",
        };
        write!(f, "{name}")
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthOverflow { length } => {
                write!(f, "length overflow: {length}")
            }
            Self::InvalidCode { code } => {
                write!(f, "invalid tag code: {code}")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

impl std::error::Error for EncodeError {}
