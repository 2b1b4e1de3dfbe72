//! SWF record framing for sprite bodies.
//!
//! This crate handles the tag stream layout: `RECORDHEADER` parsing in its
//! short and long forms, the `End` sentinel, and limit enforcement. It does
//! not know what any tag means, only how tags are framed.
//!
//! # Design Principles
//!
//! - **Stable wire format** - Headers follow the SWF `RECORDHEADER` layout exactly.
//! - **Bounded decoding** - All length fields are validated against limits before slicing.
//! - **No domain knowledge** - This crate handles framing, not placement or geometry.

mod error;
mod header;
mod limits;
mod stream;

pub use error::{DecodeError, EncodeError, LimitKind, WireResult};
pub use header::{
    RecordHeader, END_CODE, LONG_HEADER_SIZE, LONG_LENGTH_MARKER, MAX_CODE, SHORT_HEADER_SIZE,
};
pub use limits::Limits;
pub use stream::{read_records, write_end, write_record, RecordStream, WireRecord};
