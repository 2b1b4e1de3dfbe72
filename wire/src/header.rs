//! Record header layout and constants.

/// Tag code of the `End` record that terminates a record stream.
pub const END_CODE: u16 = 0;

/// Largest tag code that fits the 10-bit code field.
pub const MAX_CODE: u16 = 0x3FF;

/// Length field value that marks a long-form header.
pub const LONG_LENGTH_MARKER: u16 = 0x3F;

/// Size of a short-form header in bytes.
pub const SHORT_HEADER_SIZE: usize = 2;

/// Size of a long-form header in bytes.
pub const LONG_HEADER_SIZE: usize = 6;

/// A decoded `RECORDHEADER`.
///
/// The first `u16` (little-endian) packs the tag code in the upper 10 bits
/// and the body length in the lower 6. A length of `0x3F` means the real
/// length follows as a `u32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    /// Tag code.
    pub code: u16,
    /// Body length in bytes.
    pub len: u32,
    /// Whether the header used the long form on the wire.
    pub long: bool,
}

impl RecordHeader {
    /// Returns the `End` header.
    #[must_use]
    pub const fn end() -> Self {
        Self {
            code: END_CODE,
            len: 0,
            long: false,
        }
    }

    /// Returns `true` if this is the `End` sentinel.
    ///
    /// Only the code is checked; a stray body on an `End` record is skipped.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.code == END_CODE
    }

    /// Number of bytes the header occupies on the wire.
    #[must_use]
    pub const fn encoded_len(&self) -> usize {
        if self.needs_long_form() {
            LONG_HEADER_SIZE
        } else {
            SHORT_HEADER_SIZE
        }
    }

    /// Returns `true` if this header must be written in the long form.
    #[must_use]
    pub const fn needs_long_form(&self) -> bool {
        self.long || self.len >= LONG_LENGTH_MARKER as u32
    }

    /// Parses a header at the start of `buf`.
    ///
    /// Returns `None` if `buf` is too short to hold the full header.
    #[must_use]
    pub fn parse(buf: &[u8]) -> Option<Self> {
        let first = u16::from_le_bytes([*buf.first()?, *buf.get(1)?]);
        let code = first >> 6;
        let short_len = first & LONG_LENGTH_MARKER;
        if short_len != LONG_LENGTH_MARKER {
            return Some(Self {
                code,
                len: u32::from(short_len),
                long: false,
            });
        }
        let len_bytes = buf.get(SHORT_HEADER_SIZE..LONG_HEADER_SIZE)?;
        let len = u32::from_le_bytes([len_bytes[0], len_bytes[1], len_bytes[2], len_bytes[3]]);
        Some(Self {
            code,
            len,
            long: true,
        })
    }

    /// Appends the header to `out` and returns the bytes written.
    ///
    /// The caller guarantees `code <= MAX_CODE`.
    pub fn write(&self, out: &mut Vec<u8>) -> usize {
        if self.needs_long_form() {
            let first = (self.code << 6) | LONG_LENGTH_MARKER;
            out.extend_from_slice(&first.to_le_bytes());
            out.extend_from_slice(&self.len.to_le_bytes());
            LONG_HEADER_SIZE
        } else {
            let first = (self.code << 6) | self.len as u16;
            out.extend_from_slice(&first.to_le_bytes());
            SHORT_HEADER_SIZE
        }
    }
}
