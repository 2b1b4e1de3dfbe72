//! Record stream framing: the generic reader and writer for tag lists.

use crate::error::{DecodeError, EncodeError, LimitKind, WireResult};
use crate::header::{RecordHeader, END_CODE, MAX_CODE};
use crate::limits::Limits;

/// A framed record inside a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireRecord<'a> {
    pub code: u16,
    pub body: &'a [u8],
    /// Whether the record arrived with a long-form header.
    pub long_header: bool,
}

/// The records of one stream, in order, without the `End` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStream<'a> {
    pub records: Vec<WireRecord<'a>>,
    /// Bytes consumed up to and including the `End` record.
    pub consumed: usize,
}

/// Frames records from `buf` until the `End` record.
///
/// Bytes after the `End` record are not examined; `consumed` tells the
/// caller where the stream stopped.
pub fn read_records<'a>(buf: &'a [u8], limits: &Limits) -> WireResult<RecordStream<'a>> {
    if buf.len() > limits.max_body_bytes {
        return Err(DecodeError::LimitsExceeded {
            kind: LimitKind::BodyBytes,
            limit: limits.max_body_bytes,
            actual: buf.len(),
        });
    }

    let mut offset = 0usize;
    let mut records = Vec::new();

    loop {
        let unterminated = DecodeError::UnterminatedStream {
            records_read: records.len(),
            offset,
        };
        let header = RecordHeader::parse(&buf[offset..]).ok_or_else(|| unterminated.clone())?;
        let body_start = offset + header.encoded_len();
        let len = usize::try_from(header.len).unwrap_or(usize::MAX);
        let available = buf.len() - body_start;

        if header.is_end() {
            // Tolerate a body on the End record, but it still has to be there.
            if len > available {
                return Err(unterminated);
            }
            return Ok(RecordStream {
                records,
                consumed: body_start + len,
            });
        }

        if records.len() >= limits.max_records {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::RecordCount,
                limit: limits.max_records,
                actual: records.len() + 1,
            });
        }
        if len > limits.max_record_len {
            return Err(DecodeError::LimitsExceeded {
                kind: LimitKind::RecordLength,
                limit: limits.max_record_len,
                actual: len,
            });
        }
        if len > available {
            return Err(unterminated);
        }

        records.push(WireRecord {
            code: header.code,
            body: &buf[body_start..body_start + len],
            long_header: header.long,
        });
        offset = body_start + len;
    }
}

/// Appends one framed record to `out` and returns the bytes written.
///
/// The short header form is used unless `long_header` is set or the body is
/// 63 bytes or longer.
pub fn write_record(
    out: &mut Vec<u8>,
    code: u16,
    body: &[u8],
    long_header: bool,
) -> Result<usize, EncodeError> {
    if code == END_CODE || code > MAX_CODE {
        return Err(EncodeError::InvalidCode { code });
    }
    let len =
        u32::try_from(body.len()).map_err(|_| EncodeError::LengthOverflow { length: body.len() })?;
    let header = RecordHeader {
        code,
        len,
        long: long_header,
    };
    let written = header.write(out);
    out.extend_from_slice(body);
    Ok(written + body.len())
}

/// Appends the `End` record to `out` and returns the bytes written.
pub fn write_end(out: &mut Vec<u8>) -> usize {
    RecordHeader::end().write(out)
}
