//! Bit-level writer for encoding SWF record bodies.

use crate::error::{BitError, BitResult};

/// A bit-level writer for encoding packed binary data.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer.
#[derive(Debug, Default)]
pub struct BitWriter {
    /// The accumulated bytes.
    bytes: Vec<u8>,
    /// Current byte being written (not yet pushed to bytes).
    current_byte: u8,
    /// Number of bits written to `current_byte` (0-7).
    bit_count: u8,
}

impl BitWriter {
    /// Creates a new empty `BitWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `BitWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            current_byte: 0,
            bit_count: 0,
        }
    }

    /// Returns the number of bits written so far.
    #[must_use]
    pub fn bits_written(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }

    /// Returns `true` if the next write starts on a byte boundary.
    #[must_use]
    pub const fn is_aligned(&self) -> bool {
        self.bit_count == 0
    }

    /// Writes a single bit.
    pub fn write_bit(&mut self, value: bool) {
        self.current_byte = (self.current_byte << 1) | u8::from(value);
        self.bit_count += 1;
        if self.bit_count == 8 {
            self.bytes.push(self.current_byte);
            self.current_byte = 0;
            self.bit_count = 0;
        }
    }

    /// Writes an unsigned bit value (`UB[bits]`), up to 32 bits.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::InvalidBitCount`] if `bits > 32`.
    /// Returns [`BitError::ValueOutOfRange`] if `value` doesn't fit in `bits`.
    pub fn write_ub(&mut self, value: u32, bits: u8) -> BitResult<()> {
        if bits > 32 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 32 });
        }
        if bits < 32 && u64::from(value) >= (1u64 << bits) {
            return Err(BitError::ValueOutOfRange {
                value: i64::from(value),
                bits,
            });
        }
        self.push_bits(value, bits);
        Ok(())
    }

    /// Writes a signed bit value (`SB[bits]`), up to 32 bits.
    ///
    /// # Errors
    ///
    /// Returns [`BitError::ValueOutOfRange`] if `value` doesn't fit in `bits`
    /// as a two's complement number.
    pub fn write_sb(&mut self, value: i32, bits: u8) -> BitResult<()> {
        if bits > 32 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 32 });
        }
        if sb_bits_needed(value) > bits {
            return Err(BitError::ValueOutOfRange {
                value: i64::from(value),
                bits,
            });
        }
        self.push_bits(value as u32, bits);
        Ok(())
    }

    /// Writes a raw 16.16 fixed-point value (`FB[bits]`).
    pub fn write_fb(&mut self, value: i32, bits: u8) -> BitResult<()> {
        self.write_sb(value, bits)
    }

    /// Pads the current byte with zero bits.
    pub fn align_to_byte(&mut self) {
        while self.bit_count != 0 {
            self.write_bit(false);
        }
    }

    /// Writes a byte-aligned `u8`.
    pub fn write_u8(&mut self, value: u8) -> BitResult<()> {
        self.write_bytes(&[value])
    }

    /// Writes a byte-aligned `u16` (little-endian).
    pub fn write_u16(&mut self, value: u16) -> BitResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a byte-aligned `u32` (little-endian).
    pub fn write_u32(&mut self, value: u32) -> BitResult<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes raw bytes at a byte boundary.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> BitResult<()> {
        self.ensure_aligned()?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }

    /// Writes `bytes` followed by a NUL terminator.
    pub fn write_cstring(&mut self, bytes: &[u8]) -> BitResult<()> {
        self.write_bytes(bytes)?;
        self.bytes.push(0);
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    ///
    /// If the last byte is incomplete, it is padded with zeros on the right.
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        if self.bit_count > 0 {
            self.current_byte <<= 8 - self.bit_count;
            self.bytes.push(self.current_byte);
        }
        self.bytes
    }

    fn ensure_aligned(&self) -> BitResult<()> {
        if self.bit_count != 0 {
            return Err(BitError::MisalignedAccess {
                bit_position: self.bits_written(),
            });
        }
        Ok(())
    }

    fn push_bits(&mut self, value: u32, bits: u8) {
        for i in (0..bits).rev() {
            self.write_bit((value >> i) & 1 == 1);
        }
    }
}

/// Returns the minimal `UB` width that can hold `value`.
#[must_use]
pub const fn ub_bits_needed(value: u32) -> u8 {
    (32 - value.leading_zeros()) as u8
}

/// Returns the minimal `SB` width that can hold `value` (zero for `0`).
#[must_use]
pub const fn sb_bits_needed(value: i32) -> u8 {
    if value == 0 {
        return 0;
    }
    let magnitude = if value < 0 { !value } else { value };
    (33 - magnitude.leading_zeros()) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = BitWriter::new();
        assert_eq!(writer.bits_written(), 0);
        assert!(writer.is_aligned());
        let bytes = writer.finish();
        assert!(bytes.is_empty());
    }

    #[test]
    fn write_single_bit_true() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        assert_eq!(writer.bits_written(), 1);
        let bytes = writer.finish();
        // Single bit 1, padded with 7 zeros = 0b1000_0000
        assert_eq!(bytes, vec![0b1000_0000]);
    }

    #[test]
    fn write_ub_across_byte_boundary() {
        let mut writer = BitWriter::new();
        writer.write_ub(0b1111, 4).unwrap();
        writer.write_ub(0b1010_1010, 8).unwrap();
        let bytes = writer.finish();
        // 1111 + 10101010 = 1111_1010 1010_0000
        assert_eq!(bytes, vec![0b1111_1010, 0b1010_0000]);
    }

    #[test]
    fn write_ub_invalid_count() {
        let mut writer = BitWriter::new();
        let result = writer.write_ub(0, 33);
        assert!(matches!(
            result,
            Err(BitError::InvalidBitCount {
                bits: 33,
                max_bits: 32
            })
        ));
    }

    #[test]
    fn write_ub_value_out_of_range() {
        let mut writer = BitWriter::new();
        let result = writer.write_ub(256, 8);
        assert!(matches!(
            result,
            Err(BitError::ValueOutOfRange {
                value: 256,
                bits: 8
            })
        ));
    }

    #[test]
    fn write_sb_negative() {
        let mut writer = BitWriter::new();
        writer.write_sb(-2, 5).unwrap();
        writer.write_sb(3, 3).unwrap();
        assert_eq!(writer.finish(), vec![0b1111_0011]);
    }

    #[test]
    fn write_sb_rejects_narrow_width() {
        let mut writer = BitWriter::new();
        // 4 needs a sign bit on top of 100
        let err = writer.write_sb(4, 3).unwrap_err();
        assert_eq!(err, BitError::ValueOutOfRange { value: 4, bits: 3 });
    }

    #[test]
    fn aligned_writes_require_alignment() {
        let mut writer = BitWriter::new();
        writer.write_bit(true);
        let err = writer.write_u16(1).unwrap_err();
        assert!(matches!(err, BitError::MisalignedAccess { bit_position: 1 }));
        writer.align_to_byte();
        writer.write_u16(0xBEEF).unwrap();
        assert_eq!(writer.finish(), vec![0b1000_0000, 0xEF, 0xBE]);
    }

    #[test]
    fn write_cstring_appends_nul() {
        let mut writer = BitWriter::new();
        writer.write_cstring(b"hi").unwrap();
        assert_eq!(writer.finish(), b"hi\0".to_vec());
    }

    #[test]
    fn ub_bits_needed_values() {
        assert_eq!(ub_bits_needed(0), 0);
        assert_eq!(ub_bits_needed(1), 1);
        assert_eq!(ub_bits_needed(31), 5);
        assert_eq!(ub_bits_needed(u32::MAX), 32);
    }

    #[test]
    fn sb_bits_needed_values() {
        assert_eq!(sb_bits_needed(0), 0);
        assert_eq!(sb_bits_needed(-1), 1);
        assert_eq!(sb_bits_needed(1), 2);
        assert_eq!(sb_bits_needed(-2), 2);
        assert_eq!(sb_bits_needed(0x1_0000), 18);
        assert_eq!(sb_bits_needed(i32::MIN), 32);
        assert_eq!(sb_bits_needed(i32::MAX), 32);
    }

    #[test]
    fn writer_default() {
        let writer = BitWriter::default();
        assert_eq!(writer.bits_written(), 0);
    }
}
