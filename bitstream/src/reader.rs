//! Bit-level reader with bounded operations.

use crate::error::{BitError, BitResult};

/// A bit-level reader for decoding SWF record bodies.
///
/// Bits are consumed most-significant first, byte-aligned integers are
/// little-endian. All read operations are bounds-checked and return errors
/// on failure. The reader never panics on malformed input.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    /// Creates a new `BitReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Returns the number of bits remaining to read.
    #[must_use]
    pub const fn bits_remaining(&self) -> usize {
        self.data
            .len()
            .saturating_mul(8)
            .saturating_sub(self.bit_pos)
    }

    /// Returns `true` if there are no more bits to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits_remaining() == 0
    }

    /// Returns the current bit position.
    #[must_use]
    pub const fn bit_position(&self) -> usize {
        self.bit_pos
    }

    /// Returns the byte offset of the next aligned read.
    ///
    /// A partially consumed byte counts as consumed.
    #[must_use]
    pub const fn byte_position(&self) -> usize {
        self.bit_pos.div_ceil(8)
    }

    /// Reads a single bit as a boolean.
    pub fn read_bit(&mut self) -> BitResult<bool> {
        if self.bits_remaining() == 0 {
            return Err(BitError::UnexpectedEof {
                requested: 1,
                available: 0,
            });
        }
        let byte_idx = self.bit_pos / 8;
        let bit_idx = self.bit_pos % 8;
        let bit = (self.data[byte_idx] >> (7 - bit_idx)) & 1;
        self.bit_pos += 1;
        Ok(bit == 1)
    }

    /// Reads an unsigned bit value (`UB[bits]`), up to 32 bits.
    pub fn read_ub(&mut self, bits: u8) -> BitResult<u32> {
        if bits > 32 {
            return Err(BitError::InvalidBitCount { bits, max_bits: 32 });
        }
        if bits == 0 {
            return Ok(0);
        }
        self.ensure_bits(bits as usize)?;

        let mut value = 0u32;
        for _ in 0..bits {
            value = (value << 1) | u32::from(self.read_bit()?);
        }
        Ok(value)
    }

    /// Reads a sign-extended bit value (`SB[bits]`), up to 32 bits.
    pub fn read_sb(&mut self, bits: u8) -> BitResult<i32> {
        let raw = self.read_ub(bits)?;
        if bits == 0 || bits == 32 {
            return Ok(raw as i32);
        }
        let shift = 32 - u32::from(bits);
        Ok(((raw << shift) as i32) >> shift)
    }

    /// Reads a 16.16 fixed-point bit value (`FB[bits]`) as its raw `i32`.
    pub fn read_fb(&mut self, bits: u8) -> BitResult<i32> {
        self.read_sb(bits)
    }

    /// Skips to the next byte boundary.
    pub fn align_to_byte(&mut self) -> BitResult<()> {
        let rem = self.bit_pos % 8;
        if rem == 0 {
            return Ok(());
        }
        let skip = 8 - rem;
        self.ensure_bits(skip)?;
        self.bit_pos += skip;
        Ok(())
    }

    /// Reads a byte-aligned `u8`.
    pub fn read_u8(&mut self) -> BitResult<u8> {
        let [value] = self.read_aligned_bytes::<1>()?;
        Ok(value)
    }

    /// Reads a byte-aligned `u16` (little-endian).
    pub fn read_u16(&mut self) -> BitResult<u16> {
        let bytes = self.read_aligned_bytes::<2>()?;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Reads a byte-aligned `u32` (little-endian).
    pub fn read_u32(&mut self) -> BitResult<u32> {
        let bytes = self.read_aligned_bytes::<4>()?;
        Ok(u32::from_le_bytes(bytes))
    }

    /// Reads `len` byte-aligned bytes.
    pub fn read_bytes(&mut self, len: usize) -> BitResult<&'a [u8]> {
        self.ensure_aligned()?;
        self.ensure_bits(len.saturating_mul(8))?;
        let idx = self.bit_pos / 8;
        let bytes = &self.data[idx..idx + len];
        self.bit_pos += len * 8;
        Ok(bytes)
    }

    /// Reads a NUL-terminated string and returns its bytes without the NUL.
    pub fn read_cstring(&mut self) -> BitResult<&'a [u8]> {
        self.ensure_aligned()?;
        let start = self.bit_pos / 8;
        let len = self.data[start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(BitError::UnterminatedString { start })?;
        let bytes = &self.data[start..start + len];
        self.bit_pos += (len + 1) * 8;
        Ok(bytes)
    }

    /// Returns every byte from the next byte boundary to the end and
    /// exhausts the reader.
    pub fn read_remaining(&mut self) -> &'a [u8] {
        let start = self.byte_position().min(self.data.len());
        self.bit_pos = self.data.len() * 8;
        &self.data[start..]
    }

    fn ensure_aligned(&self) -> BitResult<()> {
        if self.bit_pos % 8 != 0 {
            return Err(BitError::MisalignedAccess {
                bit_position: self.bit_pos,
            });
        }
        Ok(())
    }

    fn ensure_bits(&self, bits: usize) -> BitResult<()> {
        let available = self.bits_remaining();
        if bits > available {
            return Err(BitError::UnexpectedEof {
                requested: bits,
                available,
            });
        }
        Ok(())
    }

    fn read_aligned_bytes<const N: usize>(&mut self) -> BitResult<[u8; N]> {
        self.ensure_aligned()?;
        self.ensure_bits(N * 8)?;
        let idx = self.bit_pos / 8;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[idx..idx + N]);
        self.bit_pos += N * 8;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = BitReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.bits_remaining(), 0);
        assert_eq!(reader.bit_position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = BitReader::new(&[]);
        let result = reader.read_bit();
        assert!(matches!(result, Err(BitError::UnexpectedEof { .. })));
    }

    #[test]
    fn read_ub_across_bytes() {
        let mut reader = BitReader::new(&[0b1111_0000, 0b0000_1111]);
        assert_eq!(reader.read_ub(12).unwrap(), 0b1111_0000_0000);
        assert_eq!(reader.bits_remaining(), 4);
        assert_eq!(reader.byte_position(), 2);
    }

    #[test]
    fn read_ub_rejects_wide_counts() {
        let mut reader = BitReader::new(&[0xFF; 8]);
        let err = reader.read_ub(33).unwrap_err();
        assert_eq!(
            err,
            BitError::InvalidBitCount {
                bits: 33,
                max_bits: 32
            }
        );
    }

    #[test]
    fn read_sb_sign_extends() {
        // 5 bits: 11110 = -2, then 3 bits: 011 = 3
        let mut reader = BitReader::new(&[0b1111_0011]);
        assert_eq!(reader.read_sb(5).unwrap(), -2);
        assert_eq!(reader.read_sb(3).unwrap(), 3);
    }

    #[test]
    fn read_sb_zero_bits_is_zero() {
        let mut reader = BitReader::new(&[]);
        assert_eq!(reader.read_sb(0).unwrap(), 0);
    }

    #[test]
    fn read_fb_one_point_zero() {
        // 18-bit FB holding 0x10000 (1.0), padded to 3 bytes.
        let mut reader = BitReader::new(&[0b0100_0000, 0x00, 0x00]);
        assert_eq!(reader.read_fb(18).unwrap(), 0x1_0000);
    }

    #[test]
    fn read_aligned_u16_and_u32() {
        let mut reader = BitReader::new(&[0x34, 0x12, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_misaligned_fails() {
        let mut reader = BitReader::new(&[0xFF, 0xFF]);
        reader.read_ub(1).unwrap();
        let err = reader.read_u8().unwrap_err();
        assert!(matches!(err, BitError::MisalignedAccess { bit_position: 1 }));
    }

    #[test]
    fn align_then_read() {
        let mut reader = BitReader::new(&[0b1000_0000, 0x2A]);
        assert!(reader.read_bit().unwrap());
        reader.align_to_byte().unwrap();
        assert_eq!(reader.read_u8().unwrap(), 0x2A);
    }

    #[test]
    fn read_cstring_stops_at_nul() {
        let mut reader = BitReader::new(b"clip\0rest");
        assert_eq!(reader.read_cstring().unwrap(), b"clip");
        assert_eq!(reader.read_remaining(), b"rest");
    }

    #[test]
    fn read_cstring_without_nul_fails() {
        let mut reader = BitReader::new(b"clip");
        let err = reader.read_cstring().unwrap_err();
        assert_eq!(err, BitError::UnterminatedString { start: 0 });
    }

    #[test]
    fn read_bytes_past_end_fails() {
        let mut reader = BitReader::new(&[1, 2]);
        let err = reader.read_bytes(3).unwrap_err();
        assert!(matches!(err, BitError::UnexpectedEof { requested: 24, .. }));
    }

    #[test]
    fn read_remaining_skips_partial_byte() {
        let mut reader = BitReader::new(&[0xFF, 0xAA, 0xBB]);
        reader.read_ub(3).unwrap();
        assert_eq!(reader.read_remaining(), &[0xAA, 0xBB]);
        assert!(reader.is_empty());
    }
}
