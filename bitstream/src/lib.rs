//! MSB-first bit packing primitives for SWF record bodies.
//!
//! This crate provides [`BitWriter`] and [`BitReader`] for the bit-level
//! fields SWF uses inside record bodies (`UB[n]`, `SB[n]`, `FB[n]`) as well as
//! byte-aligned little-endian integers and NUL-terminated strings.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads/writes are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about tags, characters, or sprites.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bitstream::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bit(true);
//! writer.write_sb(-3, 5).unwrap();
//! writer.align_to_byte();
//! writer.write_u16(0x1234).unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = BitReader::new(&bytes);
//! assert_eq!(reader.read_bit().unwrap(), true);
//! assert_eq!(reader.read_sb(5).unwrap(), -3);
//! reader.align_to_byte().unwrap();
//! assert_eq!(reader.read_u16().unwrap(), 0x1234);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{BitError, BitResult};
pub use reader::BitReader;
pub use writer::{sb_bits_needed, ub_bits_needed, BitWriter};
