//! `DefineSprite` encoding/decoding and bounds resolution.
//!
//! This is the main codec crate that ties together bitstream and wire to
//! turn sprite bodies into typed record lists and back, and to compute the
//! rectangle a sprite covers.
//!
//! # Features
//!
//! - Sprite body decode/encode with a strict and a lenient encoder
//! - Typed placement, removal and sound records; other records kept opaque
//! - `MATRIX` reading and minimal-width writing
//! - Bounds resolution through a caller-supplied character table
//!
//! # Design Principles
//!
//! - **Correctness first** - All invariants are documented and tested.
//! - **Bounded decoding** - Input sizes are checked against [`WireLimits`].
//! - **Deterministic** - Same inputs produce same outputs.

mod bounds;
mod character;
mod error;
mod geometry;
mod record;
mod sprite;
mod types;

pub use bounds::resolve_bounds;
pub use character::{Character, CharacterTable, FixedBounds, Unbounded};
pub use error::{CodecError, CodecResult, RecordReason};
pub use geometry::{Matrix, Point, Rect, FIXED_ONE};
pub use record::{codes, place_flags, PlaceKind, Placement, RawRecord, Record};
pub use sprite::{DefineSprite, SPRITE_HEADER_SIZE};
pub use types::{CharacterId, Depth, SwfVersion};
pub use wire::Limits as WireLimits;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_version_reads_utf8_strings() {
        let version = SwfVersion::default();
        assert_eq!(version.raw(), 10);
        assert!(version.has_utf8_strings());
        assert!(!SwfVersion::new(5).has_utf8_strings());
    }

    #[test]
    fn fresh_table_resolves_nothing() {
        let table = CharacterTable::new();
        assert!(table.is_empty());
        assert_eq!(table.bounds_of(CharacterId::new(0)), None);
        assert_eq!(
            DefineSprite::new(CharacterId::new(1), 0).bounds(&table),
            Rect::EMPTY
        );
    }

    #[test]
    fn character_id_usage() {
        let id = CharacterId::new(42);
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn limits_reexported() {
        // Limits is re-exported from wire
        let limits = WireLimits::default();
        assert!(limits.max_body_bytes > 0);
    }

    #[test]
    fn sprite_header_size_matches_layout() {
        assert_eq!(SPRITE_HEADER_SIZE, 4);
    }
}
