//! Core types for the codec.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A character identifier.
///
/// Character IDs are unique within a movie's character table and name the
/// shapes, sprites, sounds and other definitions that records refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct CharacterId(u16);

impl CharacterId {
    /// Creates a new character ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the raw character ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for CharacterId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<CharacterId> for u16 {
    fn from(id: CharacterId) -> Self {
        id.0
    }
}

/// A display-list depth.
///
/// At most one character occupies a depth at any point in a record stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Depth(u16);

impl Depth {
    /// Creates a new depth.
    #[must_use]
    pub const fn new(depth: u16) -> Self {
        Self(depth)
    }

    /// Returns the raw depth value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for Depth {
    fn from(depth: u16) -> Self {
        Self(depth)
    }
}

/// The SWF format version a body was written for.
///
/// Threaded through decoding and encoding; versions before 6 store strings
/// in a single-byte encoding instead of UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwfVersion(u8);

impl SwfVersion {
    /// First version whose strings are UTF-8.
    pub const UTF8_STRINGS: Self = Self(6);

    /// Creates a new version.
    #[must_use]
    pub const fn new(version: u8) -> Self {
        Self(version)
    }

    /// Returns the raw version number.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Returns `true` if strings are UTF-8 in this version.
    #[must_use]
    pub const fn has_utf8_strings(self) -> bool {
        self.0 >= Self::UTF8_STRINGS.0
    }
}

impl Default for SwfVersion {
    fn default() -> Self {
        Self(10)
    }
}

impl From<u8> for SwfVersion {
    fn from(version: u8) -> Self {
        Self(version)
    }
}
