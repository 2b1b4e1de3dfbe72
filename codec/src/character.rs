//! Characters and the table records refer to them through.

use std::collections::HashMap;
use std::fmt;

use crate::geometry::Rect;
use crate::types::CharacterId;

/// A definition that records can refer to by id.
pub trait Character {
    /// The id this character is registered under.
    fn character_id(&self) -> CharacterId;

    /// Extent of the character in its own coordinate space.
    ///
    /// Returns `None` for characters without geometry. Containers resolve
    /// their extent through `table`.
    fn bounds(&self, table: &CharacterTable) -> Option<Rect>;
}

/// Mapping from character id to definition.
///
/// Bounds resolution only ever reads the table.
#[derive(Default)]
pub struct CharacterTable {
    characters: HashMap<CharacterId, Box<dyn Character>>,
}

impl CharacterTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `character` under its own id and returns the definition it
    /// replaced, if any.
    pub fn insert<C: Character + 'static>(&mut self, character: C) -> Option<Box<dyn Character>> {
        self.characters
            .insert(character.character_id(), Box::new(character))
    }

    #[must_use]
    pub fn get(&self, id: CharacterId) -> Option<&dyn Character> {
        self.characters.get(&id).map(Box::as_ref)
    }

    #[must_use]
    pub fn contains(&self, id: CharacterId) -> bool {
        self.characters.contains_key(&id)
    }

    /// Bounds of `id`, or `None` if it is absent or has no geometry.
    #[must_use]
    pub fn bounds_of(&self, id: CharacterId) -> Option<Rect> {
        self.get(id)?.bounds(self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = CharacterId> + '_ {
        self.characters.keys().copied()
    }
}

impl fmt::Debug for CharacterTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ids: Vec<u16> = self.ids().map(CharacterId::raw).collect();
        ids.sort_unstable();
        f.debug_struct("CharacterTable").field("ids", &ids).finish()
    }
}

/// A character with a known, fixed extent (shapes, text, bitmaps).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedBounds {
    pub id: CharacterId,
    pub rect: Rect,
}

impl FixedBounds {
    #[must_use]
    pub const fn new(id: CharacterId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

impl Character for FixedBounds {
    fn character_id(&self) -> CharacterId {
        self.id
    }

    fn bounds(&self, _table: &CharacterTable) -> Option<Rect> {
        Some(self.rect)
    }
}

/// A character without geometry, such as a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unbounded {
    pub id: CharacterId,
}

impl Character for Unbounded {
    fn character_id(&self) -> CharacterId {
        self.id
    }

    fn bounds(&self, _table: &CharacterTable) -> Option<Rect> {
        None
    }
}
