//! Sprite bounds resolution.

use std::collections::HashMap;

use tracing::trace;

use crate::character::CharacterTable;
use crate::geometry::Rect;
use crate::record::Record;
use crate::sprite::DefineSprite;
use crate::types::{CharacterId, Depth};

/// Computes the rectangle enclosing everything `sprite` places.
///
/// Records are walked in order while tracking which character occupies each
/// depth, so a placement that only moves a depth resolves against the
/// character placed there earlier. Each placement's matrix is applied to the
/// two diagonal corners of the character's bounds. Absent characters,
/// characters without geometry and moves of an unoccupied depth contribute
/// nothing. Returns [`Rect::EMPTY`] when nothing contributes.
///
/// Nested sprites are resolved recursively through `table`; a sprite that
/// places itself, directly or not, does not terminate.
#[must_use]
pub fn resolve_bounds(sprite: &DefineSprite, table: &CharacterTable) -> Rect {
    let mut slots: HashMap<Depth, CharacterId> = HashMap::new();
    let mut result = Rect::EMPTY;

    for record in sprite.records() {
        let mut needed = record.needed_character_ids();
        if let Record::Place(placement) = record {
            match placement.character_id {
                Some(id) => {
                    slots.insert(placement.depth, id);
                }
                None => match slots.get(&placement.depth) {
                    Some(&id) => {
                        needed.insert(id);
                    }
                    None => trace!(
                        sprite_id = sprite.sprite_id().raw(),
                        depth = placement.depth.raw(),
                        "move of unoccupied depth"
                    ),
                },
            }
        }
        if needed.is_empty() {
            continue;
        }

        let mut rect: Rect = needed
            .iter()
            .filter_map(|&id| {
                let bounds = table.bounds_of(id);
                if bounds.is_none() {
                    trace!(
                        sprite_id = sprite.sprite_id().raw(),
                        character_id = id.raw(),
                        "character absent or without bounds"
                    );
                }
                bounds
            })
            .collect();

        if let Some(matrix) = record.as_placement().and_then(|p| p.matrix.as_ref()) {
            if !rect.is_empty() {
                rect = rect.transform_corners(matrix);
            }
        }
        result = result.union(rect);
    }
    result
}
