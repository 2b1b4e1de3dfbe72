//! Inspection and debugging tools for SWF sprite bodies.
//!
//! This crate provides utilities for looking inside encoded sprites:
//!
//! - Decode and summarize the record timeline
//! - Resolve sprite bounds against a JSON character table
//! - Re-encode a sprite to check that it survives a round trip
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;

use anyhow::{Context, Result};
use codec::{
    CharacterId, CharacterTable, DefineSprite, FixedBounds, Matrix, Record, Rect, SwfVersion,
    Unbounded,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A character table as read from JSON.
///
/// ```json
/// {"characters": [{"id": 7, "bounds": {"x_min": 0, "x_max": 200, "y_min": 0, "y_max": 100}}]}
/// ```
///
/// Entries without `bounds` are characters without geometry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterFile {
    pub characters: Vec<CharacterEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub id: u16,
    #[serde(default)]
    pub bounds: Option<Rect>,
}

impl CharacterFile {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("parse character table json")
    }

    /// Builds a table; later entries replace earlier ones with the same id.
    #[must_use]
    pub fn into_table(self) -> CharacterTable {
        let mut table = CharacterTable::new();
        for entry in self.characters {
            let id = CharacterId::new(entry.id);
            match entry.bounds {
                Some(rect) => table.insert(FixedBounds::new(id, rect)),
                None => table.insert(Unbounded { id }),
            };
        }
        table
    }
}

/// Adds inspected sprites to `table` so they can place each other.
///
/// A sprite that reaches its own id through the sprites being added would
/// make bounds resolution recurse forever; such sprites are left out and
/// their ids returned.
pub fn register_sprites(table: &mut CharacterTable, sprites: &[DefineSprite]) -> Vec<CharacterId> {
    let needed: HashMap<CharacterId, BTreeSet<CharacterId>> = sprites
        .iter()
        .map(|sprite| (sprite.sprite_id(), sprite.needed_character_ids()))
        .collect();

    let mut skipped = Vec::new();
    for sprite in sprites {
        let id = sprite.sprite_id();
        if places_itself(id, &needed) {
            warn!(sprite_id = id.raw(), "sprite places itself; not added to character table");
            skipped.push(id);
            continue;
        }
        if table.contains(id) {
            warn!(sprite_id = id.raw(), "sprite replaces character table entry");
        }
        table.insert(sprite.clone());
    }
    skipped
}

fn places_itself(start: CharacterId, needed: &HashMap<CharacterId, BTreeSet<CharacterId>>) -> bool {
    let mut seen = BTreeSet::new();
    let mut pending: Vec<CharacterId> = needed
        .get(&start)
        .map(|ids| ids.iter().copied().collect())
        .unwrap_or_default();
    while let Some(id) = pending.pop() {
        if id == start {
            return true;
        }
        if seen.insert(id) {
            if let Some(next) = needed.get(&id) {
                pending.extend(next.iter().copied());
            }
        }
    }
    false
}

/// Summary of one decoded sprite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub sprite_id: u16,
    pub frame_count: u16,
    pub body_len: usize,
    pub records: Vec<RecordSummary>,
    pub needed_character_ids: Vec<u16>,
    /// Present when a character table was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Rect>,
}

/// One line of the record timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    pub frame: u16,
    pub code: u16,
    pub name: &'static str,
    pub body_len: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Matrix>,
}

/// Decodes a sprite body.
pub fn decode_sprite(
    bytes: &[u8],
    version: SwfVersion,
    limits: &wire::Limits,
) -> Result<DefineSprite> {
    DefineSprite::decode(bytes, version, limits).context("decode sprite")
}

/// Builds the report for a decoded sprite.
///
/// Bounds are resolved only when `table` is given.
pub fn inspect_sprite(
    sprite: &DefineSprite,
    body_len: usize,
    version: SwfVersion,
    table: Option<&CharacterTable>,
) -> Result<InspectReport> {
    let mut frame = 0u16;
    let mut records = Vec::with_capacity(sprite.records().len());
    for record in sprite.records() {
        let encoded = record
            .encode_body(version)
            .with_context(|| format!("measure {} record", record.name()))?;
        let placement = record.as_placement();
        let depth = match record {
            Record::RemoveObject { depth, .. } | Record::RemoveObject2 { depth } => Some(*depth),
            _ => placement.map(|p| p.depth),
        };
        let character_id = match record {
            Record::RemoveObject { character_id, .. } => Some(*character_id),
            Record::StartSound { sound_id, .. } => Some(*sound_id),
            _ => placement.and_then(|p| p.character_id),
        };
        records.push(RecordSummary {
            frame,
            code: record.code(),
            name: record.name(),
            body_len: encoded.len(),
            depth: depth.map(|d| d.raw()),
            character_id: character_id.map(CharacterId::raw),
            matrix: placement.and_then(|p| p.matrix),
        });
        if matches!(record, Record::ShowFrame) {
            frame = frame.saturating_add(1);
        }
    }

    Ok(InspectReport {
        sprite_id: sprite.sprite_id().raw(),
        frame_count: sprite.frame_count(),
        body_len,
        records,
        needed_character_ids: sprite
            .needed_character_ids()
            .into_iter()
            .map(CharacterId::raw)
            .collect(),
        bounds: table.map(|table| sprite.bounds(table)),
    })
}

/// Renders a report for terminal output.
#[must_use]
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "sprite: {} frames: {} body_len: {} bytes",
        report.sprite_id, report.frame_count, report.body_len
    );
    let _ = writeln!(out, "records:");
    for record in &report.records {
        let _ = write!(
            out,
            "  [{}] {} (code {}, {} bytes)",
            record.frame, record.name, record.code, record.body_len
        );
        if let Some(depth) = record.depth {
            let _ = write!(out, " depth={depth}");
        }
        if let Some(id) = record.character_id {
            let _ = write!(out, " character={id}");
        }
        if let Some(matrix) = &record.matrix {
            let _ = write!(
                out,
                " translate=({}, {})",
                matrix.translate_x, matrix.translate_y
            );
            if matrix.has_scale() || matrix.has_rotate() {
                let _ = write!(
                    out,
                    " abcd=[{}, {}, {}, {}]",
                    matrix.scale_x, matrix.rotate_skew0, matrix.rotate_skew1, matrix.scale_y
                );
            }
        }
        out.push('\n');
    }
    let ids: Vec<String> = report
        .needed_character_ids
        .iter()
        .map(u16::to_string)
        .collect();
    let _ = writeln!(out, "needed characters: [{}]", ids.join(", "));
    match report.bounds {
        Some(rect) if rect.is_empty() => {
            let _ = writeln!(out, "bounds: empty");
        }
        Some(rect) => {
            let _ = writeln!(
                out,
                "bounds: x {}..{} y {}..{} ({} x {} twips)",
                rect.x_min,
                rect.x_max,
                rect.y_min,
                rect.y_max,
                i64::from(rect.x_max) - i64::from(rect.x_min),
                i64::from(rect.y_max) - i64::from(rect.y_min)
            );
        }
        None => {}
    }
    out
}

/// Decodes and re-encodes a sprite body.
///
/// Returns the re-encoded bytes and whether they match the input exactly.
/// A mismatch is not an error: the encoder picks minimal field widths and
/// header forms, and drops anything after the `End` record.
pub fn reencode_sprite(
    bytes: &[u8],
    version: SwfVersion,
    limits: &wire::Limits,
) -> Result<(Vec<u8>, bool)> {
    let sprite = decode_sprite(bytes, version, limits)?;
    let out = sprite.try_encode(version).context("encode sprite")?;
    let identical = out == bytes;
    Ok((out, identical))
}
