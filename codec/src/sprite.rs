//! `DefineSprite` body encoding and decoding.

use std::collections::BTreeSet;

use bitstream::BitReader;
use tracing::{debug, warn};

use crate::bounds::resolve_bounds;
use crate::character::{Character, CharacterTable};
use crate::error::{CodecError, CodecResult};
use crate::geometry::Rect;
use crate::record::Record;
use crate::types::{CharacterId, SwfVersion};

/// Size of the fixed `sprite_id` + `frame_count` prefix.
pub const SPRITE_HEADER_SIZE: usize = 4;

/// A sprite: an id, a frame count and its own timeline of records.
///
/// The id and frame count are fixed at construction; records may be
/// appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefineSprite {
    sprite_id: CharacterId,
    frame_count: u16,
    records: Vec<Record>,
}

impl DefineSprite {
    #[must_use]
    pub fn new(sprite_id: CharacterId, frame_count: u16) -> Self {
        Self {
            sprite_id,
            frame_count,
            records: Vec::new(),
        }
    }

    /// Builds a sprite from an existing record list.
    #[must_use]
    pub fn with_records(sprite_id: CharacterId, frame_count: u16, records: Vec<Record>) -> Self {
        Self {
            sprite_id,
            frame_count,
            records,
        }
    }

    #[must_use]
    pub const fn sprite_id(&self) -> CharacterId {
        self.sprite_id
    }

    #[must_use]
    pub const fn frame_count(&self) -> u16 {
        self.frame_count
    }

    /// Records in timeline order, without the `End` sentinel.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn push_record(&mut self, record: impl Into<Record>) {
        self.records.push(record.into());
    }

    /// Decodes a sprite body (the bytes after the `DefineSprite` header).
    pub fn decode(bytes: &[u8], version: SwfVersion, limits: &wire::Limits) -> CodecResult<Self> {
        if bytes.len() < SPRITE_HEADER_SIZE {
            return Err(CodecError::TruncatedInput {
                actual: bytes.len(),
                required: SPRITE_HEADER_SIZE,
            });
        }
        let mut reader = BitReader::new(bytes);
        let sprite_id = CharacterId::new(reader.read_u16()?);
        let frame_count = reader.read_u16()?;

        let body = &bytes[SPRITE_HEADER_SIZE..];
        let stream = wire::read_records(body, limits)?;
        let trailing = body.len() - stream.consumed;
        if trailing > 0 {
            debug!(
                sprite_id = sprite_id.raw(),
                trailing, "ignoring bytes after sprite End record"
            );
        }

        let records = stream
            .records
            .iter()
            .map(|record| Record::decode(record, version))
            .collect::<CodecResult<Vec<_>>>()?;

        debug!(
            sprite_id = sprite_id.raw(),
            frame_count,
            records = records.len(),
            "decoded sprite"
        );
        Ok(Self {
            sprite_id,
            frame_count,
            records,
        })
    }

    /// Decodes with [`wire::Limits::default`].
    pub fn decode_with_default_limits(bytes: &[u8], version: SwfVersion) -> CodecResult<Self> {
        Self::decode(bytes, version, &wire::Limits::default())
    }

    /// Encodes the sprite body.
    ///
    /// A record that cannot be written is logged and the bytes produced up
    /// to that point are returned. Use [`DefineSprite::try_encode`] to see
    /// the error instead.
    #[must_use]
    pub fn encode(&self, version: SwfVersion) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size_hint());
        if let Err(err) = self.encode_into(version, &mut out) {
            warn!(
                sprite_id = self.sprite_id.raw(),
                written = out.len(),
                error = %err,
                "sprite encode failed; returning partial body"
            );
        }
        out
    }

    /// Encodes the sprite body, failing on the first record that cannot be
    /// written.
    pub fn try_encode(&self, version: SwfVersion) -> CodecResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.size_hint());
        self.encode_into(version, &mut out)?;
        Ok(out)
    }

    fn encode_into(&self, version: SwfVersion, out: &mut Vec<u8>) -> CodecResult<()> {
        out.extend_from_slice(&self.sprite_id.raw().to_le_bytes());
        out.extend_from_slice(&self.frame_count.to_le_bytes());
        for record in &self.records {
            let body = record.encode_body(version)?;
            wire::write_record(out, record.code(), &body, record.long_header())?;
        }
        wire::write_end(out);
        Ok(())
    }

    fn size_hint(&self) -> usize {
        SPRITE_HEADER_SIZE + wire::SHORT_HEADER_SIZE * (self.records.len() + 1)
    }

    /// Every character id the records name directly.
    #[must_use]
    pub fn needed_character_ids(&self) -> BTreeSet<CharacterId> {
        self.records
            .iter()
            .flat_map(Record::needed_character_ids)
            .collect()
    }

    /// Extent of everything the sprite places. See [`resolve_bounds`].
    #[must_use]
    pub fn bounds(&self, table: &CharacterTable) -> Rect {
        resolve_bounds(self, table)
    }
}

impl Character for DefineSprite {
    fn character_id(&self) -> CharacterId {
        self.sprite_id
    }

    fn bounds(&self, table: &CharacterTable) -> Option<Rect> {
        Some(resolve_bounds(self, table))
    }
}
