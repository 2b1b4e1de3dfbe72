//! Typed sub-records of a sprite's tag stream.

use std::collections::BTreeSet;

use bitstream::{BitReader, BitWriter};
use wire::WireRecord;

use crate::error::{CodecError, CodecResult, RecordReason};
use crate::geometry::Matrix;
use crate::types::{CharacterId, Depth, SwfVersion};

/// Tag codes the codec understands.
pub mod codes {
    pub const SHOW_FRAME: u16 = 1;
    pub const PLACE_OBJECT: u16 = 4;
    pub const REMOVE_OBJECT: u16 = 5;
    pub const START_SOUND: u16 = 15;
    pub const PLACE_OBJECT2: u16 = 26;
    pub const REMOVE_OBJECT2: u16 = 28;
    pub const DEFINE_SPRITE: u16 = 39;
    pub const PLACE_OBJECT3: u16 = 70;
}

/// `PlaceObject2`/`PlaceObject3` first flags byte.
pub mod place_flags {
    pub const CLIP_ACTIONS: u8 = 0x80;
    pub const CLIP_DEPTH: u8 = 0x40;
    pub const NAME: u8 = 0x20;
    pub const RATIO: u8 = 0x10;
    pub const COLOR_TRANSFORM: u8 = 0x08;
    pub const MATRIX: u8 = 0x04;
    pub const CHARACTER: u8 = 0x02;
    pub const MOVE: u8 = 0x01;

    /// `PlaceObject3` second flags byte.
    pub const HAS_IMAGE: u8 = 0x10;
    pub const HAS_CLASS_NAME: u8 = 0x08;
}

/// Which placement tag a [`Placement`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceKind {
    PlaceObject,
    PlaceObject2,
    PlaceObject3,
}

impl PlaceKind {
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::PlaceObject => codes::PLACE_OBJECT,
            Self::PlaceObject2 => codes::PLACE_OBJECT2,
            Self::PlaceObject3 => codes::PLACE_OBJECT3,
        }
    }
}

/// A record that puts a character at a depth, or updates what is there.
///
/// `character_id == None` is a move-in-place: the record applies to
/// whatever character currently occupies `depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub kind: PlaceKind,
    pub depth: Depth,
    pub character_id: Option<CharacterId>,
    pub matrix: Option<Matrix>,
    /// First flags byte without the character and matrix bits, which are
    /// derived from the fields above. Always zero for `PlaceObject`.
    pub flags: u8,
    /// Second flags byte of `PlaceObject3`.
    pub flags3: u8,
    /// `PlaceObject3` class name.
    pub class_name: Option<String>,
    /// Body bytes after the matrix (colour transform, ratio, name, clip
    /// depth, filters, blend mode, clip actions), kept verbatim.
    pub tail: Vec<u8>,
}

impl Placement {
    /// A `PlaceObject2` that puts `character_id` at `depth`.
    #[must_use]
    pub const fn place(depth: Depth, character_id: CharacterId, matrix: Option<Matrix>) -> Self {
        Self {
            kind: PlaceKind::PlaceObject2,
            depth,
            character_id: Some(character_id),
            matrix,
            flags: 0,
            flags3: 0,
            class_name: None,
            tail: Vec::new(),
        }
    }

    /// A `PlaceObject2` that updates the character already at `depth`.
    #[must_use]
    pub const fn move_to(depth: Depth, matrix: Option<Matrix>) -> Self {
        Self {
            kind: PlaceKind::PlaceObject2,
            depth,
            character_id: None,
            matrix,
            flags: place_flags::MOVE,
            flags3: 0,
            class_name: None,
            tail: Vec::new(),
        }
    }

    /// Returns `true` if this record moves an existing character.
    #[must_use]
    pub const fn is_move(&self) -> bool {
        self.flags & place_flags::MOVE != 0
    }

    fn needs_class_name(&self) -> bool {
        self.kind == PlaceKind::PlaceObject3
            && (self.flags3 & place_flags::HAS_CLASS_NAME != 0
                || (self.flags3 & place_flags::HAS_IMAGE != 0 && self.character_id.is_some()))
    }

    fn decode_v1(body: &[u8]) -> CodecResult<Self> {
        let mut reader = BitReader::new(body);
        let character_id = CharacterId::new(reader.read_u16()?);
        let depth = Depth::new(reader.read_u16()?);
        let matrix = Matrix::read(&mut reader)?;
        Ok(Self {
            kind: PlaceKind::PlaceObject,
            depth,
            character_id: Some(character_id),
            matrix: Some(matrix),
            flags: 0,
            flags3: 0,
            class_name: None,
            tail: reader.read_remaining().to_vec(),
        })
    }

    fn decode_v2(kind: PlaceKind, body: &[u8], version: SwfVersion) -> CodecResult<Self> {
        let mut reader = BitReader::new(body);
        let raw_flags = reader.read_u8()?;
        let flags3 = if kind == PlaceKind::PlaceObject3 {
            reader.read_u8()?
        } else {
            0
        };
        let depth = Depth::new(reader.read_u16()?);
        let has_character = raw_flags & place_flags::CHARACTER != 0;

        let mut placement = Self {
            kind,
            depth,
            character_id: None,
            matrix: None,
            flags: raw_flags & !(place_flags::CHARACTER | place_flags::MATRIX),
            flags3,
            class_name: None,
            tail: Vec::new(),
        };

        let reads_class_name = kind == PlaceKind::PlaceObject3
            && (flags3 & place_flags::HAS_CLASS_NAME != 0
                || (flags3 & place_flags::HAS_IMAGE != 0 && has_character));
        if reads_class_name {
            let raw = reader.read_cstring()?;
            placement.class_name = Some(decode_string(kind.code(), raw, version)?);
        }
        if has_character {
            placement.character_id = Some(CharacterId::new(reader.read_u16()?));
        }
        if raw_flags & place_flags::MATRIX != 0 {
            placement.matrix = Some(Matrix::read(&mut reader)?);
        }
        placement.tail = reader.read_remaining().to_vec();
        Ok(placement)
    }

    fn encode_body(&self, version: SwfVersion) -> CodecResult<Vec<u8>> {
        let code = self.kind.code();
        let mut writer = BitWriter::with_capacity(16 + self.tail.len());
        match self.kind {
            PlaceKind::PlaceObject => {
                let character_id = self.character_id.ok_or(CodecError::MalformedRecord {
                    code,
                    reason: RecordReason::MissingRequiredField {
                        field: "character_id",
                    },
                })?;
                let matrix = self.matrix.ok_or(CodecError::MalformedRecord {
                    code,
                    reason: RecordReason::MissingRequiredField { field: "matrix" },
                })?;
                writer.write_u16(character_id.raw())?;
                writer.write_u16(self.depth.raw())?;
                matrix.write(&mut writer)?;
            }
            PlaceKind::PlaceObject2 | PlaceKind::PlaceObject3 => {
                let mut flags = self.flags & !(place_flags::CHARACTER | place_flags::MATRIX);
                if self.character_id.is_some() {
                    flags |= place_flags::CHARACTER;
                }
                if self.matrix.is_some() {
                    flags |= place_flags::MATRIX;
                }
                writer.write_u8(flags)?;
                if self.kind == PlaceKind::PlaceObject3 {
                    writer.write_u8(self.flags3)?;
                }
                writer.write_u16(self.depth.raw())?;
                match (self.needs_class_name(), &self.class_name) {
                    (true, Some(name)) => {
                        writer.write_cstring(&encode_string(code, name, version)?)?;
                    }
                    (true, None) => {
                        return Err(CodecError::MalformedRecord {
                            code,
                            reason: RecordReason::MissingRequiredField {
                                field: "class_name",
                            },
                        });
                    }
                    (false, Some(_)) => {
                        return Err(CodecError::MalformedRecord {
                            code,
                            reason: RecordReason::UnexpectedField {
                                field: "class_name",
                            },
                        });
                    }
                    (false, None) => {}
                }
                if let Some(character_id) = self.character_id {
                    writer.write_u16(character_id.raw())?;
                }
                if let Some(matrix) = &self.matrix {
                    matrix.write(&mut writer)?;
                }
            }
        }
        writer.write_bytes(&self.tail)?;
        Ok(writer.finish())
    }
}

/// A record the codec does not interpret, kept byte for byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub code: u16,
    pub body: Vec<u8>,
    pub long_header: bool,
}

impl From<&WireRecord<'_>> for RawRecord {
    fn from(record: &WireRecord<'_>) -> Self {
        Self {
            code: record.code,
            body: record.body.to_vec(),
            long_header: record.long_header,
        }
    }
}

/// One sub-record of a sprite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    /// Frame boundary.
    ShowFrame,
    /// `PlaceObject`, `PlaceObject2` or `PlaceObject3`.
    Place(Placement),
    RemoveObject {
        character_id: CharacterId,
        depth: Depth,
    },
    RemoveObject2 {
        depth: Depth,
    },
    /// Starts a sound character; `info` is the `SOUNDINFO` body.
    StartSound {
        sound_id: CharacterId,
        info: Vec<u8>,
    },
    Other(RawRecord),
}

impl Record {
    /// Tag code written for this record.
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::ShowFrame => codes::SHOW_FRAME,
            Self::Place(placement) => placement.kind.code(),
            Self::RemoveObject { .. } => codes::REMOVE_OBJECT,
            Self::RemoveObject2 { .. } => codes::REMOVE_OBJECT2,
            Self::StartSound { .. } => codes::START_SOUND,
            Self::Other(raw) => raw.code,
        }
    }

    /// Human-readable tag name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ShowFrame => "ShowFrame",
            Self::Place(placement) => match placement.kind {
                PlaceKind::PlaceObject => "PlaceObject",
                PlaceKind::PlaceObject2 => "PlaceObject2",
                PlaceKind::PlaceObject3 => "PlaceObject3",
            },
            Self::RemoveObject { .. } => "RemoveObject",
            Self::RemoveObject2 { .. } => "RemoveObject2",
            Self::StartSound { .. } => "StartSound",
            Self::Other(raw) if raw.code == codes::DEFINE_SPRITE => "DefineSprite",
            Self::Other(_) => "Unknown",
        }
    }

    /// Returns the placement view of this record, if it is one.
    #[must_use]
    pub const fn as_placement(&self) -> Option<&Placement> {
        match self {
            Self::Place(placement) => Some(placement),
            _ => None,
        }
    }

    /// Characters this record refers to by id.
    ///
    /// A move-in-place placement names no character itself; the character it
    /// affects is only known from the records before it.
    #[must_use]
    pub fn needed_character_ids(&self) -> BTreeSet<CharacterId> {
        match self {
            Self::Place(placement) => placement.character_id.into_iter().collect(),
            Self::StartSound { sound_id, .. } => BTreeSet::from([*sound_id]),
            Self::ShowFrame
            | Self::RemoveObject { .. }
            | Self::RemoveObject2 { .. }
            | Self::Other(_) => BTreeSet::new(),
        }
    }

    /// Parses a framed record into its typed form.
    pub fn decode(record: &WireRecord<'_>, version: SwfVersion) -> CodecResult<Self> {
        let body = record.body;
        let decoded = match record.code {
            codes::SHOW_FRAME => {
                expect_consumed(record.code, body, 0)?;
                Self::ShowFrame
            }
            codes::PLACE_OBJECT => Self::Place(Placement::decode_v1(body)?),
            codes::PLACE_OBJECT2 => {
                Self::Place(Placement::decode_v2(PlaceKind::PlaceObject2, body, version)?)
            }
            codes::PLACE_OBJECT3 => {
                Self::Place(Placement::decode_v2(PlaceKind::PlaceObject3, body, version)?)
            }
            codes::REMOVE_OBJECT => {
                let mut reader = BitReader::new(body);
                let character_id = CharacterId::new(reader.read_u16()?);
                let depth = Depth::new(reader.read_u16()?);
                expect_consumed(record.code, body, 4)?;
                Self::RemoveObject {
                    character_id,
                    depth,
                }
            }
            codes::REMOVE_OBJECT2 => {
                let mut reader = BitReader::new(body);
                let depth = Depth::new(reader.read_u16()?);
                expect_consumed(record.code, body, 2)?;
                Self::RemoveObject2 { depth }
            }
            codes::START_SOUND => {
                let mut reader = BitReader::new(body);
                let sound_id = CharacterId::new(reader.read_u16()?);
                Self::StartSound {
                    sound_id,
                    info: reader.read_remaining().to_vec(),
                }
            }
            _ => Self::Other(RawRecord::from(record)),
        };
        Ok(decoded)
    }

    /// Serializes the record body (without its header).
    pub fn encode_body(&self, version: SwfVersion) -> CodecResult<Vec<u8>> {
        let mut writer = BitWriter::new();
        match self {
            Self::ShowFrame => {}
            Self::Place(placement) => return placement.encode_body(version),
            Self::RemoveObject {
                character_id,
                depth,
            } => {
                writer.write_u16(character_id.raw())?;
                writer.write_u16(depth.raw())?;
            }
            Self::RemoveObject2 { depth } => writer.write_u16(depth.raw())?,
            Self::StartSound { sound_id, info } => {
                writer.write_u16(sound_id.raw())?;
                writer.write_bytes(info)?;
            }
            Self::Other(raw) => return Ok(raw.body.clone()),
        }
        Ok(writer.finish())
    }

    /// Whether the record must keep a long-form header.
    #[must_use]
    pub const fn long_header(&self) -> bool {
        match self {
            Self::Other(raw) => raw.long_header,
            _ => false,
        }
    }
}

impl From<Placement> for Record {
    fn from(placement: Placement) -> Self {
        Self::Place(placement)
    }
}

fn expect_consumed(code: u16, body: &[u8], used: usize) -> CodecResult<()> {
    if body.len() > used {
        return Err(CodecError::MalformedRecord {
            code,
            reason: RecordReason::TrailingBytes {
                count: body.len() - used,
            },
        });
    }
    Ok(())
}

fn decode_string(code: u16, raw: &[u8], version: SwfVersion) -> CodecResult<String> {
    if version.has_utf8_strings() {
        String::from_utf8(raw.to_vec()).map_err(|_| CodecError::MalformedRecord {
            code,
            reason: RecordReason::InvalidString,
        })
    } else {
        Ok(raw.iter().map(|&b| char::from(b)).collect())
    }
}

fn encode_string(code: u16, value: &str, version: SwfVersion) -> CodecResult<Vec<u8>> {
    let unencodable = CodecError::MalformedRecord {
        code,
        reason: RecordReason::UnencodableString,
    };
    if value.contains('\0') {
        return Err(unencodable);
    }
    if version.has_utf8_strings() {
        return Ok(value.as_bytes().to_vec());
    }
    value
        .chars()
        .map(|c| u8::try_from(c).ok())
        .collect::<Option<Vec<u8>>>()
        .ok_or(unencodable)
}
