//! The [`BlockDef`] template codec.
//!
//! Wire format: `<blockTypeId>[@s:<state>][@o:<dx,dy,dz>][@r:<rx,ry,...>][@l:<level>][@f:<faceSpec>]`.
//! Parsing is total: any malformed segment makes [`BlockDef::parse`] return
//! `None` instead of erroring, so callers decide what a bad descriptor means.

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::face::parse_face_spec;

/// Named status codes accepted by the `@s:` segment.
pub mod status {
    pub const DEFAULT: i32 = 0;
    pub const OPEN: i32 = 1;
    pub const CLOSED: i32 = 2;
    pub const LOCKED: i32 = 3;
    pub const DESTROYED: i32 = 5;
    pub const WINTER: i32 = 10;
    pub const SPRING: i32 = 11;
    pub const SUMMER: i32 = 12;
    pub const AUTUMN: i32 = 13;
}

/// Resolves a status value: either an integer or a case-insensitive alias.
pub fn parse_status(text: &str) -> Option<i32> {
    if let Ok(value) = text.parse() {
        return Some(value);
    }
    match text.to_ascii_lowercase().as_str() {
        "default" => Some(status::DEFAULT),
        "open" => Some(status::OPEN),
        "closed" => Some(status::CLOSED),
        "locked" => Some(status::LOCKED),
        "destroyed" => Some(status::DESTROYED),
        "winter" => Some(status::WINTER),
        "spring" => Some(status::SPRING),
        "summer" => Some(status::SUMMER),
        "autumn" => Some(status::AUTUMN),
        _ => None,
    }
}

/// A parsed block template.
///
/// Immutable once parsed; stamped onto concrete [`Block`]s via
/// [`fill_block`](Self::fill_block).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockDef {
    /// Block type identifier, `[A-Za-z0-9_:]+`.
    pub type_id: String,
    /// Status code, 0 when the descriptor carries no `@s:` segment.
    pub status: i32,
    /// Integer offset list from `@o:`.
    pub offsets: Option<Vec<i32>>,
    /// Rotation angle list from `@r:`.
    pub rotation: Option<Vec<f32>>,
    /// Level from `@l:`.
    pub level: Option<i32>,
    /// Face-visibility bitmask from `@f:`.
    pub faces: Option<u32>,
}

impl BlockDef {
    /// Creates a plain template for a block type with no optional segments.
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            status: status::DEFAULT,
            offsets: None,
            rotation: None,
            level: None,
            faces: None,
        }
    }

    /// Parses a textual descriptor.
    ///
    /// Returns `None` on an invalid type id, a malformed known segment, or a
    /// numeric parse failure anywhere. Segments with unrecognized prefixes
    /// are skipped. Never panics.
    pub fn parse(text: &str) -> Option<Self> {
        let mut segments = text.trim().split('@');
        let type_id = segments.next()?;
        if !is_valid_type_id(type_id) {
            return None;
        }

        let mut def = Self::new(type_id);
        for segment in segments {
            let Some((prefix, value)) = segment.split_once(':') else {
                // No payload separator: not a segment we know how to read.
                continue;
            };
            match prefix {
                "s" => def.status = parse_status(value)?,
                "o" => def.offsets = Some(parse_list(value)?),
                "r" => def.rotation = Some(parse_list(value)?),
                "l" => def.level = Some(value.trim().parse().ok()?),
                "f" => def.faces = Some(parse_face_spec(value)?),
                _ => {}
            }
        }
        Some(def)
    }

    /// Encodes the canonical textual form.
    ///
    /// The default status and unset optional segments are omitted; faces are
    /// always written numerically. `parse(encode(def)) == def` for any
    /// template this type can represent.
    pub fn encode(&self) -> String {
        let mut out = self.type_id.clone();
        if self.status != status::DEFAULT {
            out.push_str(&format!("@s:{}", self.status));
        }
        if let Some(offsets) = &self.offsets {
            out.push_str(&format!("@o:{}", join_list(offsets)));
        }
        if let Some(rotation) = &self.rotation {
            out.push_str(&format!("@r:{}", join_list(rotation)));
        }
        if let Some(level) = self.level {
            out.push_str(&format!("@l:{level}"));
        }
        if let Some(faces) = self.faces {
            out.push_str(&format!("@f:{faces}"));
        }
        out
    }

    /// Stamps this template onto a block.
    ///
    /// Type id and status are always written. Offsets (widened to `f32`), the
    /// first two rotation values (as rotation x/y), level, and faces are
    /// written only when the template carries them; anything the template
    /// leaves unset keeps the block's prior value.
    pub fn fill_block(&self, block: &mut Block) {
        block.type_id.clone_from(&self.type_id);
        block.status = self.status;
        if let Some(offsets) = &self.offsets {
            block.offsets = Some(offsets.iter().map(|&o| o as f32).collect());
        }
        if let Some(rotation) = &self.rotation {
            if let Some(&rx) = rotation.first() {
                block.rotation_x = rx;
            }
            if let Some(&ry) = rotation.get(1) {
                block.rotation_y = ry;
            }
        }
        if let Some(level) = self.level {
            block.level = Some(level);
        }
        if let Some(faces) = self.faces {
            block.faces = Some(faces);
        }
    }

    /// Builds a fresh block of this template at a position.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Block {
        let mut block = Block::at(self.type_id.clone(), x, y, z);
        self.fill_block(&mut block);
        block
    }
}

fn is_valid_type_id(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

fn parse_list<T: std::str::FromStr>(value: &str) -> Option<Vec<T>> {
    value
        .split(',')
        .map(|item| item.trim().parse().ok())
        .collect()
}

fn join_list<T: std::fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(T::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
