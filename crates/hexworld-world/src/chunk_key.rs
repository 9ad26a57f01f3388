//! Chunk addressing: the `"<cx>:<cz>"` composite key used by both storage
//! and dirty tracking.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Edge length of a chunk in blocks. Chunks partition the XZ plane;
/// generation and persistence both address whole chunks.
pub const CHUNK_SIZE: i32 = 16;

/// Error produced when parsing a textual chunk key.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed chunk key: {0:?}")]
pub struct ChunkKeyError(pub String);

/// Address of one chunk column, canonically written `"<cx>:<cz>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkKey {
    /// Chunk X index (world X divided by [`CHUNK_SIZE`], floored).
    pub cx: i32,
    /// Chunk Z index (world Z divided by [`CHUNK_SIZE`], floored).
    pub cz: i32,
}

impl ChunkKey {
    /// Creates a key from chunk indices.
    pub fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Returns the key of the chunk containing a world-space block column.
    ///
    /// Uses euclidean (flooring) division so negative coordinates land in
    /// the correct chunk: block x = -1 belongs to chunk -1, not chunk 0.
    pub fn containing(world_x: i32, world_z: i32) -> Self {
        Self {
            cx: world_x.div_euclid(CHUNK_SIZE),
            cz: world_z.div_euclid(CHUNK_SIZE),
        }
    }

    /// World-space coordinate of this chunk's minimum corner.
    pub fn origin(&self) -> (i32, i32) {
        (self.cx * CHUNK_SIZE, self.cz * CHUNK_SIZE)
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.cx, self.cz)
    }
}

impl FromStr for ChunkKey {
    type Err = ChunkKeyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || ChunkKeyError(text.to_string());
        let (cx, cz) = text.split_once(':').ok_or_else(malformed)?;
        Ok(Self {
            cx: cx.trim().parse().map_err(|_| malformed())?,
            cz: cz.trim().parse().map_err(|_| malformed())?,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
