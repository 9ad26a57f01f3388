//! Named voxel layers and per-layer chunk payloads.

use serde::{Deserialize, Serialize};

use hexworld_block::Block;

use crate::chunk_key::ChunkKey;

/// A named, independently stored slice of voxel content (e.g. `"terrain"`
/// vs. `"decoration"`) over the same spatial grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Layer name, unique per world.
    pub name: String,
    /// Storage identifier. A layer without one has no backing data set and
    /// cannot be written.
    pub data_id: Option<String>,
}

impl Layer {
    pub fn new(name: impl Into<String>, data_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_id: Some(data_id.into()),
        }
    }

    /// A layer that has not been bound to storage yet.
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_id: None,
        }
    }
}

/// Full voxel content of one chunk on one layer.
///
/// Blocks keep insertion order and carry the edit group id they were painted
/// under. Saves replace the stored payload wholesale; there is no incremental
/// merge at this level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerChunkData {
    pub cx: i32,
    pub cz: i32,
    pub blocks: Vec<(Block, i64)>,
}

impl LayerChunkData {
    pub fn new(key: ChunkKey, blocks: Vec<(Block, i64)>) -> Self {
        Self {
            cx: key.cx,
            cz: key.cz,
            blocks,
        }
    }

    /// The chunk key this payload belongs to.
    pub fn key(&self) -> ChunkKey {
        ChunkKey::new(self.cx, self.cz)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
