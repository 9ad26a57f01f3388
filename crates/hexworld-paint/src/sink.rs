//! Edit-sink contracts and the chunk-grouping buffer.

use rustc_hash::FxHashMap;

use hexworld_block::Block;
use hexworld_world::{ChunkKey, StoreError, WorldId};

/// Errors surfaced by an edit sink.
#[derive(Debug, thiserror::Error)]
pub enum EditError {
    /// The sink refused the edit.
    #[error("edit rejected at ({x}, {y}, {z}): {reason}")]
    Rejected {
        x: i32,
        y: i32,
        z: i32,
        reason: String,
    },
    /// The persistence boundary failed underneath the sink.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Applies and propagates one voxel edit.
///
/// One call per painted voxel; implementations must not assume any
/// transactional grouping. A failure leaves previously committed voxels in
/// place.
pub trait EditSink {
    fn commit_block(
        &mut self,
        world: WorldId,
        layer_data_id: &str,
        model: &str,
        block: Block,
        group_id: i64,
    ) -> Result<(), EditError>;
}

/// Optional per-paint coordinate feedback, e.g. an editor selection overlay.
pub trait SelectionFeedback {
    /// Records one painted coordinate with an RGBA highlight color.
    fn highlight(&mut self, x: i32, y: i32, z: i32, color: u32);
}

/// An [`EditSink`] that groups committed blocks by the chunk containing
/// them, preserving insertion order within each chunk.
///
/// This is the bridge from painting to chunk persistence: paint a shape into
/// the buffer, then drain it into per-chunk payload saves.
#[derive(Default)]
pub struct ChunkEditBuffer {
    order: Vec<ChunkKey>,
    chunks: FxHashMap<ChunkKey, Vec<(Block, i64)>>,
}

impl ChunkEditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffered blocks across all chunks.
    pub fn block_count(&self) -> usize {
        self.chunks.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Drains the buffer into `(chunk key, blocks)` groups in first-touched
    /// chunk order.
    pub fn drain(&mut self) -> Vec<(ChunkKey, Vec<(Block, i64)>)> {
        let order = std::mem::take(&mut self.order);
        let mut chunks = std::mem::take(&mut self.chunks);
        order
            .into_iter()
            .filter_map(|key| chunks.remove(&key).map(|blocks| (key, blocks)))
            .collect()
    }
}

impl EditSink for ChunkEditBuffer {
    fn commit_block(
        &mut self,
        _world: WorldId,
        _layer_data_id: &str,
        _model: &str,
        block: Block,
        group_id: i64,
    ) -> Result<(), EditError> {
        let key = ChunkKey::containing(block.x, block.z);
        let entry = self.chunks.entry(key).or_insert_with(|| {
            self.order.push(key);
            Vec::new()
        });
        entry.push((block, group_id));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
