//! Collaborator contracts between the generation core and the platform.
//!
//! Generation never owns storage. World, cell, and layer resolution plus
//! chunk persistence and dirty tracking all go through these object-safe
//! traits; the platform (or [`crate::MemoryWorld`] in tests) supplies the
//! implementations. Everything is `Send + Sync` because jobs execute on
//! worker threads.

use crate::chunk_key::ChunkKey;
use crate::hex::HexVector2;
use crate::layer::{Layer, LayerChunkData};
use crate::world::{HexCell, World, WorldId};

/// Errors surfaced by the chunk persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The layer storage identifier does not exist on the backing store.
    #[error("unknown layer data id: {0:?}")]
    UnknownLayer(String),
    /// The backing store rejected the write.
    #[error("chunk store rejected write for {key}: {reason}")]
    WriteRejected { key: ChunkKey, reason: String },
}

/// Resolves worlds by id.
pub trait WorldLookup: Send + Sync {
    fn world_by_id(&self, id: WorldId) -> Option<World>;
}

/// Resolves hex-grid cells by world and axial position.
pub trait HexGridLookup: Send + Sync {
    fn cell_at(&self, world: WorldId, position: &HexVector2) -> Option<HexCell>;
}

/// Resolves named layers per world.
pub trait LayerLookup: Send + Sync {
    fn layer_by_name(&self, world: WorldId, name: &str) -> Option<Layer>;
}

/// Persists chunk payloads per layer data set.
///
/// Saves are wholesale: the stored payload for `(world, layer, key)` is
/// replaced, never merged.
pub trait ChunkStore: Send + Sync {
    fn save_chunk(
        &self,
        world: WorldId,
        layer_data_id: &str,
        key: ChunkKey,
        data: LayerChunkData,
    ) -> Result<(), StoreError>;
}

/// Records chunks that need downstream resynchronization.
///
/// Marking is an idempotent set insert of `(world, key, source)`; repeated
/// marks collapse into one record.
pub trait DirtyChunkTracker: Send + Sync {
    fn mark_dirty(&self, world: WorldId, key: ChunkKey, source: &str);
}
