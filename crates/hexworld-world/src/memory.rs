//! In-memory implementation of every collaborator contract.
//!
//! Worlds, cells, and layers are seeded at construction time and read-only
//! afterwards; chunk payloads and dirty records live in concurrent maps
//! because job workers write them from multiple threads.

use dashmap::{DashMap, DashSet};
use rustc_hash::FxHashMap;

use crate::chunk_key::ChunkKey;
use crate::hex::HexVector2;
use crate::layer::{Layer, LayerChunkData};
use crate::store::{
    ChunkStore, DirtyChunkTracker, HexGridLookup, LayerLookup, StoreError, WorldLookup,
};
use crate::world::{HexCell, World, WorldId};

/// A complete in-process world backend.
#[derive(Default)]
pub struct MemoryWorld {
    worlds: FxHashMap<WorldId, World>,
    cells: FxHashMap<(WorldId, HexVector2), HexCell>,
    layers: FxHashMap<(WorldId, String), Layer>,
    chunks: DashMap<(WorldId, String, ChunkKey), LayerChunkData>,
    dirty: DashSet<(WorldId, ChunkKey, String)>,
}

impl MemoryWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a world.
    pub fn insert_world(&mut self, world: World) {
        self.worlds.insert(world.id, world);
    }

    /// Seeds a hex cell into a world.
    pub fn insert_cell(&mut self, world: WorldId, cell: HexCell) {
        self.cells.insert((world, cell.position), cell);
    }

    /// Seeds a layer into a world.
    pub fn insert_layer(&mut self, world: WorldId, layer: Layer) {
        self.layers.insert((world, layer.name.clone()), layer);
    }

    /// All seeded cells of a world, in no particular order.
    pub fn cells(&self, world: WorldId) -> Vec<HexCell> {
        self.cells
            .iter()
            .filter(|((id, _), _)| *id == world)
            .map(|(_, cell)| cell.clone())
            .collect()
    }

    /// Returns a stored chunk payload, if any.
    pub fn chunk(
        &self,
        world: WorldId,
        layer_data_id: &str,
        key: ChunkKey,
    ) -> Option<LayerChunkData> {
        self.chunks
            .get(&(world, layer_data_id.to_string(), key))
            .map(|entry| entry.clone())
    }

    /// Total number of stored chunk payloads across all worlds and layers.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// All dirty records for a world, as `(key, source)` pairs.
    pub fn dirty_chunks(&self, world: WorldId) -> Vec<(ChunkKey, String)> {
        self.dirty
            .iter()
            .filter(|entry| entry.key().0 == world)
            .map(|entry| {
                let (_, key, source) = entry.key();
                (*key, source.clone())
            })
            .collect()
    }

    /// Whether a specific dirty record exists.
    pub fn is_dirty(&self, world: WorldId, key: ChunkKey, source: &str) -> bool {
        self.dirty.contains(&(world, key, source.to_string()))
    }
}

impl WorldLookup for MemoryWorld {
    fn world_by_id(&self, id: WorldId) -> Option<World> {
        self.worlds.get(&id).cloned()
    }
}

impl HexGridLookup for MemoryWorld {
    fn cell_at(&self, world: WorldId, position: &HexVector2) -> Option<HexCell> {
        self.cells.get(&(world, *position)).cloned()
    }
}

impl LayerLookup for MemoryWorld {
    fn layer_by_name(&self, world: WorldId, name: &str) -> Option<Layer> {
        self.layers.get(&(world, name.to_string())).cloned()
    }
}

impl ChunkStore for MemoryWorld {
    fn save_chunk(
        &self,
        world: WorldId,
        layer_data_id: &str,
        key: ChunkKey,
        data: LayerChunkData,
    ) -> Result<(), StoreError> {
        let replaced = self
            .chunks
            .insert((world, layer_data_id.to_string(), key), data);
        if replaced.is_some() {
            tracing::debug!(%world, %key, layer_data_id, "replaced stored chunk payload");
        }
        Ok(())
    }
}

impl DirtyChunkTracker for MemoryWorld {
    fn mark_dirty(&self, world: WorldId, key: ChunkKey, source: &str) {
        self.dirty.insert((world, key, source.to_string()));
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
