//! Flat layered terrain: bedrock floor, filler body, surface plane.
//!
//! The simplest concrete generator; useful for sandbox worlds and as the
//! reference for the template sequence. All block volume goes through the
//! painter so the shape path is exercised end to end.

use std::collections::HashMap;

use rustc_hash::FxHashMap;

use hexworld_block::BlockDef;
use hexworld_paint::{ChunkEditBuffer, PaintSession, Painter, commit_all};
use hexworld_world::{HexCell, World};

use crate::generator::{
    ChunkWriter, GenerateError, GeneratorContext, TerrainGenerator, cell_bounds,
};
use crate::job::{param_i32, param_str};

/// Generates a flat slab per hex cell: bedrock at y = 0, filler up to the
/// ground level, one surface plane on top.
pub struct FlatGenerator {
    cell_edge: i32,
    ground: i32,
    bedrock: BlockDef,
    filler: BlockDef,
    surface: BlockDef,
    group_id: i64,
}

impl FlatGenerator {
    pub fn new(cell_edge: i32) -> Self {
        Self {
            cell_edge: cell_edge.max(1),
            ground: 4,
            bedrock: BlockDef::new("bedrock"),
            filler: BlockDef::new("dirt"),
            surface: BlockDef::new("grass"),
            group_id: 0,
        }
    }
}

/// Reads a block template parameter; a malformed descriptor degrades to the
/// current template with a warning, mirroring the numeric leniency rules.
pub(crate) fn param_block(
    params: &HashMap<String, String>,
    key: &str,
    current: &BlockDef,
) -> BlockDef {
    let text = param_str(params, key, "");
    if text.is_empty() {
        return current.clone();
    }
    match BlockDef::parse(text) {
        Some(def) => def,
        None => {
            tracing::warn!(key, text, "unparseable block descriptor, keeping default");
            current.clone()
        }
    }
}

impl TerrainGenerator for FlatGenerator {
    fn name(&self) -> &str {
        "flat"
    }

    fn configure(&mut self, params: &HashMap<String, String>) {
        self.cell_edge = param_i32(params, "cell_edge", self.cell_edge).max(1);
        self.ground = param_i32(params, "ground", self.ground).max(1);
        self.bedrock = param_block(params, "bedrock_block", &self.bedrock);
        self.filler = param_block(params, "filler_block", &self.filler);
        self.surface = param_block(params, "surface_block", &self.surface);
    }

    fn generate(
        &mut self,
        _world: &World,
        cell: &HexCell,
        ctx: &GeneratorContext,
        writer: &mut ChunkWriter<'_>,
    ) -> Result<u64, GenerateError> {
        let (min_x, min_z, max_x, max_z) = cell_bounds(cell, self.cell_edge);
        let (sx, sz) = (max_x - min_x + 1, max_z - min_z + 1);
        let mut buffer = ChunkEditBuffer::new();

        let session = |template: &BlockDef| {
            PaintSession::new(
                template.clone(),
                ctx.world_id,
                ctx.layer_data_id.clone(),
                self.name(),
                self.group_id,
                commit_all(),
            )
        };

        let bedrock = session(&self.bedrock);
        Painter::new(&bedrock, &mut buffer).rectangle_y(min_x, 0, min_z, sx, sz)?;

        if self.ground > 1 {
            let filler = session(&self.filler);
            Painter::new(&filler, &mut buffer).cube(min_x, 1, min_z, sx, self.ground - 1, sz)?;
        }

        let surface = session(&self.surface);
        Painter::new(&surface, &mut buffer).rectangle_y(min_x, self.ground, min_z, sx, sz)?;

        let blocks = buffer.block_count() as u64;
        for (key, chunk_blocks) in buffer.drain() {
            writer.save(key, chunk_blocks)?;
        }
        Ok(blocks)
    }

    fn terrain_height(&self, _world_x: i32, _world_z: i32) -> i32 {
        self.ground
    }

    fn corner_offsets(
        &self,
        _x: i32,
        _y: i32,
        _z: i32,
        _heights: &FxHashMap<(i32, i32), i32>,
        _center_height: i32,
    ) -> [f32; 4] {
        // Flat terrain needs no smoothing.
        [0.0; 4]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hexworld_world::{ChunkKey, HexVector2, Layer, MemoryWorld, WorldId};

    use crate::generator::GeneratorHarness;
    use crate::job::Job;

    fn backend(cell: HexCell) -> Arc<MemoryWorld> {
        let id = WorldId(1);
        let mut store = MemoryWorld::new();
        store.insert_world(World::new(id, "test"));
        store.insert_layer(id, Layer::new("terrain", "ld-terrain"));
        store.insert_cell(id, cell);
        Arc::new(store)
    }

    fn job() -> Job {
        Job::new(WorldId(1))
            .with_param("grid", "0:0")
            .with_param("layer", "terrain")
    }

    #[test]
    fn test_flat_cell_block_counts() {
        let backend = backend(HexCell::new(HexVector2::new(0, 0)));
        let harness = GeneratorHarness::for_backend(backend.clone());
        let mut generator = FlatGenerator::new(3);

        let report = harness.run_job(&mut generator, &job()).unwrap();
        // 7x7 footprint: bedrock plane + 3 filler layers + surface plane.
        assert_eq!(report.blocks, 49 * 5);
        assert_eq!(report.generator, "flat");
        assert!(report.chunks_saved > 0);

        // The footprint spans chunk indices -1 and 0 on both axes.
        assert_eq!(report.chunks_saved, 4);
        for (cx, cz) in [(0, 0), (-1, 0), (0, -1), (-1, -1)] {
            let key = ChunkKey::new(cx, cz);
            assert!(backend.chunk(WorldId(1), "ld-terrain", key).is_some());
            assert!(backend.is_dirty(WorldId(1), key, "flat"));
        }
    }

    #[test]
    fn test_configure_overrides_ground_and_blocks() {
        let cell = HexCell::new(HexVector2::new(0, 0))
            .with_param("ground", "2")
            .with_param("surface_block", "sand")
            .with_param("cell_edge", "1");
        let backend = backend(cell);
        let harness = GeneratorHarness::for_backend(backend.clone());
        let mut generator = FlatGenerator::new(3);

        let report = harness.run_job(&mut generator, &job()).unwrap();
        // 3x3 footprint: bedrock + 1 filler layer + surface.
        assert_eq!(report.blocks, 9 * 3);
        assert_eq!(generator.terrain_height(0, 0), 2);

        let stored = backend
            .chunk(WorldId(1), "ld-terrain", ChunkKey::new(0, 0))
            .unwrap();
        let surface_present = stored
            .blocks
            .iter()
            .any(|(block, _)| block.type_id == "sand" && block.y == 2);
        assert!(surface_present);
    }

    #[test]
    fn test_malformed_block_param_degrades() {
        let cell = HexCell::new(HexVector2::new(0, 0)).with_param("surface_block", "bad id");
        let backend = backend(cell);
        let harness = GeneratorHarness::for_backend(backend.clone());
        let mut generator = FlatGenerator::new(1);

        harness.run_job(&mut generator, &job()).unwrap();
        let stored = backend
            .chunk(WorldId(1), "ld-terrain", ChunkKey::new(0, 0))
            .unwrap();
        assert!(
            stored
                .blocks
                .iter()
                .any(|(block, _)| block.type_id == "grass")
        );
    }
}
