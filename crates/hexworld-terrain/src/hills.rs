//! Rolling-hills terrain from fBm noise: stone body, dirt blanket, surface
//! blocks smoothed with per-corner offsets from the column neighborhood.

use std::collections::HashMap;

use rustc_hash::FxHashMap;

use hexworld_block::BlockDef;
use hexworld_paint::{ChunkEditBuffer, EditSink, PaintSession, Painter, commit_all};
use hexworld_world::{HexCell, World};

use crate::flat::param_block;
use crate::generator::{
    ChunkWriter, GenerateError, GeneratorContext, TerrainGenerator, cell_bounds,
};
use crate::heightmap::{NoiseParams, NoiseSampler};
use crate::job::param_i32;

/// Depth of the dirt blanket between stone and the surface block.
const DIRT_DEPTH: i32 = 2;

/// Noise-driven hill terrain over a hex cell footprint.
pub struct HillsGenerator {
    cell_edge: i32,
    /// Mean surface height the noise displaces around.
    ground: i32,
    sampler: NoiseSampler,
    stone: BlockDef,
    dirt: BlockDef,
    surface: BlockDef,
    group_id: i64,
}

impl HillsGenerator {
    pub fn new(cell_edge: i32) -> Self {
        Self {
            cell_edge: cell_edge.max(1),
            ground: 8,
            sampler: NoiseSampler::new(NoiseParams::default()),
            stone: BlockDef::new("stone"),
            dirt: BlockDef::new("dirt"),
            surface: BlockDef::new("grass"),
            group_id: 0,
        }
    }

    /// Column heights for the footprint plus a one-block ring, as needed by
    /// the corner-offset neighborhood.
    fn column_heights(
        &self,
        min_x: i32,
        min_z: i32,
        max_x: i32,
        max_z: i32,
    ) -> FxHashMap<(i32, i32), i32> {
        let mut heights = FxHashMap::default();
        for x in min_x - 1..=max_x + 1 {
            for z in min_z - 1..=max_z + 1 {
                heights.insert((x, z), self.terrain_height(x, z));
            }
        }
        heights
    }
}

impl TerrainGenerator for HillsGenerator {
    fn name(&self) -> &str {
        "hills"
    }

    fn configure(&mut self, params: &HashMap<String, String>) {
        self.cell_edge = param_i32(params, "cell_edge", self.cell_edge).max(1);
        self.ground = param_i32(params, "ground", self.ground).max(1);
        self.sampler = NoiseSampler::new(NoiseParams::from_params(params));
        self.stone = param_block(params, "stone_block", &self.stone);
        self.dirt = param_block(params, "dirt_block", &self.dirt);
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
        let heights = self.column_heights(min_x, min_z, max_x, max_z);
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

        // Stone body: one vertical column per footprint position.
        let stone = session(&self.stone);
        let mut painter = Painter::new(&stone, &mut buffer);
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                let top = heights[&(x, z)] - DIRT_DEPTH - 1;
                if top >= 0 {
                    painter.line(x, 0, z, x, top, z)?;
                }
            }
        }

        // Dirt blanket under the surface.
        let dirt = session(&self.dirt);
        let mut painter = Painter::new(&dirt, &mut buffer);
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                let surface = heights[&(x, z)];
                for y in (surface - DIRT_DEPTH).max(0)..surface {
                    painter.paint(x, y, z)?;
                }
            }
        }

        // Surface blocks carry per-position corner offsets, so they bypass
        // the template painter and go to the sink directly.
        for x in min_x..=max_x {
            for z in min_z..=max_z {
                let surface = heights[&(x, z)];
                let mut block = self.surface.block_at(x, surface, z);
                block.offsets = Some(
                    self.corner_offsets(x, surface, z, &heights, surface)
                        .to_vec(),
                );
                buffer.commit_block(
                    ctx.world_id,
                    &ctx.layer_data_id,
                    self.name(),
                    block,
                    self.group_id,
                )?;
            }
        }

        let blocks = buffer.block_count() as u64;
        for (key, chunk_blocks) in buffer.drain() {
            writer.save(key, chunk_blocks)?;
        }
        Ok(blocks)
    }

    fn terrain_height(&self, world_x: i32, world_z: i32) -> i32 {
        let offset = self.sampler.sample(world_x as f64, world_z as f64);
        (self.ground + offset.round() as i32).max(1)
    }

    /// Half the deviation of each corner's column neighborhood from the
    /// center height, clamped to half a block.
    fn corner_offsets(
        &self,
        x: i32,
        _y: i32,
        z: i32,
        heights: &FxHashMap<(i32, i32), i32>,
        center_height: i32,
    ) -> [f32; 4] {
        let height_at = |hx: i32, hz: i32| -> f32 {
            heights
                .get(&(hx, hz))
                .copied()
                .unwrap_or(center_height) as f32
        };
        let mut offsets = [0.0; 4];
        for (i, (dx, dz)) in [(-1, -1), (1, -1), (-1, 1), (1, 1)].into_iter().enumerate() {
            let neighborhood = (center_height as f32
                + height_at(x + dx, z)
                + height_at(x, z + dz)
                + height_at(x + dx, z + dz))
                / 4.0;
            offsets[i] = ((neighborhood - center_height as f32) * 0.5).clamp(-0.5, 0.5);
        }
        offsets
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use hexworld_world::{HexVector2, Layer, MemoryWorld, WorldId};

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

    fn seeded_cell() -> HexCell {
        HexCell::new(HexVector2::new(0, 0))
            .with_param("seed", "42")
            .with_param("ground", "8")
            .with_param("amplitude", "4")
    }

    fn job() -> Job {
        Job::new(WorldId(1))
            .with_param("grid", "0:0")
            .with_param("layer", "terrain")
    }

    fn run(backend: &Arc<MemoryWorld>) -> crate::generator::JobReport {
        let harness = GeneratorHarness::for_backend(backend.clone());
        let mut generator = HillsGenerator::new(2);
        harness.run_job(&mut generator, &job()).unwrap()
    }

    #[test]
    fn test_hills_are_deterministic_per_seed() {
        let a = backend(seeded_cell());
        let b = backend(seeded_cell());
        let report_a = run(&a);
        let report_b = run(&b);
        assert_eq!(report_a.blocks, report_b.blocks);
        assert_eq!(report_a.chunks_saved, report_b.chunks_saved);
    }

    #[test]
    fn test_every_column_has_a_surface_block() {
        let backend = backend(seeded_cell());
        run(&backend);

        let mut generator = HillsGenerator::new(2);
        generator.configure(&seeded_cell().generator_params);

        // 5x5 footprint centered on the origin.
        for x in -2..=2 {
            for z in -2..=2_i32 {
                let height = generator.terrain_height(x, z);
                let key = hexworld_world::ChunkKey::containing(x, z);
                let stored = backend.chunk(WorldId(1), "ld-terrain", key).unwrap();
                let found = stored.blocks.iter().any(|(block, _)| {
                    block.position() == (x, height, z) && block.type_id == "grass"
                });
                assert!(found, "no surface block at ({x}, {height}, {z})");
            }
        }
    }

    #[test]
    fn test_surface_blocks_carry_corner_offsets() {
        let backend = backend(seeded_cell());
        run(&backend);

        let stored = backend
            .chunk(WorldId(1), "ld-terrain", hexworld_world::ChunkKey::new(0, 0))
            .unwrap();
        let surface: Vec<_> = stored
            .blocks
            .iter()
            .filter(|(block, _)| block.type_id == "grass")
            .collect();
        assert!(!surface.is_empty());
        for (block, _) in surface {
            let offsets = block.offsets.as_ref().expect("surface offsets set");
            assert_eq!(offsets.len(), 4);
            assert!(offsets.iter().all(|o| (-0.5..=0.5).contains(o)));
        }
    }

    #[test]
    fn test_terrain_height_tracks_ground_and_amplitude() {
        let mut generator = HillsGenerator::new(2);
        generator.configure(&seeded_cell().generator_params);

        let bound = generator.sampler.max_amplitude().ceil() as i32;
        for x in -8..8 {
            for z in -8..8 {
                let height = generator.terrain_height(x, z);
                assert!(height >= 1);
                assert!((height - 8).abs() <= bound + 1);
            }
        }
    }

    #[test]
    fn test_dirty_marks_tagged_with_generator_name() {
        let backend = backend(seeded_cell());
        run(&backend);
        let dirty = backend.dirty_chunks(WorldId(1));
        assert!(!dirty.is_empty());
        assert!(dirty.iter().all(|(_, source)| source == "hills"));
    }
}
