//! The terrain generation template: a fixed orchestration sequence around a
//! pluggable [`TerrainGenerator`].
//!
//! The sequence per job: resolve the [`GeneratorContext`] (required
//! parameters, world, hex cell, layer), configure the generator from the
//! cell's parameter map, run it, and report the block count. Any failure in
//! any step is wrapped into a single [`JobError`] carrying the original
//! cause; nothing is persisted by a failing step. Persistence happens only
//! through [`ChunkWriter::save_chunk`].

use std::collections::HashMap;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use hexworld_block::Block;
use hexworld_world::{
    ChunkKey, ChunkKeyError, ChunkStore, DirtyChunkTracker, HexCell, HexGridLookup,
    HexVector2, Layer, LayerChunkData, LayerLookup, PositionKeyError, StoreError, World,
    WorldId, WorldLookup,
};
use hexworld_paint::EditError;

use crate::job::Job;

/// Failure causes inside one generation job. All of them are fatal to the
/// job; lenient parameter handling never produces one of these.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// A required job parameter is missing or blank.
    #[error("missing or blank required job parameter {0:?}")]
    MissingParameter(&'static str),
    /// The target world does not exist.
    #[error("world {0} not found")]
    WorldNotFound(WorldId),
    /// The `"grid"` parameter is not a valid hex position key.
    #[error(transparent)]
    BadPositionKey(#[from] PositionKeyError),
    /// No hex cell at the parsed position.
    #[error("hex cell {position} not found in world {world}")]
    CellNotFound {
        world: WorldId,
        position: HexVector2,
    },
    /// No layer with the requested name.
    #[error("layer {0:?} not found")]
    LayerNotFound(String),
    /// The layer exists but has no storage identifier.
    #[error("layer {0:?} has no storage identifier")]
    LayerUnbound(String),
    /// A generator passed a malformed chunk key to the writer.
    #[error(transparent)]
    BadChunkKey(#[from] ChunkKeyError),
    /// The persistence boundary failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// An edit sink failed mid-paint.
    #[error(transparent)]
    Edit(#[from] EditError),
    /// Generator-specific failure.
    #[error("generator failed: {0}")]
    Other(String),
}

/// The single wrapped failure kind a job surfaces.
#[derive(Debug, thiserror::Error)]
#[error("terrain job for world {world} failed")]
pub struct JobError {
    pub world: WorldId,
    #[source]
    pub cause: GenerateError,
}

/// Success report for one job.
#[derive(Clone, Debug, PartialEq)]
pub struct JobReport {
    pub world: WorldId,
    /// Name of the generator that ran.
    pub generator: String,
    /// Blocks produced, as counted by the generator.
    pub blocks: u64,
    /// Chunks persisted through the writer.
    pub chunks_saved: u32,
}

/// Immutable per-job context derived from the required parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorContext {
    pub world_id: WorldId,
    pub grid_position: HexVector2,
    pub layer_name: String,
    /// Storage identifier resolved from the layer name.
    pub layer_data_id: String,
}

/// A concrete terrain algorithm.
///
/// The harness owns the orchestration; implementations supply the four
/// extension points. A generator instance serves one job at a time.
pub trait TerrainGenerator: Send {
    /// Stable name, used to tag dirty-chunk records.
    fn name(&self) -> &str;

    /// Consumes the hex cell's generator parameter map before generation.
    /// Malformed values degrade to defaults rather than failing the job.
    fn configure(&mut self, params: &HashMap<String, String>);

    /// Produces the terrain, persisting chunks through the writer, and
    /// returns the number of blocks generated.
    fn generate(
        &mut self,
        world: &World,
        cell: &HexCell,
        ctx: &GeneratorContext,
        writer: &mut ChunkWriter<'_>,
    ) -> Result<u64, GenerateError>;

    /// Surface height of the configured terrain at a world column.
    fn terrain_height(&self, world_x: i32, world_z: i32) -> i32;

    /// Per-corner mesh displacement for a surface block, derived from the
    /// neighboring column heights. Corner order: (-x,-z), (+x,-z), (-x,+z),
    /// (+x,+z).
    fn corner_offsets(
        &self,
        x: i32,
        y: i32,
        z: i32,
        heights: &FxHashMap<(i32, i32), i32>,
        center_height: i32,
    ) -> [f32; 4];
}

/// The only write path from generation into persistence: wholesale chunk
/// save plus a dirty mark tagged with the generator's name.
pub struct ChunkWriter<'a> {
    chunks: &'a dyn ChunkStore,
    dirty: &'a dyn DirtyChunkTracker,
    ctx: &'a GeneratorContext,
    source: &'a str,
    saved: u32,
}

impl<'a> ChunkWriter<'a> {
    fn new(
        chunks: &'a dyn ChunkStore,
        dirty: &'a dyn DirtyChunkTracker,
        ctx: &'a GeneratorContext,
        source: &'a str,
    ) -> Self {
        Self {
            chunks,
            dirty,
            ctx,
            source,
            saved: 0,
        }
    }

    /// Saves one chunk addressed by its textual key (`"<cx>:<cz>"`).
    pub fn save_chunk(
        &mut self,
        chunk_key: &str,
        blocks: Vec<(Block, i64)>,
    ) -> Result<(), GenerateError> {
        let key: ChunkKey = chunk_key.parse()?;
        self.save(key, blocks)
    }

    /// Saves one chunk addressed by a parsed key: replaces the stored
    /// payload wholesale, then marks the chunk dirty.
    pub fn save(&mut self, key: ChunkKey, blocks: Vec<(Block, i64)>) -> Result<(), GenerateError> {
        let data = LayerChunkData::new(key, blocks);
        self.chunks
            .save_chunk(self.ctx.world_id, &self.ctx.layer_data_id, key, data)?;
        self.dirty.mark_dirty(self.ctx.world_id, key, self.source);
        self.saved += 1;
        tracing::debug!(world = %self.ctx.world_id, %key, source = self.source, "chunk saved");
        Ok(())
    }

    /// Number of chunks persisted so far.
    pub fn chunks_saved(&self) -> u32 {
        self.saved
    }
}

/// Square block-space footprint a generator fills for one hex cell:
/// inclusive `(min_x, min_z, max_x, max_z)` bounds of the box of half-extent
/// `cell_edge` blocks around the cell's world center.
pub fn cell_bounds(cell: &HexCell, cell_edge: i32) -> (i32, i32, i32, i32) {
    let (cx, cz) = cell.position.world_center(cell_edge as f64);
    (
        cx - cell_edge,
        cz - cell_edge,
        cx + cell_edge,
        cz + cell_edge,
    )
}

/// Runs generation jobs against the collaborator seams.
pub struct GeneratorHarness {
    worlds: Arc<dyn WorldLookup>,
    grids: Arc<dyn HexGridLookup>,
    layers: Arc<dyn LayerLookup>,
    chunks: Arc<dyn ChunkStore>,
    dirty: Arc<dyn DirtyChunkTracker>,
}

impl GeneratorHarness {
    pub fn new(
        worlds: Arc<dyn WorldLookup>,
        grids: Arc<dyn HexGridLookup>,
        layers: Arc<dyn LayerLookup>,
        chunks: Arc<dyn ChunkStore>,
        dirty: Arc<dyn DirtyChunkTracker>,
    ) -> Self {
        Self {
            worlds,
            grids,
            layers,
            chunks,
            dirty,
        }
    }

    /// Convenience constructor for a backend implementing every contract
    /// (e.g. [`hexworld_world::MemoryWorld`]).
    pub fn for_backend<B>(backend: Arc<B>) -> Self
    where
        B: WorldLookup + HexGridLookup + LayerLookup + ChunkStore + DirtyChunkTracker + 'static,
    {
        Self::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
        )
    }

    /// Runs one job synchronously: resolve, configure, generate, report.
    ///
    /// # Errors
    ///
    /// Any failure in the sequence is wrapped into a single [`JobError`]
    /// carrying the original [`GenerateError`] cause. There are no retries.
    pub fn run_job(
        &self,
        generator: &mut dyn TerrainGenerator,
        job: &Job,
    ) -> Result<JobReport, JobError> {
        self.execute(generator, job).map_err(|cause| {
            tracing::error!(world = %job.world_id, error = %cause, "terrain job failed");
            JobError {
                world: job.world_id,
                cause,
            }
        })
    }

    fn execute(
        &self,
        generator: &mut dyn TerrainGenerator,
        job: &Job,
    ) -> Result<JobReport, GenerateError> {
        let (ctx, cell, world) = self.resolve_context(job)?;

        generator.configure(&cell.generator_params);

        let source = generator.name().to_string();
        let mut writer = ChunkWriter::new(
            self.chunks.as_ref(),
            self.dirty.as_ref(),
            &ctx,
            &source,
        );
        let blocks = generator.generate(&world, &cell, &ctx, &mut writer)?;
        let chunks_saved = writer.chunks_saved();

        tracing::info!(
            world = %job.world_id,
            generator = source,
            blocks,
            chunks_saved,
            "terrain job completed"
        );
        Ok(JobReport {
            world: job.world_id,
            generator: source,
            blocks,
            chunks_saved,
        })
    }

    /// Steps 1-4 of the sequence: required parameters, world, cell, layer.
    /// Fails before any I/O-side effect.
    fn resolve_context(&self, job: &Job) -> Result<(GeneratorContext, HexCell, World), GenerateError> {
        let grid_key = job.param_str("grid", "").trim();
        if grid_key.is_empty() {
            return Err(GenerateError::MissingParameter("grid"));
        }
        let layer_name = job.param_str("layer", "").trim();
        if layer_name.is_empty() {
            return Err(GenerateError::MissingParameter("layer"));
        }

        let world = self
            .worlds
            .world_by_id(job.world_id)
            .ok_or(GenerateError::WorldNotFound(job.world_id))?;

        let position: HexVector2 = grid_key.parse()?;
        let cell = self
            .grids
            .cell_at(job.world_id, &position)
            .ok_or(GenerateError::CellNotFound {
                world: job.world_id,
                position,
            })?;

        let layer: Layer = self
            .layers
            .layer_by_name(job.world_id, layer_name)
            .ok_or_else(|| GenerateError::LayerNotFound(layer_name.to_string()))?;
        let layer_data_id = layer
            .data_id
            .ok_or_else(|| GenerateError::LayerUnbound(layer_name.to_string()))?;

        let ctx = GeneratorContext {
            world_id: job.world_id,
            grid_position: position,
            layer_name: layer_name.to_string(),
            layer_data_id,
        };
        Ok((ctx, cell, world))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
