//! Server binary: seeds a demo world, generates its terrain on the worker
//! pool, and paints a landmark on top.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI
//! flags. Run with `cargo run -p hexworld-server -- --generator hills` to
//! switch the default generator.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::{error, info, warn};

use hexworld_block::BlockDef;
use hexworld_config::{CliArgs, Config};
use hexworld_paint::{ChunkEditBuffer, EditError, PaintSession, Painter, StrategyRegistry};
use hexworld_terrain::{
    FlatGenerator, GeneratorFactory, GeneratorHarness, HillsGenerator, Job, JobOutcome, JobRunner,
};
use hexworld_world::{
    ChunkStore, DirtyChunkTracker, HexCell, HexVector2, Layer, LayerChunkData, MemoryWorld,
    StoreError, World, WorldId,
};

const DEMO_WORLD: WorldId = WorldId(1);
const TERRAIN_LAYER: &str = "terrain";
const TERRAIN_DATA_ID: &str = "ld-terrain";

fn main() {
    let args = CliArgs::parse();

    let config_dir = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("config"));

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    hexworld_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let registry = Arc::new(StrategyRegistry::new());
    info!(
        strategies = ?registry.names().collect::<Vec<_>>(),
        "paint strategies registered"
    );

    let backend = Arc::new(seed_demo_world(&config));
    let harness = Arc::new(GeneratorHarness::for_backend(backend.clone()));
    let runner = spawn_runner(&config, harness);

    let submitted = submit_generation_jobs(&config, &backend, &runner);
    let outcomes = wait_for_outcomes(&runner, submitted);

    let mut generated_blocks = 0;
    for outcome in &outcomes {
        match outcome {
            JobOutcome::Completed(report) => {
                generated_blocks += report.blocks;
                info!(
                    world = %report.world,
                    generator = report.generator,
                    blocks = report.blocks,
                    chunks = report.chunks_saved,
                    "cell generated"
                );
            }
            JobOutcome::Failed(job_error) => {
                error!(world = %job_error.world, error = %job_error.cause, "cell failed");
            }
        }
    }

    match paint_landmark(&config, &registry, backend.as_ref()) {
        Ok(blocks) => info!(blocks, "landmark painted"),
        Err(e) => error!(error = %e, "landmark painting failed"),
    }

    info!(
        cells = outcomes.len(),
        blocks = generated_blocks,
        chunks = backend.chunk_count(),
        dirty = backend.dirty_chunks(DEMO_WORLD).len(),
        "demo world ready"
    );
}

/// Builds the in-memory backend with one world, one bound layer, and a hex
/// disk of radius 2. The outer ring uses the hills generator, the interior
/// the configured default.
fn seed_demo_world(config: &Config) -> MemoryWorld {
    let mut store = MemoryWorld::new();
    store.insert_world(World::new(DEMO_WORLD, "overworld"));
    store.insert_layer(DEMO_WORLD, Layer::new(TERRAIN_LAYER, TERRAIN_DATA_ID));

    for q in -2..=2_i32 {
        for r in -2..=2_i32 {
            if (q + r).abs() > 2 {
                continue;
            }
            let on_ring = q.abs() == 2 || r.abs() == 2 || (q + r).abs() == 2;
            let mut cell = HexCell::new(HexVector2::new(q, r))
                .with_param("cell_edge", config.generation.cell_edge.to_string())
                .with_param("surface_block", config.generation.default_block.as_str());
            if on_ring {
                cell = cell
                    .with_param("generator", "hills")
                    .with_param("seed", "1337")
                    .with_param("amplitude", "6");
            }
            store.insert_cell(DEMO_WORLD, cell);
        }
    }
    store
}

fn spawn_runner(config: &Config, harness: Arc<GeneratorHarness>) -> JobRunner {
    let cell_edge = config.generation.cell_edge;
    let default_generator = config.generation.generator.clone();
    let factory: GeneratorFactory = Arc::new(move |job: &Job| {
        match job.param_str("generator", &default_generator) {
            "hills" => Box::new(HillsGenerator::new(cell_edge)),
            _ => Box::new(FlatGenerator::new(cell_edge)),
        }
    });

    if config.worker.threads == 0 {
        JobRunner::with_defaults(harness, factory)
    } else {
        JobRunner::new(
            harness,
            factory,
            config.worker.threads,
            config.worker.queue_capacity,
            config.worker.outcome_capacity,
        )
    }
}

/// One job per seeded cell. A full queue sheds the job with a warning.
fn submit_generation_jobs(config: &Config, backend: &MemoryWorld, runner: &JobRunner) -> usize {
    let mut submitted = 0;
    for cell in backend.cells(DEMO_WORLD) {
        let position = cell.position;
        let mut job = Job::new(DEMO_WORLD)
            .with_param("grid", position.to_string())
            .with_param("layer", config.generation.default_layer.as_str());
        if let Some(generator) = cell.generator_params.get("generator") {
            job = job.with_param("generator", generator.as_str());
        }
        match runner.submit(job) {
            Ok(()) => submitted += 1,
            Err(job) => warn!(world = %job.world_id, %position, "job queue full, cell skipped"),
        }
    }
    submitted
}

fn wait_for_outcomes(runner: &JobRunner, expected: usize) -> Vec<JobOutcome> {
    let mut outcomes = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(60);
    while outcomes.len() < expected && Instant::now() < deadline {
        outcomes.extend(runner.drain_outcomes());
        if outcomes.len() < expected {
            std::thread::sleep(Duration::from_millis(10));
        }
    }
    outcomes
}

#[derive(Debug, thiserror::Error)]
enum LandmarkError {
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("paint strategy {0:?} not registered")]
    UnknownStrategy(&'static str),
}

/// Paints a stone pyramid crowned with a glass dome at the world origin,
/// rasterized through the checkerboard strategy, and persists the result.
fn paint_landmark(
    config: &Config,
    registry: &StrategyRegistry,
    backend: &MemoryWorld,
) -> Result<u64, LandmarkError> {
    let strategy = registry
        .create("raster")
        .ok_or(LandmarkError::UnknownStrategy("raster"))?;
    let base_y = 1 + config.generation.cell_edge.min(8);

    let mut buffer = ChunkEditBuffer::new();

    let pyramid = PaintSession::new(
        BlockDef::new("stone"),
        DEMO_WORLD,
        TERRAIN_DATA_ID,
        "landmark",
        1,
        strategy,
    );
    let mut painter = Painter::new(&pyramid, &mut buffer);
    painter.pyramid_outline(0, base_y, 0, 6, 7)?;

    let dome = PaintSession::new(
        BlockDef::new("glass"),
        DEMO_WORLD,
        TERRAIN_DATA_ID,
        "landmark",
        1,
        hexworld_paint::commit_all(),
    );
    let mut painter = Painter::new(&dome, &mut buffer);
    painter.dome_outline(0, base_y + 7, 0, 4)?;

    let blocks = buffer.block_count() as u64;
    for (key, chunk_blocks) in buffer.drain() {
        // Merge on top of generated terrain rather than replacing the chunk.
        let mut data = backend
            .chunk(DEMO_WORLD, TERRAIN_DATA_ID, key)
            .unwrap_or_else(|| LayerChunkData::new(key, Vec::new()));
        data.blocks.extend(chunk_blocks);
        backend.save_chunk(DEMO_WORLD, TERRAIN_DATA_ID, key, data)?;
        backend.mark_dirty(DEMO_WORLD, key, "landmark");
    }
    Ok(blocks)
}
