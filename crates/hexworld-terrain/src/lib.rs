//! Job-driven procedural terrain generation for hex-addressed worlds.
//!
//! One [`Job`] describes one unit of generation work: a target world plus a
//! string parameter map naming the hex cell and layer to generate. The
//! [`GeneratorHarness`] runs the fixed orchestration sequence (resolve
//! context, configure, generate, persist) around a pluggable
//! [`TerrainGenerator`], and the [`JobRunner`] executes jobs on a worker
//! pool.

pub mod flat;
pub mod generator;
pub mod heightmap;
pub mod hills;
pub mod job;
pub mod runner;

pub use flat::FlatGenerator;
pub use generator::{
    ChunkWriter, GenerateError, GeneratorContext, GeneratorHarness, JobError, JobReport,
    TerrainGenerator,
};
pub use heightmap::{NoiseParams, NoiseSampler};
pub use hills::HillsGenerator;
pub use job::Job;
pub use runner::{GeneratorFactory, JobOutcome, JobRunner};
