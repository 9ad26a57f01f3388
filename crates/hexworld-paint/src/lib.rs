//! Geometric block painting: shape primitives rasterized into per-voxel edit
//! commits, filtered through pluggable paint strategies.
//!
//! A [`Painter`] turns high-level shapes (lines, boxes, circles, spheres,
//! cones, pyramids, triangles) into individual [`paint`](Painter::paint)
//! calls. Each candidate voxel is offered to the session's
//! [`PaintStrategy`]; committed voxels are built from the session's
//! [`BlockDef`](hexworld_block::BlockDef) template and forwarded one at a
//! time to an [`EditSink`]. There is no batching and no rollback.

pub mod painter;
pub mod sink;
pub mod strategy;

pub use painter::{PaintSession, Painter};
pub use sink::{ChunkEditBuffer, EditError, EditSink, SelectionFeedback};
pub use strategy::{
    PaintStrategy, StrategyProvider, StrategyRegistry, StrategyRegistryError, commit_all,
};
