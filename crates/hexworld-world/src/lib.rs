//! World model for the terrain backend: chunk addressing, hex-grid cells,
//! named layers, and the collaborator contracts between generation and
//! persistence.
//!
//! The generation core never talks to storage directly; it goes through the
//! trait seams in [`store`] ([`WorldLookup`], [`ChunkStore`],
//! [`DirtyChunkTracker`], ...). [`MemoryWorld`] implements all of them for
//! tests, tools, and the demo server.

pub mod chunk_key;
pub mod hex;
pub mod layer;
pub mod memory;
pub mod store;
pub mod world;

pub use chunk_key::{CHUNK_SIZE, ChunkKey, ChunkKeyError};
pub use hex::{HexVector2, PositionKeyError};
pub use layer::{Layer, LayerChunkData};
pub use memory::MemoryWorld;
pub use store::{ChunkStore, DirtyChunkTracker, HexGridLookup, LayerLookup, StoreError, WorldLookup};
pub use world::{HexCell, World, WorldId};
