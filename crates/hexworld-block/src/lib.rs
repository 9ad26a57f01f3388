//! Voxel block value types and the compact textual block descriptor codec.
//!
//! A [`Block`] is one placed voxel: type, position, state and optional
//! placement attributes. A [`BlockDef`] is a reusable *template* for producing
//! blocks, round-trippable through the `<type>[@s:..][@o:..][@r:..][@l:..][@f:..]`
//! wire format used by editors and generator parameters.

pub mod block;
pub mod def;
pub mod face;

pub use block::Block;
pub use def::{BlockDef, parse_status, status};
pub use face::{
    FACE_DOWN, FACE_EAST, FACE_FIX, FACE_NORTH, FACE_SOUTH, FACE_UP, FACE_WEST, parse_face_spec,
};
