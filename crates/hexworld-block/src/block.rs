//! The [`Block`] voxel descriptor produced by painters and generators and
//! consumed by the chunk persistence boundary.

use serde::{Deserialize, Serialize};

/// One placed voxel.
///
/// Position is integral block-space. Rotation is a pair of angles in degrees
/// around the Y and X axes. `offsets` carries optional per-corner float
/// displacements used for mesh smoothing; `level` and `faces` are optional
/// gameplay state and face-visibility attributes. Optional fields stay `None`
/// until something writes them (see [`BlockDef::fill_block`]).
///
/// [`BlockDef::fill_block`]: crate::def::BlockDef::fill_block
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block type identifier, e.g. `"stone"` or `"hexworld:oak_door"`.
    pub type_id: String,
    /// Block-space X position.
    pub x: i32,
    /// Block-space Y position.
    pub y: i32,
    /// Block-space Z position.
    pub z: i32,
    /// Status / state code (0 = default).
    pub status: i32,
    /// Rotation around the vertical axis, degrees.
    pub rotation_x: f32,
    /// Rotation around the lateral axis, degrees.
    pub rotation_y: f32,
    /// Per-corner mesh-smoothing displacements.
    pub offsets: Option<Vec<f32>>,
    /// Optional level (e.g. fluid height, growth stage).
    pub level: Option<i32>,
    /// Optional face-visibility bitmask (see [`crate::face`]).
    pub faces: Option<u32>,
}

impl Block {
    /// Creates a block of the given type at a position, all optional
    /// attributes unset.
    pub fn at(type_id: impl Into<String>, x: i32, y: i32, z: i32) -> Self {
        Self {
            type_id: type_id.into(),
            x,
            y,
            z,
            status: 0,
            rotation_x: 0.0,
            rotation_y: 0.0,
            offsets: None,
            level: None,
            faces: None,
        }
    }

    /// Returns the position as a tuple.
    pub fn position(&self) -> (i32, i32, i32) {
        (self.x, self.y, self.z)
    }
}
