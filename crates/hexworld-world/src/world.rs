//! Worlds and hex-grid cells.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hex::HexVector2;

/// Identifier of one world instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorldId(pub i64);

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One world instance. Worlds are created by the platform ahead of time;
/// generation only reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    pub name: String,
}

impl World {
    pub fn new(id: WorldId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// One hex-grid cell: a spatial partition carrying the generator parameters
/// for its region.
///
/// Cells pre-exist generation and are looked up read-only per job; the
/// parameter map is handed verbatim to the generator's configure step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexCell {
    /// Axial position of the cell; also its lookup key.
    pub position: HexVector2,
    /// Generator parameters scoped to this cell (string-keyed, string-valued).
    pub generator_params: HashMap<String, String>,
}

impl HexCell {
    /// Creates a cell with no generator parameters.
    pub fn new(position: HexVector2) -> Self {
        Self {
            position,
            generator_params: HashMap::new(),
        }
    }

    /// Adds a generator parameter, builder style.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.generator_params.insert(key.into(), value.into());
        self
    }
}
