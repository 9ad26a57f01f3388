//! Axial hex-grid coordinates and position-key parsing.
//!
//! Hex cells scope per-region generator parameters. Cells are addressed by a
//! textual position key `"<q>:<r>"` in axial coordinates over a flat-top hex
//! layout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error produced when parsing a textual hex position key.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("malformed hex position key: {0:?}")]
pub struct PositionKeyError(pub String);

/// Axial hex coordinate, canonically written `"<q>:<r>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexVector2 {
    pub q: i32,
    pub r: i32,
}

impl HexVector2 {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Block-space center of this cell for a flat-top layout with the given
    /// edge length in blocks.
    ///
    /// `x = edge * 3/2 * q`, `z = edge * sqrt(3) * (r + q/2)`, rounded to the
    /// nearest block column.
    pub fn world_center(&self, edge: f64) -> (i32, i32) {
        let x = edge * 1.5 * self.q as f64;
        let z = edge * 3.0_f64.sqrt() * (self.r as f64 + self.q as f64 / 2.0);
        (x.round() as i32, z.round() as i32)
    }
}

impl fmt::Display for HexVector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.q, self.r)
    }
}

impl FromStr for HexVector2 {
    type Err = PositionKeyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || PositionKeyError(text.to_string());
        let (q, r) = text.split_once(':').ok_or_else(malformed)?;
        Ok(Self {
            q: q.trim().parse().map_err(|_| malformed())?,
            r: r.trim().parse().map_err(|_| malformed())?,
        })
    }
}

impl std::ops::Add for HexVector2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.q + other.q, self.r + other.r)
    }
}

impl std::ops::Sub for HexVector2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.q - other.q, self.r - other.r)
    }
}
