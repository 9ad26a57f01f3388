//! Multi-octave fractal Brownian motion (fBm) noise over simplex noise,
//! used by height-based generators.

use std::collections::HashMap;

use noise::{NoiseFn, Simplex};

use crate::job::{param_f64, param_i64};

/// fBm parameters, readable leniently from a generator parameter map.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseParams {
    /// Seed for deterministic generation.
    pub seed: u64,
    /// Number of octaves to composite.
    pub octaves: u32,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency of the first octave.
    pub base_frequency: f64,
    /// Amplitude of the first octave, in blocks.
    pub amplitude: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            base_frequency: 0.01,
            amplitude: 12.0,
        }
    }
}

impl NoiseParams {
    /// Reads parameters from a hex cell's generator map. Missing or
    /// malformed values degrade to the defaults above.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: param_i64(params, "seed", defaults.seed as i64) as u64,
            octaves: param_i64(params, "octaves", defaults.octaves as i64).clamp(1, 16) as u32,
            lacunarity: param_f64(params, "lacunarity", defaults.lacunarity),
            persistence: param_f64(params, "persistence", defaults.persistence),
            base_frequency: param_f64(params, "frequency", defaults.base_frequency),
            amplitude: param_f64(params, "amplitude", defaults.amplitude),
        }
    }
}

/// Samples terrain height offsets as fBm over simplex noise: each octave
/// doubles (by `lacunarity`) in frequency and shrinks (by `persistence`) in
/// amplitude.
pub struct NoiseSampler {
    noise: Simplex,
    params: NoiseParams,
}

impl NoiseSampler {
    pub fn new(params: NoiseParams) -> Self {
        let noise = Simplex::new(params.seed as u32);
        Self { noise, params }
    }

    /// Samples the height offset at a world column.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.base_frequency;
        let mut amplitude = self.params.amplitude;

        for _ in 0..self.params.octaves {
            total += self.noise.get([x * frequency, z * frequency]) * amplitude;
            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total
    }

    /// Theoretical maximum absolute sample value (geometric amplitude sum).
    pub fn max_amplitude(&self) -> f64 {
        let mut sum = 0.0;
        let mut amplitude = self.params.amplitude;
        for _ in 0..self.params.octaves {
            sum += amplitude;
            amplitude *= self.params.persistence;
        }
        sum
    }

    pub fn params(&self) -> &NoiseParams {
        &self.params
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
