//! Generation jobs and the lenient typed parameter accessors.
//!
//! A job carries an opaque string parameter map. Required parameters
//! (`"grid"`, `"layer"`) are validated by the harness and fail the job when
//! missing; everything else is read through the accessors here, which
//! *degrade* instead of failing: a missing, blank, or unparseable value
//! falls back to the caller-supplied default (unparseable values are logged).

use std::collections::HashMap;

use hexworld_world::WorldId;

/// One unit of generation work, created by an external scheduler and
/// consumed exactly once. The core never mutates it.
#[derive(Clone, Debug)]
pub struct Job {
    /// Target world.
    pub world_id: WorldId,
    /// String-keyed parameters; keys unique, order irrelevant.
    pub params: HashMap<String, String>,
}

impl Job {
    pub fn new(world_id: WorldId) -> Self {
        Self {
            world_id,
            params: HashMap::new(),
        }
    }

    /// Adds a parameter, builder style.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// String parameter, or `default` when missing or blank.
    pub fn param_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        param_str(&self.params, key, default)
    }

    /// `i32` parameter with lenient fallback.
    pub fn param_i32(&self, key: &str, default: i32) -> i32 {
        param_i32(&self.params, key, default)
    }

    /// `i64` parameter with lenient fallback.
    pub fn param_i64(&self, key: &str, default: i64) -> i64 {
        param_i64(&self.params, key, default)
    }

    /// `f64` parameter with lenient fallback.
    pub fn param_f64(&self, key: &str, default: f64) -> f64 {
        param_f64(&self.params, key, default)
    }
}

/// String value from any parameter map, or `default` when missing or blank.
pub fn param_str<'a>(params: &'a HashMap<String, String>, key: &str, default: &'a str) -> &'a str {
    match params.get(key) {
        Some(value) if !value.trim().is_empty() => value,
        _ => default,
    }
}

/// `i32` value with lenient fallback: missing/blank returns the default
/// silently; a present but unparseable value logs and returns the default.
pub fn param_i32(params: &HashMap<String, String>, key: &str, default: i32) -> i32 {
    param_parsed(params, key, default)
}

/// `i64` value with lenient fallback (see [`param_i32`]).
pub fn param_i64(params: &HashMap<String, String>, key: &str, default: i64) -> i64 {
    param_parsed(params, key, default)
}

/// `f64` value with lenient fallback (see [`param_i32`]).
pub fn param_f64(params: &HashMap<String, String>, key: &str, default: f64) -> f64 {
    param_parsed(params, key, default)
}

fn param_parsed<T>(params: &HashMap<String, String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    let Some(value) = params.get(key) else {
        return default;
    };
    let value = value.trim();
    if value.is_empty() {
        return default;
    }
    match value.parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!(key, value, %default, "unparseable generator parameter, using default");
            default
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job::new(WorldId(1))
            .with_param("grid", "0:0")
            .with_param("seed", "42")
            .with_param("ratio", "0.25")
            .with_param("bad", "not-a-number")
            .with_param("blank", "   ")
    }

    #[test]
    fn test_param_str_defaults_on_missing_or_blank() {
        let job = job();
        assert_eq!(job.param_str("grid", "x"), "0:0");
        assert_eq!(job.param_str("missing", "x"), "x");
        assert_eq!(job.param_str("blank", "x"), "x");
    }

    #[test]
    fn test_numeric_params_parse() {
        let job = job();
        assert_eq!(job.param_i32("seed", 0), 42);
        assert_eq!(job.param_i64("seed", 0), 42);
        assert_eq!(job.param_f64("ratio", 0.0), 0.25);
    }

    #[test]
    fn test_unparseable_numeric_degrades_to_default() {
        let job = job();
        assert_eq!(job.param_i32("bad", 7), 7);
        assert_eq!(job.param_i64("bad", -1), -1);
        assert_eq!(job.param_f64("bad", 1.5), 1.5);
    }

    #[test]
    fn test_missing_and_blank_numeric_default_silently() {
        let job = job();
        assert_eq!(job.param_i32("missing", 3), 3);
        assert_eq!(job.param_i32("blank", 3), 3);
    }
}
