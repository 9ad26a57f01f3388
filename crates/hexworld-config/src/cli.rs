//! Command-line argument parsing for the hexworld server.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Hexworld server command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexworld", about = "Hexworld terrain server")]
pub struct CliArgs {
    /// Worker thread count (0 = derive from CPU count).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Pending-job queue capacity.
    #[arg(long)]
    pub queue_capacity: Option<usize>,

    /// Generator name for cells that name none.
    #[arg(long)]
    pub generator: Option<String>,

    /// Half-extent of the block footprint per hex cell.
    #[arg(long)]
    pub cell_edge: Option<i32>,

    /// Layer generation jobs target by default.
    #[arg(long)]
    pub layer: Option<String>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(threads) = args.threads {
            self.worker.threads = threads;
        }
        if let Some(capacity) = args.queue_capacity {
            self.worker.queue_capacity = capacity;
        }
        if let Some(ref generator) = args.generator {
            self.generation.generator = generator.clone();
        }
        if let Some(edge) = args.cell_edge {
            self.generation.cell_edge = edge;
        }
        if let Some(ref layer) = args.layer {
            self.generation.default_layer = layer.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            threads: Some(4),
            generator: Some("hills".to_string()),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.worker.threads, 4);
        assert_eq!(config.generation.generator, "hills");
        // Non-overridden fields retain defaults
        assert_eq!(config.worker.queue_capacity, 64);
        assert_eq!(config.generation.default_layer, "terrain");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
