//! Paint strategies: pure predicates deciding which candidate voxels within
//! a shape are actually committed, plus the provider registry.
//!
//! The registry is populated once at process start (built-ins are
//! pre-registered) and read thereafter; handing it around as
//! `Arc<StrategyRegistry>` makes post-startup registration impossible by
//! construction.

use std::sync::Arc;

use hashbrown::HashMap;

/// Decides whether a candidate voxel is committed.
///
/// Strategies are pure over the coordinate; the commit action itself (build
/// a block from the template, forward to the sink) stays with the painter.
pub trait PaintStrategy: Send + Sync {
    fn should_commit(&self, x: i32, y: i32, z: i32) -> bool;
}

/// Commits every candidate voxel.
struct CommitAll;

impl PaintStrategy for CommitAll {
    fn should_commit(&self, _x: i32, _y: i32, _z: i32) -> bool {
        true
    }
}

/// Commits the even-parity half of the lattice: `(x + y + z) mod 2 == 0`.
struct Raster;

impl PaintStrategy for Raster {
    fn should_commit(&self, x: i32, y: i32, z: i32) -> bool {
        (x + y + z) % 2 == 0
    }
}

/// Commits voxels lying on any grid line of the given modulus:
/// `x % m == 0 || y % m == 0 || z % m == 0`.
struct GridLines {
    modulus: i32,
}

impl PaintStrategy for GridLines {
    fn should_commit(&self, x: i32, y: i32, z: i32) -> bool {
        x % self.modulus == 0 || y % self.modulus == 0 || z % self.modulus == 0
    }
}

/// The commit-everything strategy, for callers that bypass the registry
/// (bulk generators painting unfiltered terrain).
pub fn commit_all() -> Arc<dyn PaintStrategy> {
    Arc::new(CommitAll)
}

/// A named, instantiable strategy source.
pub trait StrategyProvider: Send + Sync {
    /// Stable registry key.
    fn name(&self) -> &str;
    /// Human-readable title for editor UIs.
    fn title(&self) -> &str;
    /// Instantiates the strategy.
    fn create(&self) -> Arc<dyn PaintStrategy>;
}

struct BuiltinProvider {
    name: &'static str,
    title: &'static str,
    factory: fn() -> Arc<dyn PaintStrategy>,
}

impl StrategyProvider for BuiltinProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn title(&self) -> &str {
        self.title
    }

    fn create(&self) -> Arc<dyn PaintStrategy> {
        (self.factory)()
    }
}

/// Errors that can occur during strategy registration.
#[derive(Debug, thiserror::Error)]
pub enum StrategyRegistryError {
    /// A provider with the same name has already been registered.
    #[error("duplicate paint strategy name: {0}")]
    DuplicateName(String),
}

/// Maps strategy names to providers.
///
/// The four built-in strategies are pre-registered: `default` (commit all),
/// `raster` (checkerboard), `grid_2` and `grid_5` (grid lines).
pub struct StrategyRegistry {
    providers: Vec<Box<dyn StrategyProvider>>,
    name_to_index: HashMap<String, usize>,
}

impl StrategyRegistry {
    /// Creates a registry with the built-in strategies pre-registered.
    pub fn new() -> Self {
        let mut registry = Self {
            providers: Vec::new(),
            name_to_index: HashMap::new(),
        };
        for builtin in BUILTINS {
            registry
                .register(Box::new(builtin))
                .expect("builtin strategy names are unique");
        }
        registry
    }

    /// Registers a provider.
    ///
    /// # Errors
    ///
    /// Returns [`StrategyRegistryError::DuplicateName`] if a provider with
    /// the same name exists.
    pub fn register(
        &mut self,
        provider: Box<dyn StrategyProvider>,
    ) -> Result<(), StrategyRegistryError> {
        let name = provider.name().to_string();
        if self.name_to_index.contains_key(&name) {
            return Err(StrategyRegistryError::DuplicateName(name));
        }
        self.name_to_index.insert(name, self.providers.len());
        self.providers.push(provider);
        Ok(())
    }

    /// Instantiates the named strategy, or `None` if unregistered.
    pub fn create(&self, name: &str) -> Option<Arc<dyn PaintStrategy>> {
        self.provider(name).map(StrategyProvider::create)
    }

    /// Returns the named provider, or `None` if unregistered.
    pub fn provider(&self, name: &str) -> Option<&dyn StrategyProvider> {
        self.name_to_index
            .get(name)
            .map(|&index| self.providers[index].as_ref())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|provider| provider.name())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

const BUILTINS: [BuiltinProvider; 4] = [
    BuiltinProvider {
        name: "default",
        title: "Paint all",
        factory: || Arc::new(CommitAll),
    },
    BuiltinProvider {
        name: "raster",
        title: "Checkerboard",
        factory: || Arc::new(Raster),
    },
    BuiltinProvider {
        name: "grid_2",
        title: "Grid lines (2)",
        factory: || Arc::new(GridLines { modulus: 2 }),
    },
    BuiltinProvider {
        name: "grid_5",
        title: "Grid lines (5)",
        factory: || Arc::new(GridLines { modulus: 5 }),
    },
];

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_commits_everything() {
        let strategy = StrategyRegistry::new().create("default").unwrap();
        assert!(strategy.should_commit(0, 0, 0));
        assert!(strategy.should_commit(-3, 7, 11));
    }

    #[test]
    fn test_raster_commits_even_parity_only() {
        let strategy = StrategyRegistry::new().create("raster").unwrap();
        assert!(strategy.should_commit(0, 0, 0));
        assert!(strategy.should_commit(1, 1, 0));
        assert!(!strategy.should_commit(1, 0, 0));
        assert!(!strategy.should_commit(1, 1, 1));
        // Parity is sign-agnostic.
        assert!(strategy.should_commit(-1, 1, 0));
        assert!(!strategy.should_commit(-1, 0, 0));
    }

    #[test]
    fn test_grid_strategies_hit_grid_lines() {
        let registry = StrategyRegistry::new();
        let grid_2 = registry.create("grid_2").unwrap();
        assert!(grid_2.should_commit(1, 2, 3));
        assert!(!grid_2.should_commit(1, 3, 5));
        assert!(grid_2.should_commit(-4, 1, 1));

        let grid_5 = registry.create("grid_5").unwrap();
        assert!(grid_5.should_commit(5, 1, 1));
        assert!(grid_5.should_commit(1, 0, 1));
        assert!(!grid_5.should_commit(1, 2, 3));
    }

    #[test]
    fn test_builtins_are_registered() {
        let registry = StrategyRegistry::new();
        assert_eq!(registry.len(), 4);
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, ["default", "raster", "grid_2", "grid_5"]);
        assert_eq!(registry.provider("raster").unwrap().title(), "Checkerboard");
    }

    #[test]
    fn test_unknown_strategy_is_none() {
        assert!(StrategyRegistry::new().create("nope").is_none());
    }

    struct EveryThird;

    impl StrategyProvider for EveryThird {
        fn name(&self) -> &str {
            "every_third"
        }

        fn title(&self) -> &str {
            "Every third column"
        }

        fn create(&self) -> Arc<dyn PaintStrategy> {
            Arc::new(GridLines { modulus: 3 })
        }
    }

    #[test]
    fn test_custom_provider_registration() {
        let mut registry = StrategyRegistry::new();
        registry.register(Box::new(EveryThird)).unwrap();
        assert!(registry.create("every_third").is_some());

        let result = registry.register(Box::new(EveryThird));
        assert!(matches!(
            result,
            Err(StrategyRegistryError::DuplicateName(name)) if name == "every_third"
        ));
    }
}
