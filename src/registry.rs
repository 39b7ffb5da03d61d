//! The algorithm catalog.

use alloc::vec::Vec;

use hashbrown::HashMap;
use tracing::debug;

use crate::algorithm::{Algorithm, Category};
use crate::error::RegistryError;
use crate::formulas;

/// An ordered catalog of [`Algorithm`]s keyed by name.
///
/// A registry is never empty, which is what lets [`find`](Self::find) fall
/// back to the first entry instead of failing. Insertion order is the public
/// order of every listing.
///
/// ```
/// use bytebeat_engine::Registry;
///
/// let registry = Registry::builtin();
/// let viznut = registry.find("Viznut Original");
/// assert_eq!(viznut.name(), "Viznut Original");
///
/// // Unknown names resolve to the first entry.
/// assert_eq!(registry.find("nope").name(), registry.list_all()[0].name());
/// ```
#[derive(Clone, Debug)]
pub struct Registry {
    algorithms: Vec<Algorithm>,
    by_name: HashMap<&'static str, usize>,
}

impl Registry {
    /// The built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self {
            algorithms: Vec::with_capacity(16),
            by_name: HashMap::with_capacity(16),
        };
        for algorithm in formulas::builtin() {
            let registered = registry.register(algorithm);
            debug_assert!(registered.is_ok(), "built-in catalog: {:?}", registered);
        }
        registry
    }

    /// Build a registry from a custom list.
    ///
    /// Fails on an empty list or on a duplicate name.
    pub fn from_algorithms<I>(algorithms: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = Algorithm>,
    {
        let mut registry = Self {
            algorithms: Vec::new(),
            by_name: HashMap::new(),
        };
        for algorithm in algorithms {
            registry.register(algorithm)?;
        }
        if registry.algorithms.is_empty() {
            return Err(RegistryError::Empty);
        }
        Ok(registry)
    }

    /// Append an algorithm. Names are unique.
    pub fn register(&mut self, algorithm: Algorithm) -> Result<(), RegistryError> {
        if self.by_name.contains_key(algorithm.name()) {
            return Err(RegistryError::DuplicateName(algorithm.name()));
        }
        self.by_name.insert(algorithm.name(), self.algorithms.len());
        self.algorithms.push(algorithm);
        Ok(())
    }

    /// Look up by name, falling back to the first entry.
    pub fn find(&self, name: &str) -> &Algorithm {
        &self.algorithms[self.resolve(name)]
    }

    /// Index of `name`, if registered.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Index of `name`, or `0` when it is not registered.
    pub fn resolve(&self, name: &str) -> usize {
        match self.position(name) {
            Some(index) => index,
            None => {
                debug!(name, fallback = self.algorithms[0].name(), "unknown algorithm");
                0
            }
        }
    }

    pub fn get(&self, index: usize) -> Option<&Algorithm> {
        self.algorithms.get(index)
    }

    /// Entry at `index`, or the first entry when out of range.
    ///
    /// Used on the audio thread, so it never logs.
    #[inline]
    pub fn get_or_first(&self, index: usize) -> &Algorithm {
        self.algorithms.get(index).unwrap_or(&self.algorithms[0])
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    /// Always `false`; kept for API symmetry with [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    pub fn list_all(&self) -> &[Algorithm] {
        &self.algorithms
    }

    pub fn list_experimental(&self) -> impl Iterator<Item = &Algorithm> + '_ {
        self.algorithms.iter().filter(|a| a.is_experimental())
    }

    pub fn list_standard(&self) -> impl Iterator<Item = &Algorithm> + '_ {
        self.algorithms.iter().filter(|a| !a.is_experimental())
    }

    pub fn list_category(&self, category: Category) -> impl Iterator<Item = &Algorithm> + '_ {
        self.algorithms.iter().filter(move |a| a.category() == category)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}
