//! Registry of assertion definitions.
//!
//! Two disjoint ordered lists: definitions that can be checked without
//! suspending, and definitions that need `expect_async`. Registries are
//! immutable once built; `extend` returns a new registry.

use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashSet;

use crate::builtins;
use crate::{Definition, DefinitionError};

#[derive(Clone, Default)]
pub struct Registry {
    sync: Vec<Arc<Definition>>,
    async_: Vec<Arc<Definition>>,
}

impl Registry {
    /// A registry of exactly these definitions, in order.
    pub fn new(definitions: impl IntoIterator<Item = Definition>) -> Self {
        Registry::empty().extend(definitions)
    }

    pub fn empty() -> Self {
        Registry::default()
    }

    /// The built-in vocabulary.
    ///
    /// # Errors
    ///
    /// Only if a built-in definition is malformed.
    pub fn builtin() -> Result<Self, DefinitionError> {
        Ok(Registry::new(builtins::definitions()?))
    }

    /// A new registry with `definitions` appended after the existing ones.
    #[must_use]
    pub fn extend(&self, definitions: impl IntoIterator<Item = Definition>) -> Registry {
        let mut registry = self.clone();
        for definition in definitions {
            let definition = Arc::new(definition);
            if definition.is_async() {
                registry.async_.push(definition);
            } else {
                registry.sync.push(definition);
            }
        }
        registry
    }

    /// Definitions checked by `expect`.
    pub fn sync_definitions(&self) -> &[Arc<Definition>] {
        &self.sync
    }

    /// Definitions checked by `expect_async`.
    pub fn async_definitions(&self) -> &[Arc<Definition>] {
        &self.async_
    }

    /// Every definition, sync first.
    pub fn definitions(&self) -> impl Iterator<Item = &Arc<Definition>> {
        self.sync.iter().chain(self.async_.iter())
    }

    /// The distinct phrases of every definition, in registry order.
    pub fn phrases(&self) -> Vec<&str> {
        let mut seen = FxHashSet::default();
        self.definitions()
            .flat_map(|d| d.phrases())
            .filter(|phrase| seen.insert(*phrase))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sync.len() + self.async_.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("sync", &self.sync.len())
            .field("async", &self.async_.len())
            .finish()
    }
}

/// `registry.extend(definitions)`.
pub fn extend(registry: &Registry, definitions: impl IntoIterator<Item = Definition>) -> Registry {
    registry.extend(definitions)
}

/// The process-wide built-in registry, built on first use.
pub fn default_registry() -> &'static Registry {
    static DEFAULT: OnceLock<Registry> = OnceLock::new();
    DEFAULT.get_or_init(|| match Registry::builtin() {
        Ok(registry) => registry,
        Err(e) => unreachable!("built-in assertion vocabulary is malformed: {e}"),
    })
}
