use std::collections::HashMap;

use crate::api::error::Result;
use crate::assets::catalog::{SystemCatalog, BUILTIN_CATALOG_JSON};
use crate::core::scene::StarSystem;

/// Immutable registry of planetary systems, keyed by name.
///
/// Built once from a [`SystemCatalog`] and passed explicitly to whatever
/// needs scene data.
#[derive(Debug, Clone)]
pub struct SystemRegistry {
    systems: Vec<StarSystem>,
    by_name: HashMap<String, usize>,
    default: usize,
}

impl SystemRegistry {
    /// Build a registry from a validated catalog.
    pub fn from_catalog(catalog: SystemCatalog) -> Self {
        let by_name: HashMap<String, usize> = catalog
            .systems
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.clone(), i))
            .collect();
        let default = catalog
            .default
            .as_ref()
            .and_then(|name| by_name.get(name).copied())
            .unwrap_or(0);
        Self {
            systems: catalog.systems,
            by_name,
            default,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_catalog(SystemCatalog::from_json(json)?))
    }

    /// Registry of the systems embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG_JSON)
    }

    /// Look up a system by name. Returns None if not found.
    pub fn get(&self, name: &str) -> Option<&StarSystem> {
        self.by_name.get(name).map(|&i| &self.systems[i])
    }

    pub fn default_system(&self) -> &StarSystem {
        &self.systems[self.default]
    }

    /// System names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}
