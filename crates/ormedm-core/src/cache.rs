//! Cache of finished schemas keyed by persistence unit.

use crate::config::BuildConfig;
use crate::edm::EdmSchema;
use crate::error::Result;
use crate::metamodel::SchemaIntrospector;
use crate::resolver::build_schema;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Build-once, share-read-only schema cache.
///
/// Builds run outside the lock. When two callers build the same unit
/// concurrently, the first finished schema is kept and returned to both.
#[derive(Default)]
pub struct SchemaCache {
    schemas: RwLock<HashMap<String, Arc<EdmSchema>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SchemaCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached schema.
    pub fn get(&self, persistence_unit: &str) -> Option<Arc<EdmSchema>> {
        let schema = self.schemas.read().get(persistence_unit).cloned();
        match schema {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        schema
    }

    /// Get the cached schema for the introspector's unit, building it on a miss.
    pub fn get_or_build(
        &self,
        introspector: &dyn SchemaIntrospector,
        config: &BuildConfig,
    ) -> Result<Arc<EdmSchema>> {
        let unit = introspector.persistence_unit();
        if let Some(schema) = self.get(unit) {
            return Ok(schema);
        }

        let built = Arc::new(build_schema(introspector, config)?);
        let mut schemas = self.schemas.write();
        let schema = schemas.entry(unit.to_string()).or_insert(built);
        debug!(persistence_unit = unit, "Schema cached");
        Ok(Arc::clone(schema))
    }

    /// Drop the cached schema of a unit.
    ///
    /// Returns true if one was cached.
    pub fn invalidate(&self, persistence_unit: &str) -> bool {
        self.schemas.write().remove(persistence_unit).is_some()
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    /// Check if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Cache hits so far.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Cache misses so far.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Serialize a cached schema.
    pub fn snapshot(&self, persistence_unit: &str) -> Result<Option<Vec<u8>>> {
        let schema = self.schemas.read().get(persistence_unit).cloned();
        schema.map(|s| s.to_bytes()).transpose()
    }

    /// Load a serialized schema into the cache, replacing any cached one.
    pub fn restore(&self, persistence_unit: &str, bytes: &[u8]) -> Result<Arc<EdmSchema>> {
        let schema = Arc::new(EdmSchema::from_bytes(bytes)?);
        self.schemas
            .write()
            .insert(persistence_unit.to_string(), Arc::clone(&schema));
        Ok(schema)
    }
}
