//! Mutable state of one schema build.

use super::association_end::AssociationEndView;
use super::referential_constraint::PendingConstraint;
use crate::config::BuildConfig;
use crate::edm::{Association, ComplexType, EntityType};
use crate::metamodel::SchemaIntrospector;
use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

/// Arena owned by an in-progress build.
///
/// All maps are insertion-ordered or only used for lookups so that a rebuild
/// from the same metamodel produces the same names in the same order.
pub(crate) struct BuildContext<'a> {
    pub(crate) introspector: &'a dyn SchemaIntrospector,
    pub(crate) config: &'a BuildConfig,
    pub(crate) namespace: String,
    /// Built entity types by EDM name.
    pub(crate) entity_types: IndexMap<String, EntityType>,
    /// Built complex types by originating java type.
    pub(crate) complex_types: IndexMap<String, ComplexType>,
    /// Embeddables currently being expanded (recursion guard).
    pub(crate) complex_in_progress: HashSet<String>,
    /// Live associations by name.
    pub(crate) associations: IndexMap<String, Association>,
    /// End view that created each association, used when merging the opposite side.
    pub(crate) association_views: HashMap<String, AssociationEndView>,
    /// Associations that passed constraint resolution, plus the unioned remainder.
    pub(crate) consistent: Vec<Association>,
    /// Referential constraints awaiting resolution.
    pub(crate) pending: Vec<PendingConstraint>,
    /// Navigation sequence per (source, target) entity type pair.
    pub(crate) navigation_sequence: HashMap<(String, String), usize>,
}

impl<'a> BuildContext<'a> {
    pub(crate) fn new(introspector: &'a dyn SchemaIntrospector, config: &'a BuildConfig) -> Self {
        Self {
            introspector,
            config,
            namespace: config.namespace_for(introspector.persistence_unit()),
            entity_types: IndexMap::new(),
            complex_types: IndexMap::new(),
            complex_in_progress: HashSet::new(),
            associations: IndexMap::new(),
            association_views: HashMap::new(),
            consistent: Vec::new(),
            pending: Vec::new(),
            navigation_sequence: HashMap::new(),
        }
    }

    /// Advance and return the navigation sequence for a type pair (1-based).
    pub(crate) fn next_navigation_sequence(&mut self, source: &str, target: &str) -> usize {
        let counter = self
            .navigation_sequence
            .entry((source.to_string(), target.to_string()))
            .or_insert(0);
        *counter += 1;
        *counter
    }

    /// Whether an association name is already taken.
    pub(crate) fn association_name_taken(&self, name: &str) -> bool {
        self.associations.contains_key(name) || self.consistent.iter().any(|a| a.name == name)
    }
}
