//! `DependencyManager` implements dependency management: the Maven notion of
//! a `<dependencyManagement>` block whose `version`/`scope`/`optional`/
//! `exclusions` entries override what a transitive dependency declares,
//! keyed by `(groupId, artifactId)` and collected top-down as the graph is
//! built.
//!
//! Every one of the five tracked maps is **first-wins**: the entry nearest
//! the root (shallowest depth) sticks, and a deeper declaration for the same
//! key is ignored once one has been recorded. `scope` and `optional`
//! overrides are the two exceptions that only ever get merged once, at
//! depth `0` (derivation from the request root) — a transitive node's own
//! `<dependencyManagement>` never contributes a scope or optional override,
//! only a version/exclusions/localPath one.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use depgraph_version::VersionConstraint;

use crate::artifact::ManagementKey;
use crate::scope::Scope;

/// One management entry as declared by a node in the graph (typically the
/// contents of a `<dependencyManagement>`/`<dependencies>` block), prior to
/// being folded into the accumulated maps.
#[derive(Debug, Clone, Default)]
pub struct ManagementDeclaration {
    pub key: ManagementKey,
    pub version: Option<VersionConstraint>,
    pub scope: Option<Scope>,
    pub optional: Option<bool>,
    pub local_path: Option<Arc<str>>,
    pub exclusions: Option<BTreeSet<ManagementKey>>,
}

impl ManagementDeclaration {
    pub fn new(key: ManagementKey) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }
}

/// What a single key currently resolves to across the five tracked maps.
#[derive(Debug, Clone, Default)]
pub struct ManagedValues {
    pub version: Option<VersionConstraint>,
    pub scope: Option<Scope>,
    pub optional: Option<bool>,
    pub local_path: Option<Arc<str>>,
    pub exclusions: Option<BTreeSet<ManagementKey>>,
}

/// Accumulates dependency-management overrides top-down and answers what, if
/// anything, should override a given `(groupId, artifactId)` dependency edge.
///
/// `derive_until` bounds how many levels of `<dependencyManagement>` inherit
/// downward before management stops accumulating new entries; beyond it,
/// `apply` still consults whatever was already collected, it just stops
/// recording new declarations. `apply_from` is the separate gate on the other
/// end: [`Self::lookup`] returns nothing at all for a node shallower than
/// `apply_from`, even if management entries were already accumulated by then
/// (so a manager can be configured to accumulate from the root while only
/// taking effect once collection has descended a certain number of levels).
#[derive(Debug, Clone)]
pub struct DependencyManager {
    derive_until: u32,
    apply_from: u32,
    depth: u32,
    versions: HashMap<ManagementKey, VersionConstraint>,
    scopes: HashMap<ManagementKey, Scope>,
    optionals: HashMap<ManagementKey, bool>,
    local_paths: HashMap<ManagementKey, Arc<str>>,
    exclusions: HashMap<ManagementKey, BTreeSet<ManagementKey>>,
}

impl DependencyManager {
    /// Builds a manager that accumulates `<dependencyManagement>` entries
    /// through depth `derive_until` (exclusive) and only emits overrides
    /// from `manage`/`lookup` once `depth >= apply_from`.
    pub fn new(derive_until: u32, apply_from: u32) -> Self {
        Self {
            derive_until,
            apply_from,
            depth: 0,
            versions: HashMap::new(),
            scopes: HashMap::new(),
            optionals: HashMap::new(),
            local_paths: HashMap::new(),
            exclusions: HashMap::new(),
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Folds one node's declared management entries into the accumulated
    /// maps, first-wins per map, respecting the root-only rule for
    /// `scope`/`optional`.
    ///
    /// `system`'s `localPath` is special: Maven ties `system` scope to a
    /// `localPath`, so setting a non-`system` scope override at the root
    /// removes any previously recorded `localPath` for the same key, and a
    /// `system` scope override without an accompanying `localPath` leaves
    /// a prior `localPath` entry alone (it still has to come from somewhere).
    pub fn manage(&mut self, declaration: &ManagementDeclaration, system_scope: &Scope) {
        if self.depth >= self.derive_until {
            return;
        }
        let key = &declaration.key;

        if let Some(version) = &declaration.version {
            self.versions
                .entry(key.clone())
                .or_insert_with(|| version.clone());
        }

        if self.depth == 0 {
            if let Some(scope) = &declaration.scope {
                if self.scopes.insert(key.clone(), scope.clone()).is_none() && scope != system_scope
                {
                    self.local_paths.remove(key);
                }
            }
            if let Some(optional) = declaration.optional {
                self.optionals.entry(key.clone()).or_insert(optional);
            }
        }

        if let Some(local_path) = &declaration.local_path {
            self.local_paths
                .entry(key.clone())
                .or_insert_with(|| local_path.clone());
        }

        if let Some(exclusions) = &declaration.exclusions {
            self.exclusions
                .entry(key.clone())
                .or_insert_with(|| exclusions.clone());
        }
    }

    /// What is currently managed for `key`, if anything. Returns an empty
    /// (all-`None`) [`ManagedValues`] for any node shallower than
    /// `apply_from`, per §4.M ("if `depth >= applyFrom`, look up each key and
    /// emit overrides") — regardless of what has already been accumulated.
    pub fn lookup(&self, key: &ManagementKey) -> ManagedValues {
        if self.depth < self.apply_from {
            return ManagedValues::default();
        }
        ManagedValues {
            version: self.versions.get(key).cloned(),
            scope: self.scopes.get(key).cloned(),
            optional: self.optionals.get(key).copied(),
            local_path: self.local_paths.get(key).cloned(),
            exclusions: self.exclusions.get(key).cloned(),
        }
    }

    /// A manager scoped one level deeper, sharing every entry already
    /// accumulated but no longer eligible to merge root-only overrides.
    pub fn derive_child(&self) -> Self {
        let mut next = self.clone();
        next.depth += 1;
        next
    }
}
