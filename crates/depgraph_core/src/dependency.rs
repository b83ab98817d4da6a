use std::collections::BTreeSet;

use crate::artifact::{Artifact, ManagementKey};
use crate::scope::Scope;

/// A declared dependency edge: an artifact plus the scope, optionality and
/// exclusions it was declared with.
///
/// `Dependency` is the mutable per-graph-node counterpart to [`Artifact`]:
/// two nodes can point at artifacts with the same coordinate and version but
/// carry different scopes if they were declared differently by different
/// parents, which is exactly the situation the conflict resolver's scope
/// derivation exists to reconcile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub artifact: Artifact,
    pub scope: Scope,
    pub optional: Option<bool>,
    pub exclusions: BTreeSet<ManagementKey>,
}

impl Dependency {
    pub fn new(artifact: Artifact, scope: Scope) -> Self {
        Self {
            artifact,
            scope,
            optional: None,
            exclusions: BTreeSet::new(),
        }
    }

    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    pub fn excluding(mut self, key: ManagementKey) -> Self {
        self.exclusions.insert(key);
        self
    }
}
