use std::collections::BTreeSet;

use crate::artifact::ManagementKey;
use crate::dependency::Dependency;

use super::DeriveContext;

/// Rejects any dependency whose `(groupId, artifactId)` is in the
/// accumulated exclusion set collected from every ancestor's declared
/// exclusions on the path from the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExclusionDependencySelector {
    exclusions: BTreeSet<ManagementKey>,
}

impl ExclusionDependencySelector {
    pub fn new(exclusions: BTreeSet<ManagementKey>) -> Self {
        Self { exclusions }
    }

    pub fn select(&self, dep: &Dependency) -> bool {
        !self
            .exclusions
            .contains(&dep.artifact.coordinate.management_key())
    }

    /// The exclusion set widens going down the tree: a child's selector also
    /// carries every exclusion the node being descended from declared.
    pub fn derive_child(&self, context: &DeriveContext<'_>) -> Self {
        let mut exclusions = self.exclusions.clone();
        if let Some(dep) = context.node_dependency {
            exclusions.extend(dep.exclusions.iter().cloned());
        }
        Self { exclusions }
    }
}
