//! Selectors decide, during collection, whether a declared dependency edge
//! should be kept at all. They are pure value objects: `select` never
//! mutates, and `derive_child` returns a fresh selector for one level deeper
//! instead of mutating the receiver, so the same selector instance can be
//! shared and derived from concurrently by an external collector.
//!
//! The set of selector shapes is small and closed, so it is modeled as one
//! tagged enum ([`DependencySelector`]) rather than trait objects — equality
//! and hashing fall out of `#[derive]` on each leaf selector, which is what
//! keeps differently-derived instances distinct members of a membership set
//! (equality/hash include the current depth and starting configuration).

mod exclusion_selector;
mod optional_selector;
mod pattern_selector;
mod scope_selector;

pub use exclusion_selector::ExclusionDependencySelector;
pub use optional_selector::OptionalDependencySelector;
pub use pattern_selector::PatternDependencySelector;
pub use scope_selector::{ScopeDependencySelector, APPLY_TO_INFINITE};

use crate::dependency::Dependency;

/// The node being descended from, handed to `derive_child` so a selector can
/// react to its scope/exclusions/optionality when computing the child
/// selector (e.g. [`ScopeDependencySelector`]'s `legacy` quirk keys off
/// whether this is the synthetic root).
#[derive(Debug, Clone, Copy)]
pub struct DeriveContext<'a> {
    pub node_dependency: Option<&'a Dependency>,
}

impl<'a> DeriveContext<'a> {
    pub fn new(node_dependency: Option<&'a Dependency>) -> Self {
        Self { node_dependency }
    }
}

/// A composable predicate over dependency edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DependencySelector {
    Scope(ScopeDependencySelector),
    Optional(OptionalDependencySelector),
    Exclusion(ExclusionDependencySelector),
    Pattern(PatternDependencySelector),
    And(Vec<DependencySelector>),
    Or(Vec<DependencySelector>),
    Not(Box<DependencySelector>),
}

impl DependencySelector {
    pub fn select(&self, dep: &Dependency) -> bool {
        match self {
            DependencySelector::Scope(s) => s.select(dep),
            DependencySelector::Optional(s) => s.select(dep),
            DependencySelector::Exclusion(s) => s.select(dep),
            DependencySelector::Pattern(s) => s.select(dep),
            // Zero-member `And` accepts everything; vacuous truth.
            DependencySelector::And(selectors) => selectors.iter().all(|s| s.select(dep)),
            // Zero-member `Or` rejects everything.
            DependencySelector::Or(selectors) => selectors.iter().any(|s| s.select(dep)),
            DependencySelector::Not(inner) => !inner.select(dep),
        }
    }

    pub fn derive_child(&self, context: &DeriveContext<'_>) -> Self {
        match self {
            DependencySelector::Scope(s) => DependencySelector::Scope(s.derive_child(context)),
            DependencySelector::Optional(s) => {
                DependencySelector::Optional(s.derive_child(context))
            }
            DependencySelector::Exclusion(s) => {
                DependencySelector::Exclusion(s.derive_child(context))
            }
            DependencySelector::Pattern(s) => DependencySelector::Pattern(s.derive_child(context)),
            DependencySelector::And(selectors) => DependencySelector::And(
                selectors.iter().map(|s| s.derive_child(context)).collect(),
            ),
            DependencySelector::Or(selectors) => DependencySelector::Or(
                selectors.iter().map(|s| s.derive_child(context)).collect(),
            ),
            DependencySelector::Not(inner) => {
                DependencySelector::Not(Box::new(inner.derive_child(context)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use depgraph_version::Version;

    use crate::artifact::{Artifact, ArtifactCoordinate};
    use crate::scope::Scope;

    use super::*;

    fn dep(scope: &str, optional: bool) -> Dependency {
        Dependency {
            artifact: Artifact::new(
                ArtifactCoordinate::simple("org.example", "widget"),
                Version::parse("1.0").unwrap(),
            ),
            scope: Scope::new(scope),
            optional: Some(optional),
            exclusions: BTreeSet::new(),
        }
    }

    #[test]
    fn scope_selector_accepts_direct_and_rejects_transitive_test() {
        let included = BTreeSet::from([Scope::compile()]);
        let selector = ScopeDependencySelector::new(0, APPLY_TO_INFINITE, Some(included), None, false);
        assert!(selector.select(&dep("compile", false)));
        assert!(!selector.select(&dep("test", false)));

        let root_ctx = DeriveContext::new(None);
        let child = selector.derive_child(&root_ctx);
        assert!(!child.select(&dep("test", false)));
    }

    #[test]
    fn legacy_shift_only_applies_once_at_null_root() {
        let legacy = ScopeDependencySelector::legacy();
        assert_eq!(legacy.depth(), 0);
        let root_ctx = DeriveContext::new(None);
        let direct = legacy.derive_child(&root_ctx);
        // applyFrom shifted from 1 to 2, so a depth-1 edge is now exempt.
        assert!(direct.select(&dep("test", false)));
    }

    #[test]
    fn optional_selector_rejects_transitive_but_not_direct() {
        let selector = OptionalDependencySelector::from_direct();
        assert!(selector.select(&dep("compile", true)));
        let ctx = DeriveContext::new(None);
        let child = selector.derive_child(&ctx);
        assert!(!child.select(&dep("compile", true)));
    }

    #[test]
    fn and_of_zero_accepts_everything() {
        let selector = DependencySelector::And(Vec::new());
        assert!(selector.select(&dep("test", true)));
    }

    #[test]
    fn or_of_zero_rejects_everything() {
        let selector = DependencySelector::Or(Vec::new());
        assert!(!selector.select(&dep("compile", false)));
    }
}
