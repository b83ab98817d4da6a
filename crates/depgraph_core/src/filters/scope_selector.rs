use std::collections::BTreeSet;

use crate::dependency::Dependency;
use crate::scope::Scope;

use super::DeriveContext;

/// Accepts or rejects a dependency edge by its declared scope, active only
/// for a configurable window of recursion depths.
///
/// At a depth outside `[apply_from, apply_to]` the selector is a no-op (always
/// accepts) — it only filters within its configured window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeDependencySelector {
    apply_from: u32,
    apply_to: u32,
    included: Option<BTreeSet<Scope>>,
    excluded: Option<BTreeSet<Scope>>,
    shift_if_root_null: bool,
    depth: u32,
}

/// Stands in for an open-ended upper bound on `apply_to`.
pub const APPLY_TO_INFINITE: u32 = u32::MAX;

impl ScopeDependencySelector {
    pub fn new(
        apply_from: u32,
        apply_to: u32,
        included: Option<BTreeSet<Scope>>,
        excluded: Option<BTreeSet<Scope>>,
        shift_if_root_null: bool,
    ) -> Self {
        Self {
            apply_from,
            apply_to,
            included,
            excluded,
            shift_if_root_null,
            depth: 0,
        }
    }

    /// The historical default configuration: apply from depth 1 onward
    /// (never to a direct dependency), shifting to depth 2 if the root has no
    /// dependency of its own.
    pub fn legacy() -> Self {
        Self::new(1, APPLY_TO_INFINITE, None, None, true)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn select(&self, dep: &Dependency) -> bool {
        if self.depth < self.apply_from || self.depth > self.apply_to {
            return true;
        }
        let included_ok = self
            .included
            .as_ref()
            .map_or(true, |s| s.contains(&dep.scope));
        let excluded_ok = self
            .excluded
            .as_ref()
            .map_or(true, |s| !s.contains(&dep.scope));
        included_ok && excluded_ok
    }

    pub fn derive_child(&self, context: &DeriveContext<'_>) -> Self {
        let mut next = self.clone();
        next.depth += 1;
        if self.depth == 0 && self.shift_if_root_null && context.node_dependency.is_none() {
            next.apply_from = next.apply_from.saturating_add(1);
        }
        next
    }
}
