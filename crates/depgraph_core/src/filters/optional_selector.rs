use crate::dependency::Dependency;

use super::DeriveContext;

/// Rejects optional dependency edges once recursion has gone deeper than
/// `apply_from`. A direct (depth `0`) optional dependency is always kept;
/// only *transitively* optional edges get pruned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionalDependencySelector {
    apply_from: u32,
    depth: u32,
}

impl OptionalDependencySelector {
    pub fn new(apply_from: u32) -> Self {
        Self {
            apply_from,
            depth: 0,
        }
    }

    /// Filters optional edges once past the direct-dependency layer.
    pub fn from_direct() -> Self {
        Self::new(1)
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn select(&self, dep: &Dependency) -> bool {
        self.depth < self.apply_from || !dep.is_optional()
    }

    pub fn derive_child(&self, _context: &DeriveContext<'_>) -> Self {
        Self {
            apply_from: self.apply_from,
            depth: self.depth + 1,
        }
    }
}
