//! Scope derivation (§4.R.3) and scope-conflict selection (§4.R.4).
//!
//! These are two distinct operations that both happen to be about scopes:
//! derivation is a deterministic per-path fold with no notion of a "winner"
//! (every node in the tree gets a derived scope, conflict or not); selection
//! only runs once a conflict group has more than one derived scope and picks
//! which one the surviving node keeps.

use std::collections::HashMap;

use crate::graph::NodeId;
use crate::scope::Scope;

/// Folds a parent's derived scope with a child's own declared scope,
/// following the fixed combination table.
///
/// This table never excludes a child outright — it only decides which of
/// the parent's or the child's own scope name "wins" for the combination.
/// Pruning non-transitive (`provided`/`test`) or optional dependencies once
/// past the direct layer is a separate, filter-level concern (see
/// [`crate::filters::ScopeDependencySelector`]/[`crate::filters::OptionalDependencySelector`]),
/// applied during collection rather than here.
///
/// `parent_scope` is `None` for a direct (depth `0`) dependency: the child's
/// own declared scope is used as-is. `system` always passes straight through
/// the table unchanged, since it is tied to a `localPath` on the declaration
/// itself rather than something inherited combination should rewrite.
pub fn derive_scope(parent_scope: Option<&Scope>, child_scope: &Scope, _system: &Scope) -> Scope {
    let Some(parent_scope) = parent_scope else {
        return child_scope.clone();
    };

    let parent = parent_scope.as_str();
    let child = child_scope.as_str();

    let result = match (parent, child) {
        ("compile", _) => child,
        ("runtime", "compile") => "runtime",
        ("runtime", _) => child,
        ("provided", "compile") | ("provided", "runtime") => "provided",
        ("provided", _) => child,
        ("test", "compile") | ("test", "runtime") | ("test", "provided") => "test",
        ("test", _) => child,
        // Any parent scope name the built-in table doesn't recognize (a
        // caller's custom scope) leaves the child's own scope untouched.
        _ => child,
    };

    Scope::new(result)
}

/// Priority ordering used to break a tie when a conflict group's surviving
/// node has contributed edges with more than one derived scope: the derived
/// scope that appears highest in `order` wins, `directly_declared` (an
/// edge straight off the root) dominates any priority-table result.
#[derive(Debug, Clone)]
pub struct ScopeSelector {
    priority: HashMap<String, u32>,
}

impl ScopeSelector {
    /// Maven's conventional application-facing priority: `compile` ranks
    /// above everything that could plausibly conflict with it.
    pub fn application() -> Self {
        Self::from_order(&["compile", "provided", "runtime", "test", "system"])
    }

    /// A test-execution-facing priority, where `test` outranks `compile`.
    pub fn test() -> Self {
        Self::from_order(&["test", "compile", "provided", "runtime", "system"])
    }

    fn from_order(order: &[&str]) -> Self {
        let priority = order
            .iter()
            .enumerate()
            .map(|(rank, name)| (name.to_string(), rank as u32))
            .collect();
        Self { priority }
    }

    fn rank(&self, scope: &Scope) -> u32 {
        self.priority
            .get(scope.as_str())
            .copied()
            .unwrap_or(u32::MAX)
    }

    /// Picks a winning scope among a conflict group's candidate `(node,
    /// scope, is_direct)` triples. A direct edge (straight off the root)
    /// always dominates; among non-direct candidates, lower `rank` wins;
    /// ties keep whichever candidate came first.
    pub fn select<'a>(
        &self,
        candidates: impl IntoIterator<Item = (NodeId, &'a Scope, bool)>,
    ) -> Option<Scope> {
        let mut best: Option<(u32, bool, Scope)> = None;
        for (_, scope, is_direct) in candidates {
            let rank = self.rank(scope);
            let better = match &best {
                None => true,
                Some((best_rank, best_direct, _)) => {
                    if is_direct != *best_direct {
                        is_direct
                    } else {
                        rank < *best_rank
                    }
                }
            };
            if better {
                best = Some((rank, is_direct, scope.clone()));
            }
        }
        best.map(|(_, _, scope)| scope)
    }
}

/// Whether `dependency` was reached by an edge straight from the graph root.
///
/// The root itself is depth `0` ([`crate::transform::conflict_marker::mark`]);
/// its direct children — the condition [`ScopeSelector::select`] treats as
/// dominant — sit at depth `1`.
pub fn is_direct(dependency_depth: u32) -> bool {
    dependency_depth == 1
}
