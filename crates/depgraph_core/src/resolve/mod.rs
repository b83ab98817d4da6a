//! The conflict-resolution pipeline: runs the marking/pruning
//! transform, orders the resulting conflict groups, then resolves each group
//! in turn — picking a winning version, scope and optionality, and pruning
//! or annotating the losers according to the configured verbosity.

pub mod optionality;
pub mod scope;
pub mod version_selector;

use std::collections::VecDeque;

use ahash::{HashMap, HashSet};
use depgraph_version::VersionConstraint;
use tracing::debug;

use crate::artifact::ConflictId;
use crate::error::ResolveError;
use crate::graph::{DependencyGraph, ManagedBits, NodeId};
use crate::scope::Scope;
use crate::transform;

pub use optionality::{derive_optional, select_optional};
pub use scope::{derive_scope, is_direct, ScopeSelector};
pub use version_selector::{select_version, VersionCandidate, VersionSelectionStrategy};

/// How much of the losing side of each resolved conflict to retain in the
/// graph for inspection, mirroring the contract's three verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Losers are pruned from the graph entirely.
    None,
    /// At most one annotated loser is kept per `(parent, conflict group)`.
    Standard,
    /// Every loser is kept and annotated.
    Full,
}

/// Tunable policy for a single [`ConflictResolver::resolve`] run.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub version_strategy: VersionSelectionStrategy,
    pub scope_selector: ScopeSelector,
    pub verbosity: Verbosity,
    pub system_scope: Scope,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            version_strategy: VersionSelectionStrategy::Nearest,
            scope_selector: ScopeSelector::application(),
            verbosity: Verbosity::None,
            system_scope: Scope::system(),
        }
    }
}

/// A summary of what happened while resolving a graph, beyond what is
/// already visible by walking the (now-resolved) graph itself.
#[derive(Debug, Default)]
pub struct ResolutionReport {
    pub conflict_groups_resolved: usize,
    pub cyclic_conflict_ids: Vec<ConflictId>,
}

/// Runs the full resolution pipeline in place over `graph`.
pub struct ConflictResolver {
    config: ResolverConfig,
}

impl ConflictResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn resolve(&self, graph: &mut DependencyGraph) -> Result<ResolutionReport, ResolveError> {
        let groups = transform::mark(graph, &self.config.system_scope);
        let sorted = transform::sort(graph, &groups);

        let mut report = ResolutionReport {
            cyclic_conflict_ids: sorted.cyclic.clone(),
            ..ResolutionReport::default()
        };

        for conflict_id in &sorted.order {
            let (reachable, parents) = reachable_with_parents(graph);
            let Some(all_nodes) = groups.get(conflict_id) else {
                continue;
            };
            let nodes: Vec<NodeId> = all_nodes
                .iter()
                .copied()
                .filter(|n| reachable.contains(n))
                .collect();
            if nodes.is_empty() {
                // Every contributor was pruned as part of an ancestor's
                // losing subtree; nothing left to resolve here.
                continue;
            }

            self.resolve_group(graph, conflict_id, &nodes, &parents)?;
            report.conflict_groups_resolved += 1;
        }

        Ok(report)
    }

    fn resolve_group(
        &self,
        graph: &mut DependencyGraph,
        conflict_id: &ConflictId,
        nodes: &[NodeId],
        parents: &HashMap<NodeId, NodeId>,
    ) -> Result<(), ResolveError> {
        let winner_node = if nodes.len() == 1 {
            nodes[0]
        } else {
            let candidates: Vec<VersionCandidate> = nodes
                .iter()
                .map(|&node| VersionCandidate {
                    node,
                    depth: graph.node(node).depth(),
                    version: graph
                        .node(node)
                        .effective_artifact()
                        .expect("conflict group member without an artifact")
                        .version
                        .clone(),
                })
                .collect();
            let constraints: Vec<VersionConstraint> = nodes
                .iter()
                .filter_map(|&n| graph.node(n).version_constraint.clone())
                .filter(VersionConstraint::is_hard)
                .collect();
            select_version(
                self.config.version_strategy,
                conflict_id,
                &candidates,
                &constraints,
            )?
        };

        let scope_candidates: Vec<(NodeId, Scope, bool)> = nodes
            .iter()
            .map(|&n| {
                let node = graph.node(n);
                (
                    n,
                    node.derived_scope().cloned().unwrap_or_else(Scope::compile),
                    is_direct(node.depth()),
                )
            })
            .collect();
        let winning_scope = self
            .config
            .scope_selector
            .select(scope_candidates.iter().map(|(n, s, d)| (*n, s, *d)))
            .unwrap_or_else(Scope::compile);
        let winning_optional =
            select_optional(nodes.iter().map(|&n| graph.node(n).derived_optional().unwrap_or(false)));

        debug!(%conflict_id, resolved_nodes = nodes.len(), "resolved conflict group");

        // Only the winner's own derived scope/optional is rewritten to the
        // group's selected values; losers keep whatever their own path
        // derived, they are merely annotated with a pointer to the winner.
        {
            let n = graph.node_mut(winner_node);
            n.original_scope = n.derived_scope.clone();
            n.original_optional = n.derived_optional;
            n.derived_scope = Some(winning_scope);
            n.derived_optional = Some(winning_optional);
            n.winner = Some(winner_node);
            n.managed_bits = n.managed_bits.insert(ManagedBits::WINNER);
        }

        let mut kept_loser_per_parent: HashSet<NodeId> = HashSet::default();
        for &node in nodes {
            let is_winner = node == winner_node;
            if is_winner {
                continue;
            }

            graph.node_mut(node).winner = Some(winner_node);

            let keep = match self.config.verbosity {
                Verbosity::None => false,
                Verbosity::Full => true,
                Verbosity::Standard => {
                    let parent = parents.get(&node).copied();
                    match parent {
                        Some(parent) => kept_loser_per_parent.insert(parent),
                        None => true,
                    }
                }
            };

            if !keep {
                if let Some(&parent) = parents.get(&node) {
                    graph.node_mut(parent).children.retain(|&c| c != node);
                }
            } else {
                // A retained loser stops contributing further edges: its own
                // children are not part of the resolved graph.
                graph.node_mut(node).children.clear();
            }
        }

        Ok(())
    }
}

fn reachable_with_parents(graph: &DependencyGraph) -> (HashSet<NodeId>, HashMap<NodeId, NodeId>) {
    let mut seen = HashSet::default();
    let mut parents = HashMap::default();
    let mut queue = VecDeque::new();
    let root = graph.root();
    seen.insert(root);
    queue.push_back(root);

    while let Some(node) = queue.pop_front() {
        for &child in graph.children(node) {
            if seen.insert(child) {
                parents.insert(child, node);
                queue.push_back(child);
            }
        }
    }

    (seen, parents)
}
