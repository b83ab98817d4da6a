//! `ConflictIdSorter`: orders conflict groups so that a resolver processing
//! them in sequence always sees a conflict id's "ancestor" ids resolved
//! first.
//!
//! This is a coarser, id-level notion of precedence than the per-path cycle
//! pruning [`super::conflict_marker`] already performed: conflict id `A`
//! precedes conflict id `B` if some node in `A`'s group has a node in `B`'s
//! group anywhere in its subtree, even if `A` and `B` never appear twice on
//! the same root-to-leaf path (so the marker's gray-set check would not have
//! seen anything to prune). Two ids can still end up mutually reachable
//! through *different* branches — that is a genuine id-level cycle, reported
//! separately rather than silently broken.

use std::collections::VecDeque;

use ahash::{HashMap, HashSet};
use indexmap::IndexSet;

use crate::artifact::ConflictId;
use crate::graph::{DependencyGraph, NodeId};

use super::conflict_marker::ConflictGroups;

/// The result of [`sort`]: a linear order over conflict ids respecting
/// subtree precedence, plus any ids that could not be placed because they
/// took part in an id-level cycle.
#[derive(Debug, Default)]
pub struct SortedConflictIds {
    pub order: Vec<ConflictId>,
    pub cyclic: Vec<ConflictId>,
}

/// Builds the id-level precedence graph from `graph`/`groups` and
/// topologically sorts it with Kahn's algorithm, breaking ties by first-seen
/// order (the order [`ConflictGroups`] already recorded them in).
pub fn sort(graph: &DependencyGraph, groups: &ConflictGroups) -> SortedConflictIds {
    let first_seen: IndexSet<ConflictId> = groups.iter().map(|(id, _)| id.clone()).collect();

    let mut successors: HashMap<ConflictId, HashSet<ConflictId>> = HashMap::default();
    let mut in_degree: HashMap<ConflictId, u32> = first_seen.iter().map(|id| (id.clone(), 0)).collect();

    for id in &first_seen {
        successors.entry(id.clone()).or_default();
    }

    for id in first_seen.iter() {
        let Some(nodes) = groups.get(id) else {
            continue;
        };
        for &node in nodes {
            record_descendant_edges(graph, node, id, &mut successors, &mut in_degree);
        }
    }

    let mut queue: VecDeque<ConflictId> = first_seen
        .iter()
        .filter(|id| in_degree.get(*id).copied().unwrap_or(0) == 0)
        .cloned()
        .collect();

    let mut order = Vec::new();
    let mut placed: HashSet<ConflictId> = HashSet::default();

    while let Some(next) = pop_earliest(&mut queue, &first_seen) {
        placed.insert(next.clone());
        order.push(next.clone());
        if let Some(succ) = successors.get(&next) {
            for target in succ {
                if let Some(degree) = in_degree.get_mut(target) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 && !placed.contains(target) {
                        queue.push_back(target.clone());
                    }
                }
            }
        }
    }

    let cyclic = first_seen
        .into_iter()
        .filter(|id| !placed.contains(id))
        .collect();

    SortedConflictIds { order, cyclic }
}

/// Pops whichever queued id appears earliest in `first_seen`, keeping the
/// sort's tie-breaking deterministic regardless of `HashMap`/`HashSet`
/// iteration order upstream.
fn pop_earliest(queue: &mut VecDeque<ConflictId>, first_seen: &IndexSet<ConflictId>) -> Option<ConflictId> {
    let (idx, _) = queue
        .iter()
        .enumerate()
        .min_by_key(|(_, id)| first_seen.get_index_of(*id).unwrap_or(usize::MAX))?;
    queue.remove(idx)
}

fn record_descendant_edges(
    graph: &DependencyGraph,
    node: NodeId,
    owner_id: &ConflictId,
    successors: &mut HashMap<ConflictId, HashSet<ConflictId>>,
    in_degree: &mut HashMap<ConflictId, u32>,
) {
    for &child in graph.children(node) {
        if let Some(child_id) = graph.node(child).conflict_id() {
            if child_id != owner_id {
                let added = successors
                    .entry(owner_id.clone())
                    .or_default()
                    .insert(child_id.clone());
                if added {
                    *in_degree.entry(child_id.clone()).or_insert(0) += 1;
                }
            }
        }
        // Keep descending regardless: a grandchild further down still
        // counts as a descendant of `owner_id`, not just of `child`'s id.
        record_descendant_edges(graph, child, owner_id, successors, in_degree);
    }
}

#[cfg(test)]
mod tests {
    use depgraph_version::Version;

    use crate::artifact::{Artifact, ArtifactCoordinate};
    use crate::dependency::Dependency;
    use crate::graph::Node;
    use crate::scope::Scope;

    use super::super::conflict_marker::mark;
    use super::*;

    fn dependency(group: &str, id: &str, version: &str) -> Dependency {
        Dependency::new(
            Artifact::new(
                ArtifactCoordinate::simple(group, id),
                Version::parse(version).unwrap(),
            ),
            Scope::compile(),
        )
    }

    #[test]
    fn ancestor_ids_sort_before_descendant_ids() {
        let mut graph = DependencyGraph::new(Node::root());
        let root = graph.root();
        let foo = graph.add_child(root, Node::new(Some(dependency("g", "foo", "1.0"))));
        let bar = graph.add_child(foo, Node::new(Some(dependency("g", "bar", "1.0"))));
        graph.add_child(bar, Node::new(Some(dependency("g", "baz", "1.0"))));

        let groups = mark(&mut graph, &Scope::system());
        let sorted = sort(&graph, &groups);

        let pos = |name: &str| {
            sorted
                .order
                .iter()
                .position(|id| id.artifact_id.as_ref() == name)
                .unwrap()
        };
        assert!(pos("foo") < pos("bar"));
        assert!(pos("bar") < pos("baz"));
        assert!(sorted.cyclic.is_empty());
    }

    #[test]
    fn cross_branch_id_cycle_is_reported_not_silently_broken() {
        // foo -> a -> b  and  foo -> b2 -> a2, where a/a2 share a conflict id
        // and b/b2 share a conflict id, so `a` precedes `b` on one branch and
        // `b` precedes `a` on the other.
        let mut graph = DependencyGraph::new(Node::root());
        let root = graph.root();
        let foo = graph.add_child(root, Node::new(Some(dependency("g", "foo", "1.0"))));
        let a1 = graph.add_child(foo, Node::new(Some(dependency("g", "a", "1.0"))));
        graph.add_child(a1, Node::new(Some(dependency("g", "b", "1.0"))));
        let b2 = graph.add_child(foo, Node::new(Some(dependency("g", "b", "1.0"))));
        graph.add_child(b2, Node::new(Some(dependency("g", "a", "1.0"))));

        let groups = mark(&mut graph, &Scope::system());
        let sorted = sort(&graph, &groups);

        let a_id = ArtifactCoordinate::simple("g", "a").conflict_id();
        let b_id = ArtifactCoordinate::simple("g", "b").conflict_id();
        assert!(sorted.cyclic.contains(&a_id));
        assert!(sorted.cyclic.contains(&b_id));
    }
}
