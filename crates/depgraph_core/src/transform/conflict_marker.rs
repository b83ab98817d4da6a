//! The `ConflictMarker` transform: a single depth-first pass that assigns
//! every node its `conflict_id`, `depth` and derived scope/optionality, while
//! pruning the graph's cycles.
//!
//! Pruning and marking are fused into one traversal rather than two because
//! they share the same gray-set bookkeeping: a "cycle" per the contract is a
//! node whose conflict id already appears among its own ancestors on the
//! *current path* — exactly the set a depth-first walk already tracks to
//! know when to backtrack. A coarser, cross-path notion of a cyclic conflict
//! id is a separate concern, see [`super::conflict_id_sorter`].
//!
//! This pass never drops an edge for being non-transitive (`provided`/`test`
//! below the direct layer) or optional: that filtering happens earlier, at
//! collection time, via [`crate::filters`]. By the time a graph reaches this
//! pass every remaining edge is assumed already admitted, so marking only
//! ever removes a cyclic back-edge.

use ahash::HashSet;
use indexmap::IndexMap;
use tracing::trace;

use crate::artifact::ConflictId;
use crate::graph::{DependencyGraph, NodeId};
use crate::resolve::optionality::derive_optional;
use crate::resolve::scope::derive_scope;
use crate::scope::Scope;

/// The outcome of running [`mark`]: every conflict id encountered, in
/// first-seen (root-to-leaf, left-to-right) order, together with the nodes
/// that belong to it.
#[derive(Debug, Default)]
pub struct ConflictGroups {
    groups: IndexMap<ConflictId, Vec<NodeId>>,
}

impl ConflictGroups {
    pub fn iter(&self) -> impl Iterator<Item = (&ConflictId, &[NodeId])> {
        self.groups.iter().map(|(id, nodes)| (id, nodes.as_slice()))
    }

    pub fn get(&self, id: &ConflictId) -> Option<&[NodeId]> {
        self.groups.get(id).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Runs the marking/pruning pass over `graph`, starting at its root.
pub fn mark(graph: &mut DependencyGraph, system_scope: &Scope) -> ConflictGroups {
    let mut groups = ConflictGroups::default();
    let mut gray = HashSet::default();
    let root = graph.root();

    {
        let node = graph.node_mut(root);
        node.depth = 0;
        node.conflict_id = None;
        node.derived_scope = node.declared_scope().cloned();
        node.derived_optional = Some(node.declared_optional().unwrap_or(false));
    }

    let root_scope = graph.node(root).derived_scope().cloned();
    let root_optional = graph.node(root).derived_optional().unwrap_or(false);

    visit_children(graph, root, 1, root_scope.as_ref(), root_optional, system_scope, &mut gray, &mut groups);
    groups
}

fn visit_children(
    graph: &mut DependencyGraph,
    parent: NodeId,
    depth: u32,
    parent_scope: Option<&Scope>,
    parent_optional: bool,
    system_scope: &Scope,
    gray: &mut HashSet<ConflictId>,
    groups: &mut ConflictGroups,
) {
    let children = graph.children(parent).to_vec();
    let mut kept = Vec::with_capacity(children.len());

    for child in children {
        let conflict_id = graph
            .node(child)
            .effective_artifact()
            .map(|artifact| artifact.coordinate.conflict_id());

        if let Some(id) = &conflict_id {
            if gray.contains(id) {
                trace!(conflict_id = %id, "pruning cyclic edge");
                continue;
            }
        }

        let declared_scope = graph.node(child).declared_scope().cloned();
        let declared_optional = graph.node(child).declared_optional().unwrap_or(false);
        let derived_scope = declared_scope
            .as_ref()
            .map(|scope| derive_scope(parent_scope, scope, system_scope));

        let derived_optional = derive_optional(parent_optional, declared_optional);

        {
            let node = graph.node_mut(child);
            node.depth = depth;
            node.conflict_id = conflict_id.clone();
            node.derived_scope = derived_scope.clone();
            node.derived_optional = Some(derived_optional);
        }

        kept.push(child);

        if let Some(id) = conflict_id {
            groups.groups.entry(id.clone()).or_default().push(child);
            gray.insert(id.clone());
            visit_children(
                graph,
                child,
                depth + 1,
                derived_scope.as_ref(),
                derived_optional,
                system_scope,
                gray,
                groups,
            );
            gray.remove(&id);
        } else {
            visit_children(
                graph,
                child,
                depth + 1,
                derived_scope.as_ref(),
                derived_optional,
                system_scope,
                gray,
                groups,
            );
        }
    }

    graph.node_mut(parent).children = kept;
}

#[cfg(test)]
mod tests {
    use depgraph_version::Version;

    use crate::artifact::{Artifact, ArtifactCoordinate};
    use crate::dependency::Dependency;
    use crate::graph::Node;

    use super::*;

    fn artifact(group: &str, id: &str, version: &str) -> Artifact {
        Artifact::new(
            ArtifactCoordinate::simple(group, id),
            Version::parse(version).unwrap(),
        )
    }

    fn dependency(group: &str, id: &str, version: &str, scope: &str) -> Dependency {
        Dependency::new(artifact(group, id, version), Scope::new(scope))
    }

    #[test]
    fn path_cycle_is_pruned_without_removing_the_reentered_node() {
        // foo -> bar -> baz -> bar (cycle) ; expect baz to end up childless.
        let mut graph = DependencyGraph::new(Node::root());
        let root = graph.root();
        let foo = graph.add_child(root, Node::new(Some(dependency("g", "foo", "1.0", "compile"))));
        let bar = graph.add_child(foo, Node::new(Some(dependency("g", "bar", "1.0", "compile"))));
        let baz = graph.add_child(bar, Node::new(Some(dependency("g", "baz", "1.0", "compile"))));
        graph.add_child(baz, Node::new(Some(dependency("g", "bar", "1.0", "compile"))));

        let groups = mark(&mut graph, &Scope::system());

        assert!(graph.children(baz).is_empty());
        assert_eq!(groups.get(&artifact("g", "bar", "1.0").coordinate.conflict_id()).unwrap().len(), 1);
    }

    #[test]
    fn marking_never_drops_an_edge_on_scope_grounds() {
        // Marking only removes cyclic back-edges; non-transitive scope
        // pruning is a filter-level concern applied before this pass runs.
        let mut graph = DependencyGraph::new(Node::root());
        let root = graph.root();
        let foo = graph.add_child(root, Node::new(Some(dependency("g", "foo", "1.0", "compile"))));
        let bar = graph.add_child(foo, Node::new(Some(dependency("g", "bar", "1.0", "test"))));

        let groups = mark(&mut graph, &Scope::system());

        assert_eq!(graph.children(foo), &[bar]);
        assert_eq!(
            groups
                .get(&artifact("g", "bar", "1.0").coordinate.conflict_id())
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn compile_parent_passes_test_scope_child_through_unchanged() {
        let mut graph = DependencyGraph::new(Node::root());
        let root = graph.root();
        let foo = graph.add_child(root, Node::new(Some(dependency("g", "foo", "1.0", "compile"))));
        let bar = graph.add_child(foo, Node::new(Some(dependency("g", "bar", "1.0", "test"))));

        mark(&mut graph, &Scope::system());

        assert_eq!(graph.node(bar).derived_scope(), Some(&Scope::test()));
    }

    #[test]
    fn optional_parent_makes_descendants_optional() {
        let mut graph = DependencyGraph::new(Node::root());
        let root = graph.root();
        let foo = graph.add_child(
            root,
            Node::new(Some(dependency("g", "foo", "1.0", "compile").optional(true))),
        );
        let bar = graph.add_child(foo, Node::new(Some(dependency("g", "bar", "1.0", "compile"))));

        mark(&mut graph, &Scope::system());

        assert_eq!(graph.node(bar).derived_optional(), Some(true));
    }
}
