use ahash::HashSet;

use super::id::NodeId;
use super::DependencyGraph;

/// Pre/post-order traversal protocol over a [`DependencyGraph`].
///
/// `visit_enter` returning `false` skips descending into that node's
/// children (but `visit_leave` is still called for it); `visit_leave`
/// returning `false` stops visiting that node's remaining siblings.
pub trait Visitor {
    fn visit_enter(&mut self, graph: &DependencyGraph, node: NodeId) -> bool;
    fn visit_leave(&mut self, graph: &DependencyGraph, node: NodeId) -> bool;
}

/// Walks `graph` depth-first starting at its root, driving `visitor`.
pub fn walk(graph: &DependencyGraph, visitor: &mut dyn Visitor) {
    walk_node(graph, graph.root(), visitor);
}

fn walk_node(graph: &DependencyGraph, node: NodeId, visitor: &mut dyn Visitor) -> bool {
    if visitor.visit_enter(graph, node) {
        for &child in graph.children(node) {
            if !walk_node(graph, child, visitor) {
                break;
            }
        }
    }
    visitor.visit_leave(graph, node)
}

/// Collects a pre-order, deduplicated-by-`NodeId` sequence of nodes.
///
/// A `NodeId` is recorded the first time it is *entered*; repeat
/// occurrences (possible once conflict resolution lets several parents
/// share a single winner node) are skipped without revisiting their subtree.
#[derive(Debug, Default)]
pub struct PreorderNodeList {
    seen: HashSet<NodeId>,
    pub nodes: Vec<NodeId>,
}

impl PreorderNodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(graph: &DependencyGraph) -> Vec<NodeId> {
        let mut visitor = Self::new();
        walk(graph, &mut visitor);
        visitor.nodes
    }
}

impl Visitor for PreorderNodeList {
    fn visit_enter(&mut self, _graph: &DependencyGraph, node: NodeId) -> bool {
        let first_visit = self.seen.insert(node);
        if first_visit {
            self.nodes.push(node);
        }
        first_visit
    }

    fn visit_leave(&mut self, _graph: &DependencyGraph, _node: NodeId) -> bool {
        true
    }
}

/// Collects a post-order, deduplicated-by-`NodeId` sequence of nodes.
#[derive(Debug, Default)]
pub struct PostorderNodeList {
    seen: HashSet<NodeId>,
    pub nodes: Vec<NodeId>,
}

impl PostorderNodeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(graph: &DependencyGraph) -> Vec<NodeId> {
        let mut visitor = Self::new();
        walk(graph, &mut visitor);
        visitor.nodes
    }
}

impl Visitor for PostorderNodeList {
    fn visit_enter(&mut self, _graph: &DependencyGraph, node: NodeId) -> bool {
        !self.seen.contains(&node)
    }

    fn visit_leave(&mut self, _graph: &DependencyGraph, node: NodeId) -> bool {
        if self.seen.insert(node) {
            self.nodes.push(node);
        }
        true
    }
}
