//! A small ergonomic helper for constructing literal [`DependencyGraph`]s by
//! hand, for tests and for callers who already have a fully-formed
//! dependency tree and just want to hand it to the resolver.
//!
//! Reading a graph out of a repository or build manifest is out of scope for
//! this crate; that collection step is expected to build its own
//! [`DependencyGraph`] directly (or via this builder) and pass the result to
//! [`crate::resolve::ConflictResolver::resolve`]. This builder is also where
//! [`DependencyManager`] actually gets consulted: every [`Self::add`] looks up
//! the adding node's accumulated management before the child node is created,
//! the same way a real collector is expected to premanage a dependency's
//! version/scope/optional/exclusions as §4.M describes, and
//! [`Self::declare_management`] is the equivalent of a node's own
//! `<dependencyManagement>` block.

use std::collections::HashMap;

use depgraph_version::{Version, VersionConstraint};

use crate::artifact::{Artifact, ArtifactCoordinate};
use crate::dependency::Dependency;
use crate::graph::{DependencyGraph, ManagedBits, Node, NodeId, Premanaged};
use crate::manager::{DependencyManager, ManagementDeclaration};
use crate::scope::Scope;

/// Builds a [`DependencyGraph`] node by node, starting from its root.
pub struct GraphBuilder {
    graph: DependencyGraph,
    managers: HashMap<NodeId, DependencyManager>,
    system_scope: Scope,
}

impl GraphBuilder {
    /// Starts a new graph whose root carries no dependency of its own (the
    /// usual case: the root represents the project being resolved, not a
    /// dependency edge into it).
    ///
    /// The root starts out with an unconfigured manager (accumulates
    /// indefinitely, applies from depth 0) that emits no overrides until
    /// [`Self::declare_management`] is used to record some.
    pub fn new() -> Self {
        let graph = DependencyGraph::new(Node::root());
        let mut managers = HashMap::new();
        managers.insert(graph.root(), DependencyManager::new(u32::MAX, 0));
        Self {
            graph,
            managers,
            system_scope: Scope::system(),
        }
    }

    /// Starts a new graph whose root itself was reached via `dependency`
    /// (useful when resolving a single artifact's transitive closure rather
    /// than a project's).
    pub fn with_root_dependency(dependency: Dependency) -> Self {
        let graph = DependencyGraph::new(Node::new(Some(dependency)));
        let mut managers = HashMap::new();
        managers.insert(graph.root(), DependencyManager::new(u32::MAX, 0));
        Self {
            graph,
            managers,
            system_scope: Scope::system(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.graph.root()
    }

    /// Adds `dependency` as a child of `parent`, returning the new node's id.
    ///
    /// `parent`'s accumulated [`DependencyManager`] is consulted first: any
    /// managed version/scope/optional/exclusions override is applied to
    /// `dependency` before the node is created, and the pre-override values
    /// are recorded on [`Node::premanaged`] with the matching
    /// [`ManagedBits`] flag set, exactly as §4.M describes.
    pub fn add(&mut self, parent: NodeId, dependency: Dependency) -> NodeId {
        let parent_manager = self
            .managers
            .get(&parent)
            .cloned()
            .unwrap_or_else(|| DependencyManager::new(u32::MAX, 0));
        let key = dependency.artifact.coordinate.management_key();
        let managed = parent_manager.lookup(&key);

        let mut dependency = dependency;
        let mut premanaged = Premanaged::default();
        let mut bits = ManagedBits::empty();
        let mut version_constraint = None;

        if let Some(version) = managed.version {
            premanaged.version = None;
            version_constraint = Some(version);
            bits = bits.insert(ManagedBits::VERSION);
        }
        if let Some(scope) = managed.scope {
            premanaged.scope = Some(dependency.scope.clone());
            dependency.scope = scope.clone();
            bits = bits.insert(ManagedBits::SCOPE);
            if scope == self.system_scope {
                if let Some(local_path) = managed.local_path {
                    dependency.artifact.properties.local_path = Some(local_path);
                    bits = bits.insert(ManagedBits::PROPERTIES);
                }
            } else if dependency.artifact.properties.local_path.take().is_some() {
                bits = bits.insert(ManagedBits::PROPERTIES);
            }
        }
        if let Some(optional) = managed.optional {
            premanaged.optional = dependency.optional;
            dependency.optional = Some(optional);
            bits = bits.insert(ManagedBits::OPTIONAL);
        }
        if let Some(exclusions) = managed.exclusions {
            if !exclusions.is_subset(&dependency.exclusions) {
                premanaged.exclusions = Some(dependency.exclusions.clone());
                dependency.exclusions.extend(exclusions);
                bits = bits.insert(ManagedBits::EXCLUSIONS);
            }
        }

        let mut node = Node::new(Some(dependency));
        node.version_constraint = version_constraint;
        node.premanaged = premanaged;
        node.managed_bits = bits;

        let id = self.graph.add_child(parent, node);
        self.managers.insert(id, parent_manager.derive_child());
        id
    }

    /// Convenience over [`Self::add`] for the common case of a plain
    /// `group:artifact:version` compile-scope edge.
    pub fn add_simple(&mut self, parent: NodeId, group: &str, artifact: &str, version: &str) -> NodeId {
        let dependency = Dependency::new(
            Artifact::new(
                ArtifactCoordinate::simple(group, artifact),
                Version::parse(version).expect("valid version literal in test graph"),
            ),
            Scope::compile(),
        );
        self.add(parent, dependency)
    }

    /// Folds `declaration` into `node`'s accumulated management, the way a
    /// node's own `<dependencyManagement>` block would: it affects overrides
    /// computed for children added under `node` from this point on, never
    /// `node` itself (which was already built by the time its own management
    /// block could be read).
    pub fn declare_management(&mut self, node: NodeId, declaration: ManagementDeclaration) {
        let system_scope = self.system_scope.clone();
        let manager = self
            .managers
            .entry(node)
            .or_insert_with(|| DependencyManager::new(u32::MAX, 0));
        manager.manage(&declaration, &system_scope);
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.graph.node_mut(id)
    }

    /// Records the hard/soft version requirement a node's own declaration
    /// carried, for the version selector's constraint backtracking.
    pub fn with_constraint(&mut self, id: NodeId, constraint: &str) -> &mut Self {
        let parsed = VersionConstraint::parse(constraint).expect("valid constraint literal in test graph");
        self.graph.node_mut(id).version_constraint = Some(parsed);
        self
    }

    pub fn build(self) -> DependencyGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
