use std::collections::BTreeSet;
use std::sync::Arc;

use depgraph_version::{Version, VersionConstraint};

use crate::artifact::{Artifact, ArtifactCoordinate, ConflictId, ManagementKey};
use crate::dependency::Dependency;
use crate::scope::Scope;

use super::id::NodeId;

/// Bitmask recording which of a node's fields were rewritten by the
/// dependency manager or the conflict-resolution pipeline, for diagnostics.
///
/// Hand-rolled rather than pulled in from a bitflags crate: six fixed flags
/// packed into a `u8`, the same encoding style the version scheme's own
/// [`depgraph_version`] flags use internally.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct ManagedBits(u8);

impl ManagedBits {
    pub const SCOPE: ManagedBits = ManagedBits(1 << 0);
    pub const OPTIONAL: ManagedBits = ManagedBits(1 << 1);
    pub const VERSION: ManagedBits = ManagedBits(1 << 2);
    pub const EXCLUSIONS: ManagedBits = ManagedBits(1 << 3);
    pub const PROPERTIES: ManagedBits = ManagedBits(1 << 4);
    pub const WINNER: ManagedBits = ManagedBits(1 << 5);

    pub fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn insert(self, flag: ManagedBits) -> Self {
        Self(self.0 | flag.0)
    }

    pub fn contains(self, flag: ManagedBits) -> bool {
        self.0 & flag.0 != 0
    }
}

/// The pre-override values the dependency manager recorded when it rewrote a
/// node's version, scope, optionality or exclusions — kept around purely for
/// diagnostics, never consulted by the resolver itself.
#[derive(Debug, Clone, Default)]
pub struct Premanaged {
    pub version: Option<VersionConstraint>,
    pub scope: Option<Scope>,
    pub optional: Option<bool>,
    pub exclusions: Option<BTreeSet<ManagementKey>>,
}

/// A node in the (initially possibly cyclic) dependency graph.
///
/// The root node of a graph may have `dependency == None` (resolving a bare
/// POM with no incoming edge of its own); every other node has `Some`.
#[derive(Debug, Clone)]
pub struct Node {
    pub dependency: Option<Dependency>,
    pub artifact: Option<Artifact>,
    pub children: Vec<NodeId>,
    pub version_constraint: Option<VersionConstraint>,
    pub version: Option<Version>,
    pub premanaged: Premanaged,
    pub relocations: Vec<ArtifactCoordinate>,
    pub aliases: Vec<ArtifactCoordinate>,
    pub repositories: Vec<Arc<str>>,
    pub request_context: Option<Arc<str>>,
    pub managed_bits: ManagedBits,

    /// Assigned by the transformation pipeline; `None` until it has run.
    pub(crate) conflict_id: Option<ConflictId>,
    pub(crate) depth: u32,
    pub(crate) derived_scope: Option<Scope>,
    pub(crate) derived_optional: Option<bool>,
    pub(crate) original_scope: Option<Scope>,
    pub(crate) original_optional: Option<bool>,
    pub(crate) winner: Option<NodeId>,
}

impl Node {
    pub fn new(dependency: Option<Dependency>) -> Self {
        let artifact = dependency.as_ref().map(|d| d.artifact.clone());
        Self {
            dependency,
            artifact,
            children: Vec::new(),
            version_constraint: None,
            version: None,
            premanaged: Premanaged::default(),
            relocations: Vec::new(),
            aliases: Vec::new(),
            repositories: Vec::new(),
            request_context: None,
            managed_bits: ManagedBits::empty(),
            conflict_id: None,
            depth: 0,
            derived_scope: None,
            derived_optional: None,
            original_scope: None,
            original_optional: None,
            winner: None,
        }
    }

    pub fn root() -> Self {
        Self::new(None)
    }

    /// The node's own artifact, falling back to its dependency's artifact if
    /// no artifact was explicitly resolved onto the node yet.
    pub fn effective_artifact(&self) -> Option<&Artifact> {
        self.artifact
            .as_ref()
            .or_else(|| self.dependency.as_ref().map(|d| &d.artifact))
    }

    pub fn declared_scope(&self) -> Option<&Scope> {
        self.dependency.as_ref().map(|d| &d.scope)
    }

    pub fn declared_optional(&self) -> Option<bool> {
        self.dependency.as_ref().and_then(|d| d.optional)
    }

    /// The conflict-group identity assigned by [`crate::transform::ConflictMarker`].
    pub fn conflict_id(&self) -> Option<&ConflictId> {
        self.conflict_id.as_ref()
    }

    /// Depth from the graph root (root is `0`), assigned by the marker pass.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The scope derived along this node's (unique) root-to-node path by
    /// applying the derivation table; `None` until the resolver has run.
    pub fn derived_scope(&self) -> Option<&Scope> {
        self.derived_scope.as_ref()
    }

    pub fn derived_optional(&self) -> Option<bool> {
        self.derived_optional
    }

    /// For a loser annotated in `STANDARD`/`FULL` verbosity, the node that
    /// won its conflict group.
    pub fn winner(&self) -> Option<NodeId> {
        self.winner
    }

    pub fn original_scope(&self) -> Option<&Scope> {
        self.original_scope.as_ref()
    }

    pub fn original_optional(&self) -> Option<bool> {
        self.original_optional
    }

    pub fn is_winner(&self) -> bool {
        self.managed_bits.contains(ManagedBits::WINNER)
    }
}
