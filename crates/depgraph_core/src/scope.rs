use std::fmt;
use std::sync::Arc;

/// A dependency scope name: `compile`, `runtime`, `provided`, `test`, `system`,
/// or any other scope a custom [`ScopeManager`] chooses to recognize.
///
/// Cheap to clone (an `Arc<str>` handle) and ordered lexicographically so it
/// can live in a `BTreeSet`/`BTreeMap` key without extra ceremony; the scope
/// *priority* used during conflict resolution is a separate concept, see
/// [`crate::resolve::ScopeSelector`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scope(Arc<str>);

impl Scope {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn compile() -> Self {
        Self::new("compile")
    }

    pub fn runtime() -> Self {
        Self::new("runtime")
    }

    pub fn provided() -> Self {
        Self::new("provided")
    }

    pub fn test() -> Self {
        Self::new("test")
    }

    pub fn system() -> Self {
        Self::new("system")
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Scope {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Scope {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// External collaborator supplying the two facts about scopes the core needs
/// but doesn't own: which scope marks a `localPath`-backed system dependency,
/// and which scopes propagate to transitive dependents.
///
/// Everything else about scope *semantics* — the derivation table and the
/// priority orderings used to pick a winner — is internal to the resolver
/// (see [`crate::resolve::scope`]), which fixes those tables for the five
/// well-known scopes; `ScopeManager` exists so a caller with its own
/// build-scope DSL can still plug in `system` detection and transitivity
/// without the core depending on that DSL.
pub trait ScopeManager: Send + Sync {
    /// The scope that ties a dependency to a `localPath` instead of a
    /// repository-resolved artifact.
    fn system_scope(&self) -> Scope;

    /// Whether a dependency declared with this scope should be visible to
    /// (inherited by) the dependency's own transitive dependencies.
    fn is_transitive(&self, scope: &Scope) -> bool;
}

/// The default Maven-style scope manager: `system` is reserved for
/// `localPath`-backed dependencies, and `provided`/`test`/`system` are
/// non-transitive.
#[derive(Debug, Default, Clone, Copy)]
pub struct MavenScopeManager;

impl ScopeManager for MavenScopeManager {
    fn system_scope(&self) -> Scope {
        Scope::system()
    }

    fn is_transitive(&self, scope: &Scope) -> bool {
        !matches!(scope.as_str(), "provided" | "test" | "system")
    }
}
