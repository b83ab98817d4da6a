//! Error types surfaced by the conflict-resolution pipeline.

use thiserror::Error;

use crate::artifact::ConflictId;
use depgraph_version::Version;

/// No candidate version in a conflict group satisfies every hard constraint
/// declared against it.
#[derive(Debug, Error)]
#[error("no version of {conflict_id} satisfies every hard constraint; tried {tried:?} against {constraints:?}")]
pub struct UnsolvableVersionConflict {
    pub conflict_id: ConflictId,
    pub tried: Vec<Version>,
    pub constraints: Vec<String>,
}

/// A management declaration could not be reconciled — currently unused by
/// the built-in `DependencyManager` (whose merge rules are all first-wins
/// and therefore always succeed), reserved for a caller-supplied manager
/// that wants to surface a stricter policy violation.
#[derive(Debug, Error)]
#[error("management conflict for {key:?}: {message}")]
pub struct ManagementConflict {
    pub key: (std::sync::Arc<str>, std::sync::Arc<str>),
    pub message: String,
}

/// The top-level error returned by [`crate::resolve::ConflictResolver::resolve`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    UnsolvableVersionConflict(#[from] UnsolvableVersionConflict),
    #[error(transparent)]
    ManagementConflict(#[from] ManagementConflict),
}
