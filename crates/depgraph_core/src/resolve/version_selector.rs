//! Version winner selection within one conflict group.
//!
//! `Nearest` (Maven's historical default) and `Highest` both reduce to the
//! same shape: order the group's candidates by the strategy's preference,
//! then walk that order picking the first candidate whose version satisfies
//! every hard constraint anyone in the group declared. Falling through to
//! the next-nearest/next-highest candidate when the preferred one fails a
//! hard constraint is the "backtracking" the contract calls for; there is
//! deliberately no combinatorial search across *multiple* conflict groups at
//! once, since every group's constraints are independent once scope/optional
//! derivation has already pruned the tree.

use depgraph_version::{Version, VersionConstraint};

use crate::artifact::ConflictId;
use crate::error::UnsolvableVersionConflict;
use crate::graph::NodeId;

/// Which version in a conflict group wins when more than one is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSelectionStrategy {
    /// The shallowest (closest-to-root) declaration wins; Maven's default.
    Nearest,
    /// The numerically greatest version wins, regardless of depth.
    Highest,
}

/// One candidate version contributed by a node in a conflict group.
#[derive(Debug, Clone)]
pub struct VersionCandidate {
    pub node: NodeId,
    pub depth: u32,
    pub version: Version,
}

/// Picks the winning node for `conflict_id` out of `candidates`, backtracking
/// past any candidate whose version violates one of `constraints`.
///
/// `candidates` is assumed to already be in first-seen (collection) order;
/// that order is preserved as the final tie-break once depth/version are
/// equal.
pub fn select_version(
    strategy: VersionSelectionStrategy,
    conflict_id: &ConflictId,
    candidates: &[VersionCandidate],
    constraints: &[VersionConstraint],
) -> Result<NodeId, UnsolvableVersionConflict> {
    let mut ordered: Vec<&VersionCandidate> = candidates.iter().collect();
    match strategy {
        VersionSelectionStrategy::Nearest => {
            ordered.sort_by_key(|c| c.depth);
        }
        VersionSelectionStrategy::Highest => {
            ordered.sort_by(|a, b| b.version.cmp(&a.version));
        }
    }

    for candidate in &ordered {
        if constraints
            .iter()
            .all(|constraint| constraint.contains(&candidate.version))
        {
            return Ok(candidate.node);
        }
    }

    Err(UnsolvableVersionConflict {
        conflict_id: conflict_id.clone(),
        tried: candidates.iter().map(|c| c.version.clone()).collect(),
        constraints: constraints.iter().map(ToString::to_string).collect(),
    })
}

#[cfg(test)]
mod tests {
    use depgraph_version::Version;

    use crate::artifact::ArtifactCoordinate;
    use crate::graph::NodeId;

    use super::*;

    fn candidate(node: u32, depth: u32, version: &str) -> VersionCandidate {
        VersionCandidate {
            node: NodeId::from_usize(node as usize),
            depth,
            version: Version::parse(version).unwrap(),
        }
    }

    fn conflict_id() -> ConflictId {
        ArtifactCoordinate::simple("org.example", "widget").conflict_id()
    }

    #[test]
    fn nearest_prefers_shallower_depth_over_higher_version() {
        let candidates = vec![candidate(0, 2, "2.0"), candidate(1, 1, "1.0")];
        let winner = select_version(
            VersionSelectionStrategy::Nearest,
            &conflict_id(),
            &candidates,
            &[],
        )
        .unwrap();
        assert_eq!(winner, NodeId::from_usize(1));
    }

    #[test]
    fn highest_prefers_greater_version_regardless_of_depth() {
        let candidates = vec![candidate(0, 2, "2.0"), candidate(1, 1, "1.0")];
        let winner = select_version(
            VersionSelectionStrategy::Highest,
            &conflict_id(),
            &candidates,
            &[],
        )
        .unwrap();
        assert_eq!(winner, NodeId::from_usize(0));
    }

    #[test]
    fn backtracks_past_a_candidate_that_violates_a_hard_constraint() {
        let candidates = vec![candidate(0, 1, "1.0"), candidate(1, 2, "2.0")];
        let constraints = vec![VersionConstraint::parse("[1.5,3.0)").unwrap()];
        let winner = select_version(
            VersionSelectionStrategy::Nearest,
            &conflict_id(),
            &candidates,
            &constraints,
        )
        .unwrap();
        assert_eq!(winner, NodeId::from_usize(1));
    }

    #[test]
    fn reports_unsolvable_when_no_candidate_satisfies_constraints() {
        let candidates = vec![candidate(0, 1, "1.0")];
        let constraints = vec![VersionConstraint::parse("[2.0,3.0)").unwrap()];
        let err = select_version(
            VersionSelectionStrategy::Nearest,
            &conflict_id(),
            &candidates,
            &constraints,
        )
        .unwrap_err();
        assert_eq!(err.tried.len(), 1);
    }
}
