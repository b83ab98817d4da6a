//! Optionality derivation and conflict-group selection.
//!
//! Unlike scope, optionality has no combination table: a transitive
//! dependency is optional if *any* edge on its root-to-node path declared it
//! optional — one non-optional ancestor is not enough to make it required,
//! because Maven only walks an optional dependency's own transitive
//! dependencies when something explicitly asked for the optional one too.

/// Folds a parent's derived optionality with a child's own declared
/// optionality: the child is optional if it declared itself optional, or if
/// its parent's path was already optional.
pub fn derive_optional(parent_optional: bool, child_declared_optional: bool) -> bool {
    parent_optional || child_declared_optional
}

/// Picks whether a conflict group's surviving node should be considered
/// optional: it is non-optional if *any* contributing edge was non-optional.
pub fn select_optional(candidates: impl IntoIterator<Item = bool>) -> bool {
    candidates.into_iter().all(|optional| optional)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_parent_makes_every_descendant_optional() {
        assert!(derive_optional(true, false));
    }

    #[test]
    fn non_optional_parent_respects_childs_own_declaration() {
        assert!(!derive_optional(false, false));
        assert!(derive_optional(false, true));
    }

    #[test]
    fn any_non_optional_edge_wins_selection() {
        assert!(!select_optional([true, false, true]));
        assert!(select_optional([true, true]));
        assert!(select_optional(std::iter::empty()));
    }
}
