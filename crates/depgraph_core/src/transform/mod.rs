//! The transformation pipeline that runs between graph collection and
//! conflict resolution: marking/pruning and conflict-id ordering.

pub mod conflict_id_sorter;
pub mod conflict_marker;

pub use conflict_id_sorter::{sort, SortedConflictIds};
pub use conflict_marker::{mark, ConflictGroups};
