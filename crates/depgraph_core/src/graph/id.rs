/// An opaque handle to a [`super::Node`] inside a [`super::DependencyGraph`]'s
/// arena. Stable for the lifetime of the graph: removing edges never
/// invalidates a `NodeId`, it only removes references to it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn from_usize(index: usize) -> Self {
        Self(u32::try_from(index).expect("dependency graph exceeded u32::MAX nodes"))
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
