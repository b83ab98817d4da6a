#![deny(missing_docs)]

//! The Generic Version Scheme: parsing, canonicalization, comparison and
//! range/constraint evaluation for the artifact resolver.
//!
//! [`Version`] totally orders version strings built from numeric runs, the
//! well-known Maven-style qualifiers (`alpha`, `beta`, `milestone`, `rc`,
//! `snapshot`, `ga`, `sp`) and arbitrary strings. [`VersionRange`] and
//! [`VersionConstraint`] build interval and union-of-intervals requirements on
//! top of it. [`VersionScheme`] is the entry point most callers want: it
//! exposes the three `parse_*` functions behind a shared, self-pruning cache.

mod constraint;
mod error;
mod parse;
mod range;
mod scheme;
mod segment;
mod version;

pub use constraint::VersionConstraint;
pub use error::InvalidVersionSpecification;
pub use range::{Bound, UnionVersionRange, VersionRange};
pub use scheme::VersionScheme;
pub use version::Version;
