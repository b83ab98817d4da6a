use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::constraint::VersionConstraint;
use crate::error::InvalidVersionSpecification;
use crate::parse::parse_segments;
use crate::range::VersionRange;
use crate::segment::Segment;
use crate::version::Version;

/// Parses version strings, ranges and constraints under the Generic Version
/// Scheme, deduplicating identical version strings through a shared cache.
///
/// The cache holds only [`Weak`] references: once every [`Version`] clone
/// handed out for a given spelling is dropped, the entry decays on its own and
/// the next lookup simply reparses. This keeps the cache memory-sensitive
/// without needing an eviction policy, and caching never changes what a parse
/// returns — only whether the work is repeated.
///
/// Safe to share across threads: `parse_version` takes `&self`, so one
/// `VersionScheme` can back concurrent collectors.
#[derive(Default)]
pub struct VersionScheme {
    cache: Mutex<HashMap<String, Weak<Vec<Segment>>>>,
}

impl VersionScheme {
    /// Builds a scheme with an empty parse cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a version string, reusing a cached parse when the exact same
    /// spelling was seen before and is still referenced elsewhere.
    pub fn parse_version(&self, spec: &str) -> Result<Version, InvalidVersionSpecification> {
        if let Some(segments) = self.cached(spec) {
            return Ok(Version::from_segments_arc(segments));
        }
        let segments = Arc::new(parse_segments(spec)?);
        let mut cache = self.cache.lock().expect("version cache poisoned");
        cache.insert(spec.to_owned(), Arc::downgrade(&segments));
        Ok(Version::from_segments_arc(segments))
    }

    /// Parses a bracketed range spec, e.g. `"[1.0,2.0)"`. Ranges are not
    /// cached: they're cheap to parse and rarely repeated verbatim the way
    /// version strings are.
    pub fn parse_range(&self, spec: &str) -> Result<VersionRange, InvalidVersionSpecification> {
        VersionRange::parse(spec)
    }

    /// Parses a dependency version requirement: a comma-separated sequence
    /// of ranges, or a single bare version treated as a soft preference.
    pub fn parse_constraint(
        &self,
        spec: &str,
    ) -> Result<VersionConstraint, InvalidVersionSpecification> {
        VersionConstraint::parse(spec)
    }

    fn cached(&self, spec: &str) -> Option<Arc<Vec<Segment>>> {
        let mut cache = self.cache.lock().expect("version cache poisoned");
        match cache.get(spec).and_then(Weak::upgrade) {
            Some(arc) => Some(arc),
            None => {
                cache.remove(spec);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_parses_are_equal_regardless_of_cache_hits() {
        let scheme = VersionScheme::new();
        let a = scheme.parse_version("1.2.3").unwrap();
        let b = scheme.parse_version("1.2.3").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn cache_does_not_change_observable_result() {
        let scheme = VersionScheme::new();
        let cached = scheme.parse_version("2.0").unwrap();
        let direct = Version::parse("2.0").unwrap();
        assert_eq!(cached, direct);
    }
}
