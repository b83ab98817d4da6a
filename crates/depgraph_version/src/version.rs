use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::InvalidVersionSpecification;
use crate::parse::parse_segments;
use crate::segment::{compare_segments, Segment};

/// A version under the Generic Version Scheme.
///
/// `Version` is cheap to clone: internally it is a reference-counted handle to
/// its parsed segments, which is what lets [`crate::VersionScheme`]'s cache hand
/// out shared instances without callers ever observing shared mutable state —
/// there is none, `Version` is immutable once parsed.
///
/// Equality, ordering and hashing all operate on the canonicalized segment
/// list, never on the original spelling: `"1"`, `"1.0.0"` and `"1.ga"` parse to
/// the same `Version`.
#[derive(Clone)]
pub struct Version(Arc<Vec<Segment>>);

impl Version {
    /// Parses a version string under the Generic Version Scheme.
    ///
    /// This always performs a fresh parse. Use [`crate::VersionScheme::parse_version`]
    /// when you want parses to be deduplicated through a shared cache.
    pub fn parse(spec: &str) -> Result<Self, InvalidVersionSpecification> {
        Ok(Self(Arc::new(parse_segments(spec)?)))
    }

    pub(crate) fn from_segments_arc(segments: Arc<Vec<Segment>>) -> Self {
        Self(segments)
    }

    /// Returns the canonical string form of this version: segments rejoined
    /// with `.`, trailing zero segments already elided during parsing.
    pub fn canonical(&self) -> String {
        self.0
            .iter()
            .map(Segment::to_token)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Segment {
    fn to_token(&self) -> String {
        match self {
            Segment::Min => "min".to_string(),
            Segment::Max => "max".to_string(),
            Segment::Qualifier(q) => format!("{q:?}").to_lowercase(),
            Segment::Str(s) => s.clone(),
            Segment::Numeric(n) => n.clone(),
        }
    }
}

impl FromStr for Version {
    type Err = InvalidVersionSpecification;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl fmt::Debug for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Version").field(&self.canonical()).finish()
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_segments(&self.0, &other.0)
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Hash must agree with `Eq`, which compares via `Ord` (accounting for
        // cross-kind padding), so we hash the canonical string rather than the
        // raw segment vector.
        self.canonical().hash(state);
    }
}
