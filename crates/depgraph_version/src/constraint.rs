use std::fmt;

use crate::error::InvalidVersionSpecification;
use crate::range::{UnionVersionRange, VersionRange};
use crate::version::Version;

/// A parsed dependency version requirement: either a single soft preferred
/// version, or a hard union of bracketed ranges.
///
/// A bare version string with no brackets ("1.2.3") is a *soft* preference,
/// not a constraint that excludes anything else; a bracketed range ("[1.2,2.0)")
/// is *hard* and must be satisfied.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum VersionConstraint {
    /// A preferred version; does not exclude anything.
    Soft(Version),
    /// One or more bracketed ranges, unioned together.
    Hard(UnionVersionRange),
}

impl VersionConstraint {
    /// Whether `version` satisfies this constraint. A soft constraint is
    /// satisfied only by the exact preferred version; use [`Self::is_hard`]
    /// to tell callers that a soft constraint never rules anything else out.
    pub fn contains(&self, version: &Version) -> bool {
        match self {
            VersionConstraint::Soft(preferred) => preferred == version,
            VersionConstraint::Hard(union) => union.contains(version),
        }
    }

    /// Whether this is a hard (range-backed) constraint rather than a soft
    /// preferred version.
    pub fn is_hard(&self) -> bool {
        matches!(self, VersionConstraint::Hard(_))
    }

    /// Parses a constraint string: a comma-separated sequence of bracketed
    /// ranges, or (if there is no bracketed range at all) a single bare
    /// version, interpreted as a soft preference.
    pub fn parse(spec: &str) -> Result<Self, InvalidVersionSpecification> {
        if spec.trim().is_empty() {
            return Err(InvalidVersionSpecification::new(spec, "empty spec"));
        }

        let parts = split_top_level(spec);
        let mut ranges = Vec::new();
        let mut bare_count = 0;

        for part in &parts {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                return Err(InvalidVersionSpecification::new(
                    spec,
                    "empty element in comma-separated constraint",
                ));
            }
            if trimmed.starts_with('[') || trimmed.starts_with('(') {
                ranges.push(VersionRange::parse(trimmed)?);
            } else {
                bare_count += 1;
            }
        }

        if bare_count > 0 && !ranges.is_empty() {
            return Err(InvalidVersionSpecification::new(
                spec,
                "cannot mix a bare preferred version with bracketed ranges",
            ));
        }
        if bare_count > 0 {
            if parts.len() > 1 {
                return Err(InvalidVersionSpecification::new(
                    spec,
                    "a soft preferred version cannot be combined with other elements",
                ));
            }
            return Ok(VersionConstraint::Soft(Version::parse(spec.trim())?));
        }

        Ok(VersionConstraint::Hard(UnionVersionRange::new(ranges)))
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Soft(v) => write!(f, "{v}"),
            VersionConstraint::Hard(u) => {
                let rendered = u
                    .ranges()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                f.write_str(&rendered)
            }
        }
    }
}

/// Splits a constraint string on commas that are not nested inside a range's
/// own brackets, so `"[1,2],[3,4]"` yields two parts rather than four.
fn split_top_level(s: &str) -> Vec<&str> {
    let mut depth = 0i32;
    let mut start = 0;
    let mut parts = Vec::new();
    for (i, c) in s.char_indices() {
        match c {
            '[' | '(' => depth += 1,
            ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&s[start..]);
    parts
}
