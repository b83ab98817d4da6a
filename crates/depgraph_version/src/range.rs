use std::fmt;

use crate::error::InvalidVersionSpecification;
use crate::version::Version;

/// One side of a [`VersionRange`]: a version together with whether it is
/// included in the interval.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Bound {
    /// The version at this end of the interval.
    pub version: Version,
    /// Whether `version` itself is part of the interval.
    pub inclusive: bool,
}

/// A closed, open or half-open interval of versions: `[lo?, hi?]`.
///
/// An absent bound means open on that side. Constructed by [`VersionRange::parse`]
/// using the classic bracket syntax (`[`/`]` inclusive, `(`/`)` exclusive), or
/// directly via [`VersionRange::new`] for programmatic construction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VersionRange {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

impl VersionRange {
    /// Builds a range directly from its bounds.
    pub fn new(lower: Option<Bound>, upper: Option<Bound>) -> Self {
        Self { lower, upper }
    }

    /// The lower bound, if any.
    pub fn lower_bound(&self) -> Option<&Bound> {
        self.lower.as_ref()
    }

    /// The upper bound, if any.
    pub fn upper_bound(&self) -> Option<&Bound> {
        self.upper.as_ref()
    }

    /// Whether `version` falls within this range.
    pub fn contains(&self, version: &Version) -> bool {
        let lower_ok = match &self.lower {
            None => true,
            Some(Bound {
                version: b,
                inclusive: true,
            }) => version >= b,
            Some(Bound {
                version: b,
                inclusive: false,
            }) => version > b,
        };
        let upper_ok = match &self.upper {
            None => true,
            Some(Bound {
                version: b,
                inclusive: true,
            }) => version <= b,
            Some(Bound {
                version: b,
                inclusive: false,
            }) => version < b,
        };
        lower_ok && upper_ok
    }

    /// Parses a single bracketed range, e.g. `[1.0,2.0)`, `[1.0]`, or the
    /// prefix-wildcard pin form `[1.2.*]`.
    pub fn parse(spec: &str) -> Result<Self, InvalidVersionSpecification> {
        let trimmed = spec.trim();
        let mut chars = trimmed.chars();
        let first = chars
            .next()
            .ok_or_else(|| InvalidVersionSpecification::new(spec, "empty range"))?;
        let last = trimmed.chars().last().expect("checked non-empty above");

        let open_inclusive = match first {
            '[' => true,
            '(' => false,
            _ => {
                return Err(InvalidVersionSpecification::new(
                    spec,
                    "range must start with '[' or '('",
                ))
            }
        };
        let close_inclusive = match last {
            ']' => true,
            ')' => false,
            _ => {
                return Err(InvalidVersionSpecification::new(
                    spec,
                    "unterminated range: missing closing ']' or ')'",
                ))
            }
        };
        if trimmed.len() < 2 {
            return Err(InvalidVersionSpecification::new(
                spec,
                "unterminated range",
            ));
        }
        let content = &trimmed[1..trimmed.len() - 1];

        let comma_count = content.matches(',').count();
        if comma_count == 0 {
            if let Some(prefix) = content.strip_suffix(".*").or_else(|| {
                if content == "*" {
                    Some("")
                } else {
                    None
                }
            }) {
                let lo_spec = if prefix.is_empty() {
                    "min".to_string()
                } else {
                    format!("{prefix}.min")
                };
                let hi_spec = if prefix.is_empty() {
                    "max".to_string()
                } else {
                    format!("{prefix}.max")
                };
                let lo = Version::parse(&lo_spec)?;
                let hi = Version::parse(&hi_spec)?;
                return Ok(Self {
                    lower: Some(Bound {
                        version: lo,
                        inclusive: true,
                    }),
                    upper: Some(Bound {
                        version: hi,
                        inclusive: true,
                    }),
                });
            }

            // A bracketed pin, e.g. `[1.0]` == `[1.0,1.0]`.
            let version = Version::parse(content)?;
            return Ok(Self {
                lower: Some(Bound {
                    version: version.clone(),
                    inclusive: open_inclusive,
                }),
                upper: Some(Bound {
                    version,
                    inclusive: close_inclusive,
                }),
            });
        }
        if comma_count > 1 {
            return Err(InvalidVersionSpecification::new(
                spec,
                "a range accepts at most one comma separating lower and upper bounds",
            ));
        }

        let (lo_str, hi_str) = content.split_once(',').expect("comma_count == 1");
        let lower = if lo_str.trim().is_empty() {
            None
        } else {
            Some(Bound {
                version: Version::parse(lo_str.trim())?,
                inclusive: open_inclusive,
            })
        };
        let upper = if hi_str.trim().is_empty() {
            None
        } else {
            Some(Bound {
                version: Version::parse(hi_str.trim())?,
                inclusive: close_inclusive,
            })
        };

        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            if lo.version > hi.version {
                return Err(InvalidVersionSpecification::new(
                    spec,
                    "upper bound is lower than the lower bound",
                ));
            }
        }

        Ok(Self { lower, upper })
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match &self.lower {
            Some(b) if b.inclusive => '[',
            _ => '(',
        };
        let close = match &self.upper {
            Some(b) if b.inclusive => ']',
            _ => ')',
        };
        write!(f, "{open}")?;
        if let Some(b) = &self.lower {
            write!(f, "{}", b.version)?;
        }
        write!(f, ",")?;
        if let Some(b) = &self.upper {
            write!(f, "{}", b.version)?;
        }
        write!(f, "{close}")
    }
}

/// The union of a set of [`VersionRange`]s, as produced when a constraint
/// string lists several comma-separated bracketed ranges.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UnionVersionRange {
    ranges: Vec<VersionRange>,
}

impl UnionVersionRange {
    /// Builds a union directly from its member ranges.
    pub fn new(ranges: Vec<VersionRange>) -> Self {
        Self { ranges }
    }

    /// The member ranges making up this union, in declaration order.
    pub fn ranges(&self) -> &[VersionRange] {
        &self.ranges
    }

    /// The OR of the membership test of every range in the union.
    pub fn contains(&self, version: &Version) -> bool {
        self.ranges.iter().any(|r| r.contains(version))
    }

    /// The minimum of the member lower bounds; an open (`None`) bound on any
    /// member dominates and makes the union's lower bound open too.
    pub fn lower_bound(&self) -> Option<&Bound> {
        let mut best: Option<&Bound> = None;
        for range in &self.ranges {
            match range.lower_bound() {
                None => return None,
                Some(b) => {
                    best = Some(match best {
                        None => b,
                        Some(cur) if b.version < cur.version => b,
                        Some(cur) => cur,
                    });
                }
            }
        }
        best
    }

    /// The maximum of the member upper bounds; an open (`None`) bound on any
    /// member dominates and makes the union's upper bound open too.
    pub fn upper_bound(&self) -> Option<&Bound> {
        let mut best: Option<&Bound> = None;
        for range in &self.ranges {
            match range.upper_bound() {
                None => return None,
                Some(b) => {
                    best = Some(match best {
                        None => b,
                        Some(cur) if b.version > cur.version => b,
                        Some(cur) => cur,
                    });
                }
            }
        }
        best
    }

    /// Whether every range in `self` shares at least one version with every
    /// range in `other` — used to test two hard constraints for
    /// compatibility without enumerating versions.
    pub fn intersects(&self, other: &UnionVersionRange) -> bool {
        self.ranges
            .iter()
            .any(|a| other.ranges.iter().any(|b| ranges_overlap(a, b)))
    }
}

fn ranges_overlap(a: &VersionRange, b: &VersionRange) -> bool {
    let lower_ok = match (a.lower_bound(), b.upper_bound()) {
        (None, _) | (_, None) => true,
        (Some(al), Some(bu)) => {
            al.version < bu.version || (al.version == bu.version && al.inclusive && bu.inclusive)
        }
    };
    let upper_ok = match (a.upper_bound(), b.lower_bound()) {
        (None, _) | (_, None) => true,
        (Some(au), Some(bl)) => {
            au.version > bl.version || (au.version == bl.version && au.inclusive && bl.inclusive)
        }
    };
    lower_ok && upper_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn inclusive_bounds() {
        let r = VersionRange::parse("[1,2]").unwrap();
        assert!(r.contains(&v("1")));
        assert!(r.contains(&v("2")));
        assert!(!r.contains(&v("3")));
    }

    #[test]
    fn exclusive_lower() {
        let r = VersionRange::parse("(1,2)").unwrap();
        assert!(!r.contains(&v("1")));
        assert!(r.contains(&v("1.5")));
        assert!(!r.contains(&v("2")));
    }

    #[test]
    fn pin_form() {
        let r = VersionRange::parse("[1.0]").unwrap();
        assert!(r.contains(&v("1.0")));
        assert!(!r.contains(&v("1.0.1")));
    }

    #[test]
    fn open_bounds() {
        let r = VersionRange::parse("[1,)").unwrap();
        assert!(r.contains(&v("1000")));
        assert!(!r.contains(&v("0.5")));

        let r = VersionRange::parse("(,2]").unwrap();
        assert!(r.contains(&v("0")));
        assert!(!r.contains(&v("3")));
    }

    #[test]
    fn wildcard_prefix() {
        let r = VersionRange::parse("[1.2.*]").unwrap();
        assert!(r.contains(&v("1.2")));
        assert!(r.contains(&v("1.2.9999")));
        assert!(!r.contains(&v("1.3")));
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert!(VersionRange::parse("[2,1]").is_err());
    }

    #[test]
    fn rejects_unterminated() {
        assert!(VersionRange::parse("[1,2").is_err());
    }

    #[test]
    fn union_contains_and_gap() {
        let u = UnionVersionRange::new(vec![
            VersionRange::parse("[1,2]").unwrap(),
            VersionRange::parse("[3,4]").unwrap(),
        ]);
        assert!(u.contains(&v("1.5")));
        assert!(u.contains(&v("3.5")));
        assert!(!u.contains(&v("2.5")));
    }

    #[test]
    fn union_bounds_open_dominates() {
        let u = UnionVersionRange::new(vec![
            VersionRange::parse("[1,2]").unwrap(),
            VersionRange::parse("[3,)").unwrap(),
        ]);
        assert!(u.upper_bound().is_none());
        assert_eq!(u.lower_bound().unwrap().version, v("1"));
    }

    #[test]
    fn disjoint_ranges_do_not_intersect() {
        let a = UnionVersionRange::new(vec![VersionRange::parse("[1,2]").unwrap()]);
        let b = UnionVersionRange::new(vec![VersionRange::parse("[5,6]").unwrap()]);
        assert!(!a.intersects(&b));
    }
}
