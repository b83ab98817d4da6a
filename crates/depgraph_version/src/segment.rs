use std::cmp::Ordering;

/// The well-known qualifiers of the Generic Version Scheme, in ascending order.
///
/// `Ord` is derived from declaration order so `Qualifier::Alpha < Qualifier::Sp`
/// falls directly out of the enum layout instead of a hand-written table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub(crate) enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    /// `ga`, `final` and `release` are synonyms for the "no qualifier" marker.
    Ga,
    Sp,
}

impl Qualifier {
    /// Recognizes a lowercase qualifier token, including the abbreviated spellings.
    fn recognize(token: &str) -> Option<Self> {
        Some(match token {
            "alpha" | "a" => Qualifier::Alpha,
            "beta" | "b" => Qualifier::Beta,
            "milestone" | "m" => Qualifier::Milestone,
            "rc" | "cr" => Qualifier::Rc,
            "snapshot" => Qualifier::Snapshot,
            "ga" | "final" | "release" | "" => Qualifier::Ga,
            "sp" => Qualifier::Sp,
            _ => return None,
        })
    }
}

/// A single token of a tokenized version string.
///
/// Kinds are ordered `Min < Qualifier < Str < Numeric < Max`; this is the order
/// `Segment`'s `Ord` impl enforces before ever looking at the payload.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) enum Segment {
    /// Only valid as a trailing segment; the absolute minimum of a prefix line.
    Min,
    Qualifier(Qualifier),
    /// An unrecognized, purely alphabetic token. Compared lexicographically.
    Str(String),
    /// A run of ASCII digits, stored with leading zeros stripped.
    Numeric(String),
    /// Only valid as a trailing segment; the absolute maximum of a prefix line.
    Max,
}

impl Segment {
    fn kind_rank(&self) -> u8 {
        match self {
            Segment::Min => 0,
            Segment::Qualifier(_) => 1,
            Segment::Str(_) => 2,
            Segment::Numeric(_) => 3,
            Segment::Max => 4,
        }
    }

    /// A "zero" segment is elided from the trailing end of a canonicalized version:
    /// the empty token, the numeral `0`, and `ga`/`final`/`release` (but only when
    /// they are the rightmost segment — the caller enforces that part).
    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Segment::Numeric(n) => n == "0",
            Segment::Str(s) => s.is_empty(),
            Segment::Qualifier(Qualifier::Ga) => true,
            _ => false,
        }
    }

    /// Classifies a single delimiter-bounded token.
    pub(crate) fn classify(token: &str) -> Self {
        if token.is_empty() {
            return Segment::Str(String::new());
        }
        if token.bytes().all(|b| b.is_ascii_digit()) {
            let trimmed = token.trim_start_matches('0');
            let normalized = if trimmed.is_empty() { "0" } else { trimmed };
            return Segment::Numeric(normalized.to_string());
        }
        let lower = token.to_lowercase();
        if let Some(q) = Qualifier::recognize(&lower) {
            return Segment::Qualifier(q);
        }
        match lower.as_str() {
            "min" => Segment::Min,
            "max" => Segment::Max,
            _ => Segment::Str(lower),
        }
    }

    /// The value substituted for a position one side ran out of segments at,
    /// chosen so that comparison lines up with the other side's next kind:
    /// a numeric continuation pads with `0`, anything else pads with the
    /// neutral qualifier `ga`.
    fn pad_for(other: &Segment) -> Segment {
        match other {
            Segment::Numeric(_) => Segment::Numeric("0".to_string()),
            _ => Segment::Qualifier(Qualifier::Ga),
        }
    }
}

impl PartialOrd for Segment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Segment {
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = self.kind_rank().cmp(&other.kind_rank());
        if rank != Ordering::Equal {
            return rank;
        }
        match (self, other) {
            (Segment::Min, Segment::Min) | (Segment::Max, Segment::Max) => Ordering::Equal,
            (Segment::Qualifier(a), Segment::Qualifier(b)) => a.cmp(b),
            (Segment::Str(a), Segment::Str(b)) => a.cmp(b),
            (Segment::Numeric(a), Segment::Numeric(b)) => compare_numeric(a, b),
            _ => unreachable!("same kind_rank implies same variant"),
        }
    }
}

/// Compares two non-negative integers given as normalized (no leading zero)
/// ASCII digit strings: longer wins, otherwise lexicographic comparison agrees
/// with numeric comparison digit by digit.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Compares two segment slices position by position, padding out the shorter
/// side per [`Segment::pad_for`] until either side differs or both are exhausted.
pub(crate) fn compare_segments(a: &[Segment], b: &[Segment]) -> Ordering {
    let len = a.len().max(b.len());
    for i in 0..len {
        let (sa, sb) = match (a.get(i), b.get(i)) {
            (Some(sa), Some(sb)) => (sa.clone(), sb.clone()),
            (Some(sa), None) => (sa.clone(), Segment::pad_for(sa)),
            (None, Some(sb)) => (Segment::pad_for(sb), sb.clone()),
            (None, None) => unreachable!(),
        };
        let ord = sa.cmp(&sb);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

/// Trims trailing zero segments (see [`Segment::is_zero`]), always leaving at
/// least one segment behind so that `"0"` canonicalizes to itself rather than
/// the empty list.
pub(crate) fn canonicalize(mut segments: Vec<Segment>) -> Vec<Segment> {
    while segments.len() > 1 && segments.last().is_some_and(Segment::is_zero) {
        segments.pop();
    }
    segments
}
