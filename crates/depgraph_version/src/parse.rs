use crate::error::InvalidVersionSpecification;
use crate::segment::{canonicalize, Segment};

/// Splits a version string into delimiter-bounded tokens and classifies each one.
///
/// Explicit delimiters `.`, `-` and `_` are consumed without producing a token
/// boundary marker of their own; an implicit boundary is additionally inserted
/// at every digit/non-digit transition, without consuming a character.
pub(crate) fn parse_segments(spec: &str) -> Result<Vec<Segment>, InvalidVersionSpecification> {
    if spec.is_empty() {
        return Err(InvalidVersionSpecification::new(spec, "empty version spec"));
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    // `None` until the first character of the current token has fixed
    // whether the run is numeric or not.
    let mut current_is_digit: Option<bool> = None;

    for ch in spec.chars() {
        if matches!(ch, '.' | '-' | '_') {
            segments.push(Segment::classify(&current));
            current.clear();
            current_is_digit = None;
            continue;
        }
        // Non-ASCII digits fall through to `is_ascii_digit() == false` and are
        // treated as letters.
        let is_digit = ch.is_ascii_digit();
        match current_is_digit {
            None => {
                current_is_digit = Some(is_digit);
                current.push(ch);
            }
            Some(k) if k == is_digit => current.push(ch),
            Some(_) => {
                segments.push(Segment::classify(&current));
                current.clear();
                current.push(ch);
                current_is_digit = Some(is_digit);
            }
        }
    }
    segments.push(Segment::classify(&current));

    Ok(canonicalize(segments))
}
