use std::fmt;

/// A version string, range or constraint could not be parsed.
///
/// Mirrors the single error surface the Generic Version Scheme exposes to
/// callers: every parsing entry point (`Version::parse`, [`crate::VersionRange::parse`],
/// [`crate::VersionConstraint::parse`]) funnels its failures through this type so that
/// the reason is always attached to the exact input that was rejected.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("invalid version specification '{spec}': {message}")]
pub struct InvalidVersionSpecification {
    /// The offending input string.
    pub spec: String,
    /// A human-readable explanation of why parsing failed.
    pub message: String,
}

impl InvalidVersionSpecification {
    pub(crate) fn new(spec: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            spec: spec.into(),
            message: message.to_string(),
        }
    }
}
