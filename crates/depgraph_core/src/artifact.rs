use std::sync::Arc;

use depgraph_version::Version;

/// The `(groupId, artifactId)` pair that every one of the manager's five
/// tracked maps (`managedVersions`, `managedScopes`, ...) is keyed by.
pub type ManagementKey = (Arc<str>, Arc<str>);

/// The coordinate of an artifact, version-independent.
///
/// Two [`ArtifactCoordinate`]s are equal exactly when they name the "same"
/// artifact for conflict-resolution purposes: `(groupId, artifactId,
/// extension, classifier)`. The version lives on [`Artifact`], not here —
/// that's what lets a `ConflictId` collect multiple versions of one artifact
/// into a single conflict group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    pub group_id: Arc<str>,
    pub artifact_id: Arc<str>,
    pub extension: Arc<str>,
    pub classifier: Option<Arc<str>>,
}

impl ArtifactCoordinate {
    pub fn new(
        group_id: impl Into<Arc<str>>,
        artifact_id: impl Into<Arc<str>>,
        extension: impl Into<Arc<str>>,
        classifier: Option<Arc<str>>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            extension: extension.into(),
            classifier,
        }
    }

    /// Coordinate for a plain `jar`-extension, classifier-less artifact —
    /// the common case in examples and tests.
    pub fn simple(group_id: impl Into<Arc<str>>, artifact_id: impl Into<Arc<str>>) -> Self {
        Self::new(group_id, artifact_id, "jar", None)
    }

    /// The `(groupId, artifactId)` pair used to key [`crate::manager::DependencyManager`]'s
    /// tracked maps.
    pub fn management_key(&self) -> ManagementKey {
        (self.group_id.clone(), self.artifact_id.clone())
    }

    /// The identity used to group nodes into a conflict group: version is
    /// deliberately excluded.
    pub fn conflict_id(&self) -> ConflictId {
        ConflictId {
            group_id: self.group_id.clone(),
            artifact_id: self.artifact_id.clone(),
            extension: self.extension.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

/// The identity of a conflict group: an [`ArtifactCoordinate`] with its
/// version erased.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConflictId {
    pub group_id: Arc<str>,
    pub artifact_id: Arc<str>,
    pub extension: Arc<str>,
    pub classifier: Option<Arc<str>>,
}

impl std::fmt::Display for ConflictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.extension)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

/// Extra, mostly-empty properties carried on an artifact. Currently just the
/// local filesystem path used when a dependency's scope is `system`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactProperties {
    pub local_path: Option<Arc<str>>,
}

/// An immutable artifact value: coordinate, resolved version and properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub coordinate: ArtifactCoordinate,
    pub version: Version,
    pub properties: ArtifactProperties,
}

impl Artifact {
    pub fn new(coordinate: ArtifactCoordinate, version: Version) -> Self {
        Self {
            coordinate,
            version,
            properties: ArtifactProperties::default(),
        }
    }

    pub fn with_local_path(mut self, local_path: impl Into<Arc<str>>) -> Self {
        self.properties.local_path = Some(local_path.into());
        self
    }
}
