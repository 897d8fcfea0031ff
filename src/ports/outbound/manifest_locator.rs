use crate::inspection::domain::ArtifactLocation;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Distribution reference of a composer release
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComposerDist {
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub shasum: Option<String>,
}

/// One release entry of a composer package manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComposerRelease {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub dist: Option<ComposerDist>,
}

/// A composer package manifest (`packages.json` style): package name to releases
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ComposerManifest {
    #[serde(default)]
    pub packages: BTreeMap<String, Vec<ComposerRelease>>,
}

impl ComposerManifest {
    pub fn releases(&self) -> impl Iterator<Item = &ComposerRelease> {
        self.packages.values().flatten()
    }
}

/// ComposerManifestLocator port for finding manifests related to an artifact
///
/// Composer archives do not encode their identity; the manifest describing
/// them is published among sibling or related items.
pub trait ComposerManifestLocator: Send + Sync {
    /// Returns every manifest found for the artifact, possibly none
    ///
    /// # Errors
    /// Returns an error if a manifest exists but cannot be read or parsed
    fn locate(&self, location: &ArtifactLocation) -> Result<Vec<ComposerManifest>>;
}
