use crate::inspection::domain::ArtifactLocation;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Repository layout coordinates of a build-tool artifact (maven, gradle)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLayout {
    pub organization: Option<String>,
    pub module: Option<String>,
    pub base_revision: Option<String>,
}

/// ArtifactMetadataReader port for reading ambient metadata of repository items
///
/// This port abstracts the repository's property store. It is read-only:
/// identification never writes metadata back.
pub trait ArtifactMetadataReader: Send + Sync {
    /// Returns the value of a property recorded on the item, if any
    fn property(&self, location: &ArtifactLocation, key: &str) -> Option<String>;

    /// Returns the layout coordinates of the item, if the repository has a layout
    fn file_layout(&self, location: &ArtifactLocation) -> Option<FileLayout>;

    /// Returns the SHA-1 checksum recorded for the item
    fn sha1(&self, location: &ArtifactLocation) -> Option<String>;
}

/// Metadata of one repository item as exported from the property store
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactRecord {
    pub location: ArtifactLocation,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub layout: Option<FileLayout>,
    #[serde(default)]
    pub sha1: Option<String>,
}

/// ArtifactRecordReader port for loading exported item metadata
pub trait ArtifactRecordReader {
    /// Reads the metadata export at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a valid export
    fn read_artifact_records(&self, path: &Path) -> Result<Vec<ArtifactRecord>>;
}
