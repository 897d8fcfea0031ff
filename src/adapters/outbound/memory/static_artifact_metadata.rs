use crate::inspection::domain::ArtifactLocation;
use crate::ports::outbound::{
    ArtifactMetadataReader, ArtifactRecord, ComposerManifest, ComposerManifestLocator, FileLayout,
};
use crate::shared::Result;
use std::collections::HashMap;

/// StaticArtifactMetadata adapter serving a loaded metadata export
///
/// Items missing from the export simply have no metadata.
#[derive(Debug, Default)]
pub struct StaticArtifactMetadata {
    records: HashMap<ArtifactLocation, ArtifactRecord>,
}

impl StaticArtifactMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from records; a later record for the same item wins
    pub fn from_records(records: impl IntoIterator<Item = ArtifactRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.location.clone(), record))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ArtifactMetadataReader for StaticArtifactMetadata {
    fn property(&self, location: &ArtifactLocation, key: &str) -> Option<String> {
        self.records
            .get(location)
            .and_then(|record| record.properties.get(key))
            .cloned()
    }

    fn file_layout(&self, location: &ArtifactLocation) -> Option<FileLayout> {
        self.records
            .get(location)
            .and_then(|record| record.layout.clone())
    }

    fn sha1(&self, location: &ArtifactLocation) -> Option<String> {
        self.records
            .get(location)
            .and_then(|record| record.sha1.clone())
    }
}

/// Locator for runs without a composer mirror: no manifest is ever found
#[derive(Debug, Default, Clone, Copy)]
pub struct NoComposerManifests;

impl ComposerManifestLocator for NoComposerManifests {
    fn locate(&self, _location: &ArtifactLocation) -> Result<Vec<ComposerManifest>> {
        Ok(Vec::new())
    }
}
