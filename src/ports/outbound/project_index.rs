use crate::inspection::domain::ArtifactLocation;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// ProjectIndex port mapping an intelligence-service project version back to
/// the repository items that were scanned to produce it
///
/// Lookups never mutate the index.
pub trait ProjectIndex: Send + Sync {
    /// Returns the locations recorded for the project version, possibly none
    fn locations_for(
        &self,
        project_name: &str,
        project_version_name: &str,
    ) -> BTreeSet<ArtifactLocation>;
}

/// One entry of an exported project index
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectIndexEntry {
    pub project_name: String,
    pub project_version_name: String,
    #[serde(default)]
    pub locations: Vec<ArtifactLocation>,
}

/// ProjectIndexReader port for loading an exported project index
pub trait ProjectIndexReader {
    /// Reads the index export at `path`
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    fn read_project_index(&self, path: &Path) -> Result<Vec<ProjectIndexEntry>>;
}
