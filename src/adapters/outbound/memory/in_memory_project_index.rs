use crate::inspection::domain::ArtifactLocation;
use crate::ports::outbound::{ProjectIndex, ProjectIndexEntry};
use std::collections::{BTreeSet, HashMap};

/// InMemoryProjectIndex adapter holding a loaded project index export
///
/// Entries naming the same project version are merged.
#[derive(Debug, Default)]
pub struct InMemoryProjectIndex {
    entries: HashMap<(String, String), BTreeSet<ArtifactLocation>>,
}

impl InMemoryProjectIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = ProjectIndexEntry>) -> Self {
        let mut index = Self::new();
        for entry in entries {
            index.insert(
                entry.project_name,
                entry.project_version_name,
                entry.locations,
            );
        }
        index
    }

    pub fn insert(
        &mut self,
        project_name: impl Into<String>,
        project_version_name: impl Into<String>,
        locations: impl IntoIterator<Item = ArtifactLocation>,
    ) {
        self.entries
            .entry((project_name.into(), project_version_name.into()))
            .or_default()
            .extend(locations);
    }

    /// Number of distinct project versions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ProjectIndex for InMemoryProjectIndex {
    fn locations_for(
        &self,
        project_name: &str,
        project_version_name: &str,
    ) -> BTreeSet<ArtifactLocation> {
        self.entries
            .get(&(project_name.to_string(), project_version_name.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
