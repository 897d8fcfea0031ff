use crate::inspection::domain::ArtifactLocation;
use crate::ports::outbound::ProjectIndex;
use std::collections::BTreeSet;
use std::sync::Arc;

/// RepositoryCorrelator - maps a project version back to repository items
///
/// A miss is not an error: the project may come from a source that is no
/// longer tracked, or its artifacts may have been deleted since the scan.
#[derive(Clone)]
pub struct RepositoryCorrelator {
    index: Arc<dyn ProjectIndex>,
}

impl RepositoryCorrelator {
    pub fn new(index: Arc<dyn ProjectIndex>) -> Self {
        Self { index }
    }

    pub fn find_locations(
        &self,
        project_name: &str,
        project_version_name: &str,
    ) -> BTreeSet<ArtifactLocation> {
        let locations = self.index.locations_for(project_name, project_version_name);
        if locations.is_empty() {
            tracing::trace!(
                project = project_name,
                version = project_version_name,
                "No repository items correlate with project version"
            );
        }
        locations
    }
}
