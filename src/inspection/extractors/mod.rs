//! Pattern extractors, one per extraction strategy.
//!
//! Each extractor is a plain function over its inputs; collaborators arrive
//! through [`ExtractionContext`].
pub mod artifact_info;
pub mod composer;
pub mod conda;

pub use conda::DEFAULT_CONDA_EXTENSIONS;

use crate::inspection::domain::{
    ArtifactLocation, CanonicalIdentity, Ecosystem, ExtractionFailure, ExtractionStrategy,
};
use crate::ports::outbound::{ArtifactMetadataReader, ComposerManifestLocator};

/// Read-only collaborators and settings shared by every extractor call
#[derive(Clone, Copy)]
pub struct ExtractionContext<'a> {
    pub metadata: &'a dyn ArtifactMetadataReader,
    pub manifests: &'a dyn ComposerManifestLocator,
    pub conda_extensions: &'a [String],
}

/// Runs the extractor of `ecosystem` against `location`
pub fn extract(
    ecosystem: Ecosystem,
    location: &ArtifactLocation,
    context: ExtractionContext<'_>,
) -> Result<CanonicalIdentity, ExtractionFailure> {
    match ecosystem.strategy() {
        ExtractionStrategy::FileNameConvention => {
            conda::extract(location, context.conda_extensions)
        }
        ExtractionStrategy::ArtifactMetadata {
            name_property,
            version_property,
        } => artifact_info::extract_from_properties(
            ecosystem,
            location,
            context.metadata,
            name_property,
            version_property,
        ),
        ExtractionStrategy::BuildLayout => {
            artifact_info::extract_from_layout(ecosystem, location, context.metadata)
        }
        ExtractionStrategy::ComposerManifest => {
            composer::extract(location, context.manifests, context.metadata)
        }
    }
}
