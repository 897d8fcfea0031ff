use crate::inspection::domain::{ArtifactLocation, CanonicalIdentity, Ecosystem, ExtractionFailure};
use crate::ports::outbound::ArtifactMetadataReader;

/// Reads name and version from the properties recorded on the artifact
pub fn extract_from_properties(
    ecosystem: Ecosystem,
    location: &ArtifactLocation,
    metadata: &dyn ArtifactMetadataReader,
    name_property: &str,
    version_property: &str,
) -> Result<CanonicalIdentity, ExtractionFailure> {
    let name = required_property(location, metadata, name_property)?;
    let version = required_property(location, metadata, version_property)?;
    CanonicalIdentity::new(ecosystem, name, version)
}

/// Reads organisation, module and base revision from the repository layout
pub fn extract_from_layout(
    ecosystem: Ecosystem,
    location: &ArtifactLocation,
    metadata: &dyn ArtifactMetadataReader,
) -> Result<CanonicalIdentity, ExtractionFailure> {
    let missing = |property: &str| ExtractionFailure::MissingMetadata {
        path: location.to_string(),
        property: property.to_string(),
    };

    let layout = metadata
        .file_layout(location)
        .ok_or_else(|| missing("layout"))?;
    let organization = non_blank(layout.organization).ok_or_else(|| missing("layout.organization"))?;
    let module = non_blank(layout.module).ok_or_else(|| missing("layout.module"))?;
    let revision = non_blank(layout.base_revision).ok_or_else(|| missing("layout.baseRevision"))?;

    CanonicalIdentity::with_namespace(ecosystem, organization, module, revision)
}

fn required_property(
    location: &ArtifactLocation,
    metadata: &dyn ArtifactMetadataReader,
    key: &str,
) -> Result<String, ExtractionFailure> {
    non_blank(metadata.property(location, key)).ok_or_else(|| ExtractionFailure::MissingMetadata {
        path: location.to_string(),
        property: key.to_string(),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
