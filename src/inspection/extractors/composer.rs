use crate::inspection::domain::{ArtifactLocation, CanonicalIdentity, Ecosystem, ExtractionFailure};
use crate::ports::outbound::{ArtifactMetadataReader, ComposerManifestLocator, ComposerRelease};

/// Identifies a composer archive through the manifests published next to it.
///
/// A release matches when its dist reference equals the archive's file stem,
/// or its dist shasum equals the checksum recorded for the archive. The first
/// matching release across all manifests wins.
pub fn extract(
    location: &ArtifactLocation,
    locator: &dyn ComposerManifestLocator,
    metadata: &dyn ArtifactMetadataReader,
) -> Result<CanonicalIdentity, ExtractionFailure> {
    let manifests = locator
        .locate(location)
        .map_err(|e| ExtractionFailure::ManifestLookup {
            path: location.to_string(),
            details: format!("{:#}", e),
        })?;

    if manifests.is_empty() {
        return Err(ExtractionFailure::ManifestNotFound {
            path: location.to_string(),
        });
    }

    let stem = file_stem(location.file_name().unwrap_or_default());
    let sha1 = metadata.sha1(location);

    let release = manifests
        .iter()
        .flat_map(|manifest| manifest.releases())
        .find(|release| matches_artifact(release, stem, sha1.as_deref()))
        .ok_or_else(|| ExtractionFailure::NoMatchingManifestEntry {
            path: location.to_string(),
        })?;

    CanonicalIdentity::new(Ecosystem::Composer, release.name.trim(), release.version.trim())
}

fn matches_artifact(release: &ComposerRelease, stem: &str, sha1: Option<&str>) -> bool {
    let Some(dist) = &release.dist else {
        return false;
    };

    let reference_matches = dist
        .reference
        .as_deref()
        .is_some_and(|reference| !stem.is_empty() && reference == stem);
    let shasum_matches = match (dist.shasum.as_deref(), sha1) {
        (Some(shasum), Some(sha1)) => !shasum.is_empty() && shasum.eq_ignore_ascii_case(sha1),
        _ => false,
    };

    reference_matches || shasum_matches
}

/// File name without its final extension
fn file_stem(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}
