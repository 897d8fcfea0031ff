use super::ReportMetadata;
use crate::inspection::domain::Ecosystem;
use crate::inspection::services::{IdentifiedArtifact, ResolutionOutcome, SkippedArtifact};
use serde::Serialize;

/// An identified artifact as it appears in a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentifiedView {
    pub path: String,
    pub ecosystem: Ecosystem,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    pub version: String,
    pub external_id: String,
}

impl From<IdentifiedArtifact> for IdentifiedView {
    fn from(artifact: IdentifiedArtifact) -> Self {
        let identity = artifact.identity;
        Self {
            path: artifact.location.to_string(),
            ecosystem: identity.ecosystem(),
            namespace: identity.namespace().map(str::to_string),
            name: identity.name().to_string(),
            version: identity.version().to_string(),
            external_id: identity.external_id(),
        }
    }
}

/// A skipped artifact and the reason it could not be identified
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedView {
    pub path: String,
    pub reason: String,
}

impl From<SkippedArtifact> for SkippedView {
    fn from(artifact: SkippedArtifact) -> Self {
        Self {
            path: artifact.location.to_string(),
            reason: artifact.reason.to_string(),
        }
    }
}

/// IdentifyResponse - result of an identification run
#[derive(Debug, Clone, Serialize)]
pub struct IdentifyResponse {
    pub metadata: ReportMetadata,
    pub identified: Vec<IdentifiedView>,
    pub skipped: Vec<SkippedView>,
}

impl IdentifyResponse {
    pub fn new(metadata: ReportMetadata, outcome: ResolutionOutcome) -> Self {
        Self {
            metadata,
            identified: outcome.identified.into_iter().map(Into::into).collect(),
            skipped: outcome.skipped.into_iter().map(Into::into).collect(),
        }
    }

    /// True when every artifact was identified
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::domain::{CanonicalIdentity, ExtractionFailure};

    #[test]
    fn test_response_from_outcome() {
        let outcome = ResolutionOutcome {
            identified: vec![IdentifiedArtifact {
                location: "maven-remote/org/slf4j/slf4j-api/2.0.9/slf4j-api-2.0.9.jar"
                    .parse()
                    .unwrap(),
                identity: CanonicalIdentity::with_namespace(
                    Ecosystem::Maven,
                    "org.slf4j",
                    "slf4j-api",
                    "2.0.9",
                )
                .unwrap(),
            }],
            skipped: vec![SkippedArtifact {
                location: "conda-remote/numpy-1.19.2-py38_0.conda".parse().unwrap(),
                reason: ExtractionFailure::MissingParent {
                    path: "conda-remote/numpy-1.19.2-py38_0.conda".to_string(),
                },
            }],
        };

        let response = IdentifyResponse::new(ReportMetadata::generate(), outcome);
        assert!(!response.is_clean());
        assert_eq!(response.identified[0].namespace.as_deref(), Some("org.slf4j"));
        assert_eq!(
            response.identified[0].external_id,
            "maven:org.slf4j:slf4j-api:2.0.9"
        );
        assert!(response.skipped[0].reason.contains("Cannot extract architecture"));
    }

    #[test]
    fn test_view_serialization_omits_missing_namespace() {
        let view = IdentifiedView::from(IdentifiedArtifact {
            location: "pypi-remote/requests/requests-2.31.0.tar.gz".parse().unwrap(),
            identity: CanonicalIdentity::new(Ecosystem::Pypi, "requests", "2.31.0").unwrap(),
        });

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("namespace").is_none());
        assert_eq!(json["external_id"], "pypi:requests:2.31.0");
        assert_eq!(json["ecosystem"], "pypi");
    }
}
