use crate::inspection::domain::{ArtifactLocation, CanonicalIdentity, Ecosystem, ExtractionFailure};
use crate::inspection::extractors::{self, ExtractionContext, DEFAULT_CONDA_EXTENSIONS};
use crate::ports::outbound::{ArtifactMetadataReader, ComposerManifestLocator};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Settings of the identity resolver, validated before they get here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Declared package type of each repository, by repository key
    pub repositories: HashMap<String, Ecosystem>,
    pub disabled_ecosystems: BTreeSet<Ecosystem>,
    /// Conda archive extensions in match order
    pub conda_extensions: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            repositories: HashMap::new(),
            disabled_ecosystems: BTreeSet::new(),
            conda_extensions: DEFAULT_CONDA_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl ResolverConfig {
    pub fn is_enabled(&self, ecosystem: Ecosystem) -> bool {
        !self.disabled_ecosystems.contains(&ecosystem)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifiedArtifact {
    pub location: ArtifactLocation,
    pub identity: CanonicalIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedArtifact {
    pub location: ArtifactLocation,
    pub reason: ExtractionFailure,
}

/// Result of resolving a batch of artifacts; skips never abort the batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionOutcome {
    pub identified: Vec<IdentifiedArtifact>,
    pub skipped: Vec<SkippedArtifact>,
}

impl ResolutionOutcome {
    /// Appends another outcome, keeping input order
    pub fn merge(&mut self, other: ResolutionOutcome) {
        self.identified.extend(other.identified);
        self.skipped.extend(other.skipped);
    }
}

/// IdentityResolver - picks the extractor for an artifact and runs it
///
/// The extractor is chosen strictly by the ecosystem declared for the
/// artifact's repository. A failing extractor skips the artifact; no other
/// ecosystem is tried.
pub struct IdentityResolver {
    config: ResolverConfig,
    metadata: Arc<dyn ArtifactMetadataReader>,
    manifests: Arc<dyn ComposerManifestLocator>,
}

impl IdentityResolver {
    pub fn new(
        config: ResolverConfig,
        metadata: Arc<dyn ArtifactMetadataReader>,
        manifests: Arc<dyn ComposerManifestLocator>,
    ) -> Self {
        Self {
            config,
            metadata,
            manifests,
        }
    }

    /// Resolves an artifact using the ecosystem declared for its repository
    pub fn resolve(
        &self,
        location: &ArtifactLocation,
    ) -> Result<CanonicalIdentity, ExtractionFailure> {
        let ecosystem = self
            .config
            .repositories
            .get(location.repo_key())
            .copied()
            .ok_or_else(|| ExtractionFailure::UndeclaredEcosystem {
                repo_key: location.repo_key().to_string(),
            })?;
        self.resolve_declared(ecosystem, location)
    }

    /// Resolves an artifact with an explicitly declared ecosystem
    pub fn resolve_declared(
        &self,
        ecosystem: Ecosystem,
        location: &ArtifactLocation,
    ) -> Result<CanonicalIdentity, ExtractionFailure> {
        if !self.config.is_enabled(ecosystem) {
            return Err(ExtractionFailure::EcosystemDisabled { ecosystem });
        }

        let context = ExtractionContext {
            metadata: self.metadata.as_ref(),
            manifests: self.manifests.as_ref(),
            conda_extensions: &self.config.conda_extensions,
        };
        extractors::extract(ecosystem, location, context)
    }

    /// Resolves every location, collecting identities and skips separately.
    ///
    /// When `declared` is given it overrides the per-repository declaration
    /// for the whole batch.
    pub fn resolve_all(
        &self,
        locations: impl IntoIterator<Item = ArtifactLocation>,
        declared: Option<Ecosystem>,
    ) -> ResolutionOutcome {
        let mut outcome = ResolutionOutcome::default();

        for location in locations {
            let result = match declared {
                Some(ecosystem) => self.resolve_declared(ecosystem, &location),
                None => self.resolve(&location),
            };

            match result {
                Ok(identity) => {
                    tracing::debug!(path = %location, external_id = %identity, "Identified artifact");
                    outcome.identified.push(IdentifiedArtifact { location, identity });
                }
                Err(reason) => {
                    tracing::info!(
                        path = %location,
                        "Failed to extract component identity, skipping artifact"
                    );
                    tracing::debug!(path = %location, reason = %reason, "Extraction failure");
                    outcome.skipped.push(SkippedArtifact { location, reason });
                }
            }
        }

        outcome
    }
}
