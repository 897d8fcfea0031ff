use crate::adapters::outbound::memory::StaticArtifactMetadata;
use crate::application::dto::{IdentifyRequest, IdentifyResponse, ReportMetadata};
use crate::inspection::services::{IdentityResolver, ResolutionOutcome, ResolverConfig};
use crate::ports::outbound::{ArtifactRecordReader, ComposerManifestLocator, ProgressReporter};
use crate::shared::Result;
use std::sync::Arc;

/// IdentifyArtifactsUseCase - resolves canonical identities for artifacts
///
/// # Type Parameters
/// * `RR` - ArtifactRecordReader implementation
/// * `PR` - ProgressReporter implementation
pub struct IdentifyArtifactsUseCase<RR, PR> {
    record_reader: RR,
    manifests: Arc<dyn ComposerManifestLocator>,
    progress_reporter: PR,
    config: ResolverConfig,
}

impl<RR, PR> IdentifyArtifactsUseCase<RR, PR>
where
    RR: ArtifactRecordReader,
    PR: ProgressReporter,
{
    pub fn new(
        record_reader: RR,
        manifests: Arc<dyn ComposerManifestLocator>,
        progress_reporter: PR,
        config: ResolverConfig,
    ) -> Self {
        Self {
            record_reader,
            manifests,
            progress_reporter,
            config,
        }
    }

    /// Executes the identification run
    ///
    /// Artifacts that cannot be identified are listed as skipped; they never
    /// fail the run.
    ///
    /// # Errors
    /// Returns an error only if the metadata export cannot be read
    pub fn execute(&self, request: IdentifyRequest) -> Result<IdentifyResponse> {
        let metadata = ReportMetadata::generate();
        let store = self.load_metadata(&request)?;

        let resolver = IdentityResolver::new(
            self.config.clone(),
            Arc::new(store),
            Arc::clone(&self.manifests),
        );

        let total = request.locations.len();
        self.progress_reporter
            .report(&format!("🔍 Identifying {} artifact(s)...", total));

        let mut outcome = ResolutionOutcome::default();
        for (index, location) in request.locations.into_iter().enumerate() {
            let message = location.file_name().map(str::to_string);
            outcome.merge(resolver.resolve_all([location], request.ecosystem));
            self.progress_reporter
                .report_progress(index + 1, total, message.as_deref());
        }

        if !outcome.skipped.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Skipped {} artifact(s) that could not be identified",
                outcome.skipped.len()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Identified {} of {} artifact(s)",
            outcome.identified.len(),
            total
        ));

        Ok(IdentifyResponse::new(metadata, outcome))
    }

    fn load_metadata(&self, request: &IdentifyRequest) -> Result<StaticArtifactMetadata> {
        let Some(path) = &request.metadata_path else {
            return Ok(StaticArtifactMetadata::new());
        };

        self.progress_reporter.report(&format!(
            "📖 Loading artifact metadata from: {}",
            path.display()
        ));
        let records = self.record_reader.read_artifact_records(path)?;
        let store = StaticArtifactMetadata::from_records(records);
        self.progress_reporter
            .report(&format!("✅ Loaded metadata for {} artifact(s)", store.len()));
        Ok(store)
    }
}
