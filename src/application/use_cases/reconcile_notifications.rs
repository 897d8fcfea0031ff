use crate::adapters::outbound::memory::InMemoryProjectIndex;
use crate::application::dto::{ReconcileRequest, ReconcileResponse, ReportMetadata};
use crate::inspection::services::{NotificationDispatcher, ReconcileConfig, RepositoryCorrelator};
use crate::ports::outbound::{
    ComponentStatusRepository, NotificationReader, ProgressReporter, ProjectIndexReader,
};
use crate::shared::error::InspectorError;
use crate::shared::Result;
use std::sync::Arc;
use tokio::time::Instant;

/// ReconcileNotificationsUseCase - runs one reconciliation pass
///
/// Loads the notification batch and the project index through their ports,
/// then hands the batch to the dispatcher.
///
/// # Type Parameters
/// * `NR` - NotificationReader implementation
/// * `IR` - ProjectIndexReader implementation
/// * `PR` - ProgressReporter implementation
pub struct ReconcileNotificationsUseCase<NR, IR, PR> {
    notification_reader: NR,
    index_reader: IR,
    status_repository: Arc<dyn ComponentStatusRepository>,
    progress_reporter: PR,
    config: ReconcileConfig,
}

impl<NR, IR, PR> ReconcileNotificationsUseCase<NR, IR, PR>
where
    NR: NotificationReader,
    IR: ProjectIndexReader,
    PR: ProgressReporter,
{
    pub fn new(
        notification_reader: NR,
        index_reader: IR,
        status_repository: Arc<dyn ComponentStatusRepository>,
        progress_reporter: PR,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            notification_reader,
            index_reader,
            status_repository,
            progress_reporter,
            config,
        }
    }

    /// Executes the pass.
    ///
    /// The deadline in the request is measured from the start of this call.
    ///
    /// # Errors
    /// Returns an error if an input cannot be read or the batch contains an
    /// unknown notification kind. Per-component failures are in the response.
    pub async fn execute(&self, request: ReconcileRequest) -> Result<ReconcileResponse> {
        let deadline = match request.deadline {
            Some(budget) => Some(Instant::now().checked_add(budget).ok_or_else(|| {
                InspectorError::Validation {
                    message: format!(
                        "Deadline of {} seconds is out of range; use a shorter deadline or none",
                        budget.as_secs()
                    ),
                }
            })?),
            None => None,
        };
        let metadata = ReportMetadata::generate();

        self.progress_reporter.report(&format!(
            "📖 Loading notifications from: {}",
            request.notifications_path.display()
        ));
        let batch = self
            .notification_reader
            .read_notifications(&request.notifications_path)?;

        self.progress_reporter.report(&format!(
            "📖 Loading project index from: {}",
            request.index_path.display()
        ));
        let entries = self.index_reader.read_project_index(&request.index_path)?;
        let index = InMemoryProjectIndex::from_entries(entries);
        self.progress_reporter.report(&format!(
            "✅ Loaded {} notification(s) and {} project version(s)",
            batch.len(),
            index.len()
        ));

        let dispatcher = NotificationDispatcher::new(
            RepositoryCorrelator::new(Arc::new(index)),
            Arc::clone(&self.status_repository),
            self.config,
        );

        self.progress_reporter.report("🔍 Reconciling notifications...");
        let report = dispatcher.process(&batch, deadline).await?;

        if report.deadline_exceeded {
            self.progress_reporter.report_error(&format!(
                "⚠️  Deadline expired: {} event(s) abandoned",
                report.abandoned_events
            ));
        }
        if !report.failures.is_empty() {
            self.progress_reporter.report_error(&format!(
                "⚠️  {} component(s) could not be classified",
                report.failures.len()
            ));
        }
        self.progress_reporter.report_completion(&format!(
            "✅ Reconciled {} record(s) from {} notification(s)",
            report.processed.len(),
            batch.len()
        ));

        Ok(ReconcileResponse::new(metadata, batch.len(), report))
    }
}
