use super::classifiers::{self, ClassificationContext};
use super::{RepositoryCorrelator, SingleFlightStatusCache};
use crate::inspection::domain::{
    AffectedLocations, NotificationKind, RawNotificationEvent, ReconcileError,
    ReconciliationReport,
};
use crate::ports::outbound::ComponentStatusRepository;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tokio::time::Instant;

/// Settings of a reconciliation pass, validated before they get here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Attempts per status fetch, first attempt included
    pub fetch_retry_count: u32,
    pub max_concurrent_events: usize,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            fetch_retry_count: 3,
            max_concurrent_events: 8,
        }
    }
}

/// NotificationDispatcher - entry point of a reconciliation pass
///
/// Routes each event to the classifier of its kind and aggregates what they
/// produce. Per-component failures are collected in the report; only an
/// unknown event kind fails the whole batch.
pub struct NotificationDispatcher {
    correlator: RepositoryCorrelator,
    status: Arc<dyn ComponentStatusRepository>,
    config: ReconcileConfig,
}

impl NotificationDispatcher {
    pub fn new(
        correlator: RepositoryCorrelator,
        status: Arc<dyn ComponentStatusRepository>,
        config: ReconcileConfig,
    ) -> Self {
        Self {
            correlator,
            status,
            config,
        }
    }

    /// Processes one batch.
    ///
    /// The batch is checked for unknown kinds before any event is classified.
    /// When `deadline` passes, events still in flight are abandoned and the
    /// records completed so far are returned.
    pub async fn process(
        &self,
        batch: &[RawNotificationEvent],
        deadline: Option<Instant>,
    ) -> Result<ReconciliationReport, ReconcileError> {
        let kinds = validate_kinds(batch)?;
        tracing::info!(events = batch.len(), "Reconciling notifications");

        type Work<'a> = (usize, NotificationKind, &'a RawNotificationEvent, AffectedLocations);
        let work: Vec<Work<'_>> = batch
            .iter()
            .zip(kinds)
            .enumerate()
            .filter_map(|(index, (event, kind))| {
                let locations = self
                    .correlator
                    .find_locations(&event.project_name, &event.project_version_name);
                AffectedLocations::new(locations).map(|locations| (index, kind, event, locations))
            })
            .collect();
        let pending = work.len();

        let cache =
            SingleFlightStatusCache::new(self.status.clone(), self.config.fetch_retry_count);
        let cache = &cache;
        let mut outputs = stream::iter(work)
            .map(|(event_index, kind, event, locations)| async move {
                classifiers::classify(ClassificationContext {
                    kind,
                    event_index,
                    event,
                    locations: &locations,
                    status: cache,
                })
                .await
            })
            .buffer_unordered(self.config.max_concurrent_events.max(1));

        let mut report = ReconciliationReport::default();
        let mut completed = 0;
        loop {
            let next = match deadline {
                Some(deadline) => match tokio::time::timeout_at(deadline, outputs.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        report.deadline_exceeded = true;
                        report.abandoned_events = pending - completed;
                        tracing::warn!(
                            abandoned = report.abandoned_events,
                            "Reconciliation deadline expired, returning partial result"
                        );
                        break;
                    }
                },
                None => outputs.next().await,
            };

            let Some(output) = next else {
                break;
            };
            completed += 1;
            report.processed.extend(output.processed);
            report.failures.extend(output.failures);
        }

        for failure in &report.failures {
            tracing::warn!(
                kind = %failure.kind,
                project = %failure.project_name,
                version = %failure.project_version_name,
                component = failure.component.as_deref().unwrap_or("-"),
                reason = %failure.reason,
                "Failed to classify notification"
            );
        }

        report.normalize();
        tracing::info!(
            processed = report.processed.len(),
            failures = report.failures.len(),
            "Reconciliation pass finished"
        );
        Ok(report)
    }
}

fn validate_kinds(
    batch: &[RawNotificationEvent],
) -> Result<Vec<NotificationKind>, ReconcileError> {
    batch
        .iter()
        .enumerate()
        .map(|(index, event)| {
            event.kind.parse::<NotificationKind>().map_err(|_| {
                tracing::error!(kind = %event.kind, index, "Unknown notification kind in batch");
                ReconcileError::UnknownEventKind {
                    kind: event.kind.clone(),
                    index,
                }
            })
        })
        .collect()
}
