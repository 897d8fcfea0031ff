use super::ReportMetadata;
use crate::inspection::domain::ReconciliationReport;
use serde::Serialize;

/// ReconcileResponse - result of one reconciliation pass
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub metadata: ReportMetadata,
    /// Number of events in the batch
    pub events: usize,
    #[serde(flatten)]
    pub report: ReconciliationReport,
}

impl ReconcileResponse {
    pub fn new(metadata: ReportMetadata, events: usize, report: ReconciliationReport) -> Self {
        Self {
            metadata,
            events,
            report,
        }
    }

    /// True when nothing failed and the deadline was not hit
    pub fn is_clean(&self) -> bool {
        self.report.is_clean()
    }
}
