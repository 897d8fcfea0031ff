use super::{
    ArtifactLocation, NotificationKind, PolicyRuleRef, PolicyStatusReport, StatusFetchError,
    VulnerabilityReport,
};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// Non-empty set of repository locations a notification applies to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AffectedLocations(BTreeSet<ArtifactLocation>);

impl AffectedLocations {
    /// Returns `None` for an empty set; a record without locations is never built
    pub fn new(locations: BTreeSet<ArtifactLocation>) -> Option<Self> {
        if locations.is_empty() {
            None
        } else {
            Some(Self(locations))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtifactLocation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_set(&self) -> &BTreeSet<ArtifactLocation> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationPayload {
    Policy {
        #[serde(flatten)]
        report: PolicyStatusReport,
        #[serde(skip_serializing_if = "Option::is_none")]
        overridden_by: Option<String>,
    },
    RuleCleared {
        rules: BTreeSet<PolicyRuleRef>,
    },
    Vulnerability(VulnerabilityReport),
}

/// Output unit handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessedNotification {
    pub kind: NotificationKind,
    pub project_name: String,
    pub project_version_name: String,
    pub component_name: String,
    pub component_version_name: String,
    pub payload: NotificationPayload,
    pub locations: AffectedLocations,
}

impl ProcessedNotification {
    fn sort_key(&self) -> (&str, &str, NotificationKind, &str, &str) {
        (
            &self.component_name,
            &self.component_version_name,
            self.kind,
            &self.project_name,
            &self.project_version_name,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum FailureReason {
    #[error(transparent)]
    StatusFetch(#[from] StatusFetchError),

    #[error("Notification payload does not match its kind: {details}")]
    MalformedPayload { details: String },
}

/// A candidate record that could not be produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationFailure {
    pub kind: NotificationKind,
    pub event_index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    pub project_name: String,
    pub project_version_name: String,
    /// Component the failure belongs to; `None` when the whole event failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    #[serde(flatten)]
    pub reason: FailureReason,
}

/// Aggregate outcome of one reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    pub processed: Vec<ProcessedNotification>,
    pub failures: Vec<ClassificationFailure>,
    pub abandoned_events: usize,
    pub deadline_exceeded: bool,
}

impl ReconciliationReport {
    /// Puts records and failures in a deterministic order regardless of
    /// the order classification tasks completed in.
    pub fn normalize(&mut self) {
        self.processed.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        self.failures
            .sort_by(|a, b| (a.event_index, &a.component).cmp(&(b.event_index, &b.component)));
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && !self.deadline_exceeded
    }
}
