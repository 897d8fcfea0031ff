//! Event classifiers, one per notification kind.
//!
//! A classifier receives an event whose kind is already known, together with
//! the non-empty set of locations the event correlates to, and turns it into
//! processed records. Failures for one component never discard the records
//! built for the other components of the same event.
pub mod policy_override;
pub mod policy_violation;
pub mod rule_cleared;
pub mod vulnerability;

use crate::inspection::domain::{
    AffectedLocations, ClassificationFailure, FailureReason, NotificationKind,
    NotificationPayload, ProcessedNotification, RawNotificationEvent,
};
use crate::ports::outbound::ComponentStatusRepository;
use serde::de::DeserializeOwned;

/// Everything a classifier needs to process one event
#[derive(Clone, Copy)]
pub struct ClassificationContext<'a> {
    pub kind: NotificationKind,
    pub event_index: usize,
    pub event: &'a RawNotificationEvent,
    pub locations: &'a AffectedLocations,
    pub status: &'a dyn ComponentStatusRepository,
}

impl ClassificationContext<'_> {
    fn decode<T: DeserializeOwned>(&self) -> Result<T, FailureReason> {
        T::deserialize(&self.event.content).map_err(|e| FailureReason::MalformedPayload {
            details: e.to_string(),
        })
    }

    fn record(
        &self,
        component_name: &str,
        component_version_name: &str,
        payload: NotificationPayload,
    ) -> ProcessedNotification {
        ProcessedNotification {
            kind: self.kind,
            project_name: self.event.project_name.clone(),
            project_version_name: self.event.project_version_name.clone(),
            component_name: component_name.to_string(),
            component_version_name: component_version_name.to_string(),
            payload,
            locations: self.locations.clone(),
        }
    }

    fn failure(&self, component: Option<String>, reason: FailureReason) -> ClassificationFailure {
        ClassificationFailure {
            kind: self.kind,
            event_index: self.event_index,
            event_id: self.event.id.clone(),
            project_name: self.event.project_name.clone(),
            project_version_name: self.event.project_version_name.clone(),
            component,
            reason,
        }
    }
}

/// Records and failures produced from one event
#[derive(Debug, Default)]
pub struct ClassifierOutput {
    pub processed: Vec<ProcessedNotification>,
    pub failures: Vec<ClassificationFailure>,
}

impl ClassifierOutput {
    fn failed(failure: ClassificationFailure) -> Self {
        Self {
            processed: Vec::new(),
            failures: vec![failure],
        }
    }
}

/// Routes an event to the classifier of its kind
pub async fn classify(context: ClassificationContext<'_>) -> ClassifierOutput {
    match context.kind {
        NotificationKind::RuleViolation => policy_violation::classify(context).await,
        NotificationKind::PolicyOverride => policy_override::classify(context).await,
        NotificationKind::RuleViolationCleared => rule_cleared::classify(context),
        NotificationKind::Vulnerability => vulnerability::classify(context).await,
    }
}
