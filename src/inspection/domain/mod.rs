pub mod ecosystem;
pub mod errors;
pub mod identity;
pub mod location;
pub mod notification;
pub mod policy;
pub mod processed;
pub mod vulnerability;

pub use ecosystem::{Ecosystem, ExtractionStrategy};
pub use errors::{ExtractionFailure, LocationParseError, ReconcileError, StatusFetchError};
pub use identity::CanonicalIdentity;
pub use location::ArtifactLocation;
pub use notification::{
    ComponentRef, ComponentVersionStatus, NotificationKind, PolicyInfo, PolicyOverrideContent,
    RawNotificationEvent, RuleViolationClearedContent, RuleViolationContent,
    VulnerabilityContent, VulnerabilitySourceQualifiedId,
};
pub use policy::{PolicyRuleRef, PolicySeverity, PolicyStatusReport, PolicySummaryStatus};
pub use processed::{
    AffectedLocations, ClassificationFailure, FailureReason, NotificationPayload,
    ProcessedNotification, ReconciliationReport,
};
pub use vulnerability::{VulnerabilityAggregate, VulnerabilityReport, VulnerabilitySeverity};
