use super::PolicyInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Approval status of a component-version as reported by the intelligence service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicySummaryStatus {
    InViolation,
    InViolationOverridden,
    NotInViolation,
}

impl PolicySummaryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicySummaryStatus::InViolation => "IN_VIOLATION",
            PolicySummaryStatus::InViolationOverridden => "IN_VIOLATION_OVERRIDDEN",
            PolicySummaryStatus::NotInViolation => "NOT_IN_VIOLATION",
        }
    }
}

impl fmt::Display for PolicySummaryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy rule severity, declared most severe first so `Ord` sorts that way
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PolicySeverity {
    Blocker,
    Critical,
    Major,
    Minor,
    Trivial,
    Unspecified,
}

impl PolicySeverity {
    /// Maps the service's severity string; anything missing or unknown is `Unspecified`
    pub fn from_service_str(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_uppercase()).as_deref() {
            Some("BLOCKER") => PolicySeverity::Blocker,
            Some("CRITICAL") => PolicySeverity::Critical,
            Some("MAJOR") => PolicySeverity::Major,
            Some("MINOR") => PolicySeverity::Minor,
            Some("TRIVIAL") => PolicySeverity::Trivial,
            _ => PolicySeverity::Unspecified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicySeverity::Blocker => "BLOCKER",
            PolicySeverity::Critical => "CRITICAL",
            PolicySeverity::Major => "MAJOR",
            PolicySeverity::Minor => "MINOR",
            PolicySeverity::Trivial => "TRIVIAL",
            PolicySeverity::Unspecified => "UNSPECIFIED",
        }
    }
}

impl fmt::Display for PolicySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated policy state for one component-version.
///
/// The status is always the value fetched at processing time; severities come
/// from the rules named in the event and are deduplicated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyStatusReport {
    pub status: PolicySummaryStatus,
    pub severities: BTreeSet<PolicySeverity>,
}

impl PolicyStatusReport {
    pub fn new(status: PolicySummaryStatus, severities: BTreeSet<PolicySeverity>) -> Self {
        Self { status, severities }
    }

    pub fn from_policy_infos(status: PolicySummaryStatus, policy_infos: &[PolicyInfo]) -> Self {
        let severities = policy_infos
            .iter()
            .map(|info| PolicySeverity::from_service_str(info.severity.as_deref()))
            .collect();
        Self::new(status, severities)
    }

    /// Most severe rule, if any rule was named
    pub fn highest_severity(&self) -> Option<PolicySeverity> {
        self.severities.iter().next().copied()
    }
}

/// A cleared policy rule, carried directly by the event
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PolicyRuleRef {
    pub name: String,
    pub severity: PolicySeverity,
}

impl From<&PolicyInfo> for PolicyRuleRef {
    fn from(info: &PolicyInfo) -> Self {
        Self {
            name: info.policy_name.clone(),
            severity: PolicySeverity::from_service_str(info.severity.as_deref()),
        }
    }
}
