use super::VulnerabilitySourceQualifiedId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Vulnerability scoring bucket, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VulnerabilitySeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl fmt::Display for VulnerabilitySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VulnerabilitySeverity::Critical => "CRITICAL",
            VulnerabilitySeverity::High => "HIGH",
            VulnerabilitySeverity::Medium => "MEDIUM",
            VulnerabilitySeverity::Low => "LOW",
        };
        f.write_str(s)
    }
}

/// Vulnerability counts per severity for one component-version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityAggregate {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl VulnerabilityAggregate {
    pub fn new(critical: u32, high: u32, medium: u32, low: u32) -> Self {
        Self {
            critical,
            high,
            medium,
            low,
        }
    }

    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }

    pub fn highest_severity(&self) -> Option<VulnerabilitySeverity> {
        if self.critical > 0 {
            Some(VulnerabilitySeverity::Critical)
        } else if self.high > 0 {
            Some(VulnerabilitySeverity::High)
        } else if self.medium > 0 {
            Some(VulnerabilitySeverity::Medium)
        } else if self.low > 0 {
            Some(VulnerabilitySeverity::Low)
        } else {
            None
        }
    }
}

/// Fresh vulnerability state plus the identifiers the event reported as changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VulnerabilityReport {
    pub aggregate: VulnerabilityAggregate,
    pub new_ids: BTreeSet<VulnerabilitySourceQualifiedId>,
    pub updated_ids: BTreeSet<VulnerabilitySourceQualifiedId>,
    pub deleted_ids: BTreeSet<VulnerabilitySourceQualifiedId>,
}

impl VulnerabilityReport {
    pub fn highest_severity(&self) -> Option<VulnerabilitySeverity> {
        self.aggregate.highest_severity()
    }
}
