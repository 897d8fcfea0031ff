use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notification kinds the reconciliation core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    RuleViolation,
    PolicyOverride,
    RuleViolationCleared,
    Vulnerability,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::RuleViolation => "RULE_VIOLATION",
            NotificationKind::PolicyOverride => "POLICY_OVERRIDE",
            NotificationKind::RuleViolationCleared => "RULE_VIOLATION_CLEARED",
            NotificationKind::Vulnerability => "VULNERABILITY",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RULE_VIOLATION" | "VIOLATION" => Ok(NotificationKind::RuleViolation),
            "POLICY_OVERRIDE" | "OVERRIDE" => Ok(NotificationKind::PolicyOverride),
            "RULE_VIOLATION_CLEARED" | "CLEARED" => Ok(NotificationKind::RuleViolationCleared),
            "VULNERABILITY" => Ok(NotificationKind::Vulnerability),
            _ => Err(format!("Unknown notification kind: {}", s)),
        }
    }
}

/// One undifferentiated event from the intelligence service.
///
/// The kind is kept as the producer sent it; it is only interpreted by the
/// dispatcher, so schema drift surfaces there instead of at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNotificationEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(alias = "type")]
    pub kind: String,
    pub project_name: String,
    pub project_version_name: String,
    #[serde(default)]
    pub content: serde_json::Value,
}

impl RawNotificationEvent {
    pub fn new(
        kind: impl Into<String>,
        project_name: impl Into<String>,
        project_version_name: impl Into<String>,
        content: serde_json::Value,
    ) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            project_name: project_name.into(),
            project_version_name: project_version_name.into(),
            content,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Component entry inside violation / cleared payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentVersionStatus {
    pub component_name: String,
    pub component_version_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom_component_version_policy_status: Option<String>,
}

/// Policy rule referenced by a policy payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,
    pub policy_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleViolationContent {
    #[serde(default)]
    pub component_version_statuses: Vec<ComponentVersionStatus>,
    #[serde(default)]
    pub policy_infos: Vec<PolicyInfo>,
}

/// Same shape as a violation; the policy infos name the rules that were cleared
pub type RuleViolationClearedContent = RuleViolationContent;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOverrideContent {
    pub component_name: String,
    pub component_version_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom_component_version_policy_status: Option<String>,
    #[serde(default)]
    pub policy_infos: Vec<PolicyInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilitySourceQualifiedId {
    pub source: String,
    pub vulnerability_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VulnerabilityContent {
    pub component_name: String,
    pub version_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bom_component: Option<String>,
    #[serde(default)]
    pub new_vulnerability_ids: Vec<VulnerabilitySourceQualifiedId>,
    #[serde(default)]
    pub updated_vulnerability_ids: Vec<VulnerabilitySourceQualifiedId>,
    #[serde(default)]
    pub deleted_vulnerability_ids: Vec<VulnerabilitySourceQualifiedId>,
}

/// A component-version whose fresh state is fetched from the intelligence service.
///
/// `link` is the service URL the state is read from (the BOM policy status for
/// policy fetches, the BOM component for vulnerability fetches).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentRef {
    pub component_name: String,
    pub component_version_name: String,
    pub link: Option<String>,
}

impl ComponentRef {
    pub fn new(
        component_name: impl Into<String>,
        component_version_name: impl Into<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            component_version_name: component_version_name.into(),
            link,
        }
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.component_name, self.component_version_name)
    }
}

impl From<&ComponentVersionStatus> for ComponentRef {
    fn from(status: &ComponentVersionStatus) -> Self {
        Self::new(
            status.component_name.clone(),
            status.component_version_name.clone(),
            status.bom_component_version_policy_status.clone(),
        )
    }
}
