use super::Ecosystem;
use serde::Serialize;
use thiserror::Error;

/// Reasons an artifact could not be given a canonical identity.
///
/// Every variant is recoverable: the artifact is skipped and the pass goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("Failed to parse conda filename '{file_name}' to extract component details")]
    MalformedFilename { file_name: String },

    #[error(
        "Failed to parse conda filename '{file_name}' to extract component details. Likely unsupported file extension. Supported conda file extensions are {}",
        .supported.join(", ")
    )]
    UnsupportedExtension {
        file_name: String,
        supported: Vec<String>,
    },

    #[error("Artifact {path} does not have a parent folder. Cannot extract architecture")]
    MissingParent { path: String },

    #[error("Artifact {path} is missing the '{property}' property")]
    MissingMetadata { path: String, property: String },

    #[error("No composer manifest found for {path}")]
    ManifestNotFound { path: String },

    #[error("No composer manifest entry matches {path}")]
    NoMatchingManifestEntry { path: String },

    #[error("Failed to look up composer manifest for {path}: {details}")]
    ManifestLookup { path: String, details: String },

    #[error("Ecosystem '{ecosystem}' is disabled")]
    EcosystemDisabled { ecosystem: Ecosystem },

    #[error("Repository '{repo_key}' does not declare a supported package type")]
    UndeclaredEcosystem { repo_key: String },

    #[error("Extracted component {field} is empty")]
    EmptyIdentityField { field: &'static str },
}

/// A repository path that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid artifact location '{input}': {reason}")]
pub struct LocationParseError {
    pub input: String,
    pub reason: &'static str,
}

/// Failure to fetch fresh state from the intelligence service.
///
/// Cloneable so a single-flight result can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum StatusFetchError {
    #[error("Request to the intelligence service failed: {details}")]
    Transport { details: String },

    #[error("Intelligence service returned status code {status} for {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("Intelligence service returned an unreadable response: {details}")]
    MalformedResponse { details: String },

    #[error("Notification does not carry a {link} link for {component}")]
    MissingLink { link: &'static str, component: String },

    #[error("Authentication with the intelligence service failed: {details}")]
    Authentication { details: String },

    #[error("Refusing to follow link outside the intelligence service: {url}")]
    ForeignLink { url: String },
}

impl StatusFetchError {
    /// Whether another attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            StatusFetchError::Transport { .. } => true,
            StatusFetchError::UnexpectedStatus { status, .. } => {
                *status == 429 || (500..600).contains(status)
            }
            StatusFetchError::MalformedResponse { .. }
            | StatusFetchError::MissingLink { .. }
            | StatusFetchError::Authentication { .. }
            | StatusFetchError::ForeignLink { .. } => false,
        }
    }
}

/// Batch-fatal reconciliation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    #[error(
        "Unknown notification kind '{kind}' at position {index}. Supported kinds are RULE_VIOLATION, POLICY_OVERRIDE, RULE_VIOLATION_CLEARED, VULNERABILITY"
    )]
    UnknownEventKind { kind: String, index: usize },
}
