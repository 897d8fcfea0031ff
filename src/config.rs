//! Configuration file support for artifact-inspector.
//!
//! Provides YAML-based configuration through `artifact-inspector.config.yml`
//! files: data structures, file loading, validation, and conversion into the
//! plain config structs the inspection core takes.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::time::Duration;

use crate::inspection::domain::Ecosystem;
use crate::inspection::services::{ReconcileConfig, ResolverConfig};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "artifact-inspector.config.yml";

/// Environment variable holding the intelligence-service API token
pub const API_TOKEN_ENV: &str = "BLACKDUCK_API_TOKEN";

/// Longest accepted pass deadline (one week)
pub const MAX_PASS_DEADLINE_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Repository key to package type
    pub repositories: Option<BTreeMap<String, String>>,
    /// Package type to enablement flag; unlisted ecosystems are enabled
    pub ecosystems: Option<BTreeMap<String, bool>>,
    pub conda_extensions: Option<Vec<String>>,
    pub fetch_retry_count: Option<u32>,
    pub max_concurrent_events: Option<usize>,
    pub pass_deadline_seconds: Option<u64>,
    pub blackduck: Option<BlackDuckSection>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Connection settings of the component-intelligence service.
#[derive(Debug, Deserialize, Default)]
pub struct BlackDuckSection {
    pub url: Option<String>,
    pub api_token: Option<String>,
}

/// Validated settings, ready to hand to the core.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub resolver: ResolverConfig,
    pub reconcile: ReconcileConfig,
    pub pass_deadline: Option<Duration>,
    pub blackduck_url: Option<String>,
    pub blackduck_api_token: Option<String>,
}

impl Settings {
    /// Picks the API token: the environment wins over the config file.
    pub fn api_token(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|token| !token.trim().is_empty())
            .or_else(|| self.blackduck_api_token.clone())
    }
}

impl TryFrom<ConfigFile> for Settings {
    type Error = anyhow::Error;

    fn try_from(config: ConfigFile) -> Result<Self> {
        validate_config(&config)?;

        let mut resolver = ResolverConfig::default();
        for (repo_key, package_type) in config.repositories.unwrap_or_default() {
            let field = format!("repositories.{}", repo_key);
            let ecosystem = parse_package_type(&package_type, &field)?;
            resolver.repositories.insert(repo_key.trim().to_string(), ecosystem);
        }
        for (package_type, enabled) in config.ecosystems.unwrap_or_default() {
            let ecosystem = parse_package_type(&package_type, "ecosystems")?;
            if !enabled {
                resolver.disabled_ecosystems.insert(ecosystem);
            }
        }
        if let Some(extensions) = config.conda_extensions {
            resolver.conda_extensions = extensions;
        }

        let defaults = ReconcileConfig::default();
        let reconcile = ReconcileConfig {
            fetch_retry_count: config
                .fetch_retry_count
                .unwrap_or(defaults.fetch_retry_count),
            max_concurrent_events: config
                .max_concurrent_events
                .unwrap_or(defaults.max_concurrent_events),
        };

        let blackduck = config.blackduck.unwrap_or_default();
        Ok(Self {
            resolver,
            reconcile,
            pass_deadline: config.pass_deadline_seconds.map(Duration::from_secs),
            blackduck_url: blackduck.url,
            blackduck_api_token: blackduck.api_token,
        })
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<Settings> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);
    Settings::try_from(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<Settings>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    tracing::debug!(path = %config_path.display(), "Using discovered config file");
    load_config_from_path(&config_path).map(Some)
}

fn parse_package_type(package_type: &str, field: &str) -> Result<Ecosystem> {
    package_type.parse::<Ecosystem>().map_err(|e| {
        anyhow::anyhow!(
            "Invalid config: {}: {}\n\n💡 Hint: Use one of the supported package types listed above.",
            field,
            e
        )
    })
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(repositories) = &config.repositories {
        let mut seen = BTreeSet::new();
        for repo_key in repositories.keys() {
            let trimmed = repo_key.trim();
            if trimmed.is_empty() {
                bail!(
                    "Invalid config: repository keys must not be empty.\n\n\
                     💡 Hint: Each entry under 'repositories' maps a repository key (e.g., \"conda-remote\") to its package type."
                );
            }
            if !seen.insert(trimmed) {
                bail!(
                    "Invalid config: repository '{}' is declared more than once.\n\n\
                     💡 Hint: Each repository declares exactly one package type.",
                    trimmed
                );
            }
        }
    }

    if let Some(extensions) = &config.conda_extensions {
        if extensions.is_empty() {
            bail!(
                "Invalid config: conda_extensions must not be empty.\n\n\
                 💡 Hint: Remove the field to use the defaults (\".tar.bz2\", \".conda\")."
            );
        }
        for (i, extension) in extensions.iter().enumerate() {
            if extension.trim().is_empty() {
                bail!(
                    "Invalid config: conda_extensions[{}] must not be empty.\n\n\
                     💡 Hint: Extensions include the leading dot (e.g., \".conda\").",
                    i
                );
            }
        }
    }

    if config.fetch_retry_count == Some(0) {
        bail!(
            "Invalid config: fetch_retry_count must be at least 1.\n\n\
             💡 Hint: The count includes the first attempt; use 1 to disable retries."
        );
    }

    if config.max_concurrent_events == Some(0) {
        bail!(
            "Invalid config: max_concurrent_events must be at least 1.\n\n\
             💡 Hint: Use 1 to classify events one at a time."
        );
    }

    if config.pass_deadline_seconds == Some(0) {
        bail!(
            "Invalid config: pass_deadline_seconds must be at least 1.\n\n\
             💡 Hint: Remove the field to run passes without a deadline."
        );
    }

    if config
        .pass_deadline_seconds
        .is_some_and(|seconds| seconds > MAX_PASS_DEADLINE_SECONDS)
    {
        bail!(
            "Invalid config: pass_deadline_seconds must be at most {}.\n\n\
             💡 Hint: Remove the field to run passes without a deadline.",
            MAX_PASS_DEADLINE_SECONDS
        );
    }

    if let Some(url) = config.blackduck.as_ref().and_then(|b| b.url.as_deref()) {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            bail!(
                "Invalid config: blackduck.url '{}' is not an HTTP(S) URL.\n\n\
                 💡 Hint: Use the base URL of the service (e.g., \"https://blackduck.example.com\").",
                url
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        tracing::warn!(field = %key, "Unknown config field will be ignored");
    }
}
