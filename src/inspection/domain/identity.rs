use super::{Ecosystem, ExtractionFailure};
use serde::Serialize;
use std::fmt;

/// A component as the intelligence service knows it.
///
/// Name and version are never empty. Build-layout ecosystems (maven, gradle)
/// also carry a namespace (the group/organisation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalIdentity {
    ecosystem: Ecosystem,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    name: String,
    version: String,
}

impl CanonicalIdentity {
    pub fn new(
        ecosystem: Ecosystem,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ExtractionFailure> {
        let name = name.into();
        let version = version.into();
        if name.trim().is_empty() {
            return Err(ExtractionFailure::EmptyIdentityField { field: "name" });
        }
        if version.trim().is_empty() {
            return Err(ExtractionFailure::EmptyIdentityField { field: "version" });
        }

        Ok(Self {
            ecosystem,
            namespace: None,
            name,
            version,
        })
    }

    pub fn with_namespace(
        ecosystem: Ecosystem,
        namespace: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self, ExtractionFailure> {
        let namespace = namespace.into();
        if namespace.trim().is_empty() {
            return Err(ExtractionFailure::EmptyIdentityField { field: "namespace" });
        }
        let mut identity = Self::new(ecosystem, name, version)?;
        identity.namespace = Some(namespace);
        Ok(identity)
    }

    pub fn ecosystem(&self) -> Ecosystem {
        self.ecosystem
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Forge-qualified identifier, e.g. `anaconda:numpy:1.19.2-py38_0-linux-64`
    pub fn external_id(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!(
                "{}:{}:{}:{}",
                self.ecosystem.forge(),
                namespace,
                self.name,
                self.version
            ),
            None => format!("{}:{}:{}", self.ecosystem.forge(), self.name, self.version),
        }
    }
}

impl fmt::Display for CanonicalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.external_id())
    }
}
