use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package ecosystem declared on a repository.
///
/// Ecosystems are a mutually exclusive classification: an artifact is
/// identified only by the extractor of the ecosystem its repository declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Ecosystem {
    Bower,
    Cocoapods,
    Composer,
    Conda,
    Cran,
    Gems,
    Go,
    Gradle,
    Maven,
    Npm,
    Nuget,
    Pypi,
}

/// How the identity of an artifact is encoded for a given ecosystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Name and version are encoded in the filename (conda archives)
    FileNameConvention,
    /// Name and version are recorded as properties on the artifact
    ArtifactMetadata {
        name_property: &'static str,
        version_property: &'static str,
    },
    /// Organisation, module and revision come from the repository layout
    BuildLayout,
    /// Identity lives in a manifest published next to the artifact (composer)
    ComposerManifest,
}

impl Ecosystem {
    pub const ALL: [Ecosystem; 12] = [
        Ecosystem::Bower,
        Ecosystem::Cocoapods,
        Ecosystem::Composer,
        Ecosystem::Conda,
        Ecosystem::Cran,
        Ecosystem::Gems,
        Ecosystem::Go,
        Ecosystem::Gradle,
        Ecosystem::Maven,
        Ecosystem::Npm,
        Ecosystem::Nuget,
        Ecosystem::Pypi,
    ];

    /// Repository package-type tag
    pub fn tag(self) -> &'static str {
        match self {
            Ecosystem::Bower => "bower",
            Ecosystem::Cocoapods => "cocoapods",
            Ecosystem::Composer => "composer",
            Ecosystem::Conda => "conda",
            Ecosystem::Cran => "cran",
            Ecosystem::Gems => "gems",
            Ecosystem::Go => "go",
            Ecosystem::Gradle => "gradle",
            Ecosystem::Maven => "maven",
            Ecosystem::Npm => "npm",
            Ecosystem::Nuget => "nuget",
            Ecosystem::Pypi => "pypi",
        }
    }

    /// Forge the intelligence service indexes this ecosystem under
    pub fn forge(self) -> &'static str {
        match self {
            Ecosystem::Bower => "bower",
            Ecosystem::Cocoapods => "cocoapods",
            Ecosystem::Composer => "packagist",
            Ecosystem::Conda => "anaconda",
            Ecosystem::Cran => "cran",
            Ecosystem::Gems => "rubygems",
            Ecosystem::Go => "golang",
            Ecosystem::Gradle | Ecosystem::Maven => "maven",
            Ecosystem::Npm => "npmjs",
            Ecosystem::Nuget => "nuget",
            Ecosystem::Pypi => "pypi",
        }
    }

    pub fn strategy(self) -> ExtractionStrategy {
        let metadata = |name_property, version_property| ExtractionStrategy::ArtifactMetadata {
            name_property,
            version_property,
        };

        match self {
            Ecosystem::Conda => ExtractionStrategy::FileNameConvention,
            Ecosystem::Composer => ExtractionStrategy::ComposerManifest,
            Ecosystem::Gradle | Ecosystem::Maven => ExtractionStrategy::BuildLayout,
            Ecosystem::Bower => metadata("bower.name", "bower.version"),
            Ecosystem::Cocoapods => metadata("pods.name", "pods.version"),
            Ecosystem::Cran => metadata("cran.name", "cran.version"),
            Ecosystem::Gems => metadata("gem.name", "gem.version"),
            Ecosystem::Go => metadata("go.name", "go.version"),
            Ecosystem::Npm => metadata("npm.name", "npm.version"),
            Ecosystem::Nuget => metadata("nuget.id", "nuget.version"),
            Ecosystem::Pypi => metadata("pypi.name", "pypi.version"),
        }
    }

    fn supported_tags() -> String {
        Self::ALL
            .iter()
            .map(|e| e.tag())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Ecosystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|e| e.tag() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unsupported package type: '{}'. Supported package types are {}",
                    s,
                    Self::supported_tags()
                )
            })
    }
}

impl TryFrom<String> for Ecosystem {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Ecosystem> for String {
    fn from(value: Ecosystem) -> Self {
        value.tag().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(Ecosystem::from_str("conda").unwrap(), Ecosystem::Conda);
        assert_eq!(Ecosystem::from_str("CONDA").unwrap(), Ecosystem::Conda);
        assert_eq!(Ecosystem::from_str(" Npm ").unwrap(), Ecosystem::Npm);
    }

    #[test]
    fn test_from_str_unknown_lists_supported_tags() {
        let err = Ecosystem::from_str("docker").unwrap_err();
        assert!(err.contains("docker"));
        assert!(err.contains("conda"));
        assert!(err.contains("pypi"));
    }

    #[test]
    fn test_tag_round_trips_for_every_variant() {
        for ecosystem in Ecosystem::ALL {
            assert_eq!(Ecosystem::from_str(ecosystem.tag()).unwrap(), ecosystem);
        }
    }

    #[test]
    fn test_strategies() {
        assert_eq!(
            Ecosystem::Conda.strategy(),
            ExtractionStrategy::FileNameConvention
        );
        assert_eq!(
            Ecosystem::Composer.strategy(),
            ExtractionStrategy::ComposerManifest
        );
        assert_eq!(Ecosystem::Gradle.strategy(), ExtractionStrategy::BuildLayout);
        assert_eq!(
            Ecosystem::Nuget.strategy(),
            ExtractionStrategy::ArtifactMetadata {
                name_property: "nuget.id",
                version_property: "nuget.version",
            }
        );
    }

    #[test]
    fn test_forges() {
        assert_eq!(Ecosystem::Conda.forge(), "anaconda");
        assert_eq!(Ecosystem::Composer.forge(), "packagist");
        assert_eq!(Ecosystem::Gradle.forge(), Ecosystem::Maven.forge());
    }

    #[test]
    fn test_serde_uses_tag() {
        let json = serde_json::to_string(&Ecosystem::Gems).unwrap();
        assert_eq!(json, "\"gems\"");
        let parsed: Ecosystem = serde_json::from_str("\"PyPI\"").unwrap();
        assert_eq!(parsed, Ecosystem::Pypi);
    }
}
