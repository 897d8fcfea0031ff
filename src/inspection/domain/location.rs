use super::LocationParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Path to one item in the artifact repository.
///
/// Written as `repo-key/path/to/item` (or `repo-key:path/to/item`). A location
/// with no path segments is the repository root. Segments are kept verbatim,
/// whitespace included; consumers trim where their ecosystem requires it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArtifactLocation {
    repo_key: String,
    segments: Vec<String>,
}

impl ArtifactLocation {
    pub fn new(repo_key: impl Into<String>, path: &str) -> Result<Self, LocationParseError> {
        let repo_key = repo_key.into();
        if repo_key.trim().is_empty() {
            return Err(LocationParseError {
                input: format!("{}/{}", repo_key, path),
                reason: "repository key is empty",
            });
        }
        if repo_key.contains(|c| c == '/' || c == ':') {
            return Err(LocationParseError {
                input: format!("{}/{}", repo_key, path),
                reason: "repository key contains '/' or ':'",
            });
        }

        let segments = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(String::from)
            .collect();

        Ok(Self { repo_key, segments })
    }

    /// The root of a repository
    pub fn repository_root(repo_key: impl Into<String>) -> Result<Self, LocationParseError> {
        Self::new(repo_key, "")
    }

    pub fn repo_key(&self) -> &str {
        &self.repo_key
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path inside the repository, without the repository key
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Last path segment, `None` for the repository root
    pub fn file_name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Name of the folder directly containing this item.
    ///
    /// Items sitting at the repository root have no parent folder.
    pub fn parent_folder_name(&self) -> Option<&str> {
        let len = self.segments.len();
        if len < 2 {
            return None;
        }
        Some(self.segments[len - 2].as_str())
    }

    /// The folder directly containing this item, as a location
    pub fn parent(&self) -> Option<ArtifactLocation> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            repo_key: self.repo_key.clone(),
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn is_repository_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for ArtifactLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "{}", self.repo_key)
        } else {
            write!(f, "{}/{}", self.repo_key, self.segments.join("/"))
        }
    }
}

impl FromStr for ArtifactLocation {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let separator = s.find(|c| c == ':' || c == '/');
        let (repo_key, path) = match separator {
            Some(idx) => (&s[..idx], &s[idx + 1..]),
            None => (s, ""),
        };

        if repo_key.trim().is_empty() {
            return Err(LocationParseError {
                input: s.to_string(),
                reason: "repository key is empty",
            });
        }

        Self::new(repo_key, path)
    }
}

impl TryFrom<String> for ArtifactLocation {
    type Error = LocationParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArtifactLocation> for String {
    fn from(value: ArtifactLocation) -> Self {
        value.to_string()
    }
}
