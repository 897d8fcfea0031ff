use crate::inspection::domain::ArtifactLocation;
use crate::ports::outbound::{ComposerManifest, ComposerManifestLocator};
use crate::shared::error::InspectorError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE_NAME: &str = "packages.json";

/// MirrorManifestLocator adapter for composer manifests in a local mirror
///
/// The mirror keeps the repository layout under `root`: the item
/// `repo/vendor/pkg/abc123.zip` lives at `root/repo/vendor/pkg/abc123.zip`.
/// Manifests are looked up in the item's folder first, then in each enclosing
/// folder up to the repository root.
pub struct MirrorManifestLocator {
    root: PathBuf,
}

impl MirrorManifestLocator {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn candidate_dirs(&self, location: &ArtifactLocation) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        let mut folder = location.parent();
        while let Some(current) = folder {
            let mut dir = self.root.join(current.repo_key());
            dir.extend(current.segments());
            dirs.push(dir);
            folder = current.parent();
        }
        dirs
    }

    fn read_manifest(&self, path: &Path) -> Result<ComposerManifest> {
        validate_regular_file(path, "composer manifest").map_err(|e| {
            InspectorError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;
        let content = fs::read_to_string(path).map_err(|e| InspectorError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| {
            InspectorError::InputParseError {
                path: path.to_path_buf(),
                description: "composer manifest".to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl ComposerManifestLocator for MirrorManifestLocator {
    fn locate(&self, location: &ArtifactLocation) -> Result<Vec<ComposerManifest>> {
        let mut manifests = Vec::new();
        for dir in self.candidate_dirs(location) {
            let path = dir.join(MANIFEST_FILE_NAME);
            if fs::symlink_metadata(&path).is_err() {
                continue;
            }
            tracing::debug!(path = %path.display(), artifact = %location, "Reading composer manifest");
            manifests.push(self.read_manifest(&path)?);
        }
        Ok(manifests)
    }
}
