use crate::inspection::domain::RawNotificationEvent;
use crate::ports::outbound::{
    ArtifactRecord, ArtifactRecordReader, NotificationReader, ProjectIndexEntry,
    ProjectIndexReader,
};
use crate::shared::error::InspectorError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A notification export is either a bare array or a service page with `items`
#[derive(Deserialize)]
#[serde(untagged)]
enum NotificationExport {
    Events(Vec<RawNotificationEvent>),
    Page { items: Vec<RawNotificationEvent> },
}

impl NotificationExport {
    fn into_events(self) -> Vec<RawNotificationEvent> {
        match self {
            NotificationExport::Events(events) => events,
            NotificationExport::Page { items } => items,
        }
    }
}

/// FileSystemReader adapter for reading JSON exports from the file system
///
/// This adapter implements the NotificationReader, ProjectIndexReader and
/// ArtifactRecordReader ports. Every file goes through the same safety checks
/// before it is read.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemReader {
    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn safe_read_file(&self, path: &Path, description: &str) -> Result<String> {
        validate_regular_file(path, description).map_err(|e| InspectorError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        fs::read_to_string(path).map_err(|e| {
            InspectorError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path, description: &str) -> Result<T> {
        let content = self.safe_read_file(path, description)?;
        serde_json::from_str(&content).map_err(|e| {
            InspectorError::InputParseError {
                path: path.to_path_buf(),
                description: description.to_string(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl NotificationReader for FileSystemReader {
    fn read_notifications(&self, path: &Path) -> Result<Vec<RawNotificationEvent>> {
        let export: NotificationExport = self.read_json(path, "notification batch")?;
        Ok(export.into_events())
    }
}

impl ProjectIndexReader for FileSystemReader {
    fn read_project_index(&self, path: &Path) -> Result<Vec<ProjectIndexEntry>> {
        self.read_json(path, "project index")
    }
}

impl ArtifactRecordReader for FileSystemReader {
    fn read_artifact_records(&self, path: &Path) -> Result<Vec<ArtifactRecord>> {
        self.read_json(path, "artifact metadata export")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_notifications_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "notifications.json",
            r#"[
                {
                    "type": "RULE_VIOLATION_CLEARED",
                    "projectName": "conda-remote",
                    "projectVersionName": "2024-01",
                    "content": {"componentVersionStatuses": []}
                },
                {
                    "kind": "VULNERABILITY",
                    "projectName": "conda-remote",
                    "projectVersionName": "2024-01",
                    "content": {}
                }
            ]"#,
        );

        let events = FileSystemReader::new().read_notifications(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, "RULE_VIOLATION_CLEARED");
        assert_eq!(events[1].kind, "VULNERABILITY");
    }

    #[test]
    fn test_read_notifications_page() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "page.json",
            r#"{"totalCount": 1, "items": [
                {"type": "POLICY_OVERRIDE", "projectName": "p", "projectVersionName": "v", "content": {}}
            ]}"#,
        );

        let events = FileSystemReader::new().read_notifications(&path).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "POLICY_OVERRIDE");
    }

    #[test]
    fn test_read_notifications_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileSystemReader::new()
            .read_notifications(&temp_dir.path().join("missing.json"));

        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("Failed to read file"));
    }

    #[test]
    fn test_read_notifications_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(&temp_dir, "bad.json", "{ not json");

        let result = FileSystemReader::new().read_notifications(&path);
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("Failed to parse notification batch"));
    }

    #[test]
    fn test_read_project_index() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "index.json",
            r#"[{
                "projectName": "conda-remote",
                "projectVersionName": "2024-01",
                "locations": ["conda-remote/linux-64/numpy-1.19.2-py38_0.conda"]
            }]"#,
        );

        let entries = FileSystemReader::new().read_project_index(&path).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].locations[0].repo_key(), "conda-remote");
    }

    #[test]
    fn test_read_project_index_rejects_invalid_location() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "index.json",
            r#"[{"projectName": "p", "projectVersionName": "v", "locations": [""]}]"#,
        );

        let result = FileSystemReader::new().read_project_index(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_artifact_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = write(
            &temp_dir,
            "metadata.json",
            r#"[{
                "location": "npm-remote/left-pad/-/left-pad-1.3.0.tgz",
                "properties": {"npm.name": "left-pad", "npm.version": "1.3.0"},
                "sha1": "5b8a3a7765dfe001261dde915589e782f8c94d1e"
            }]"#,
        );

        let records = FileSystemReader::new().read_artifact_records(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].properties["npm.name"], "left-pad");
        assert!(records[0].layout.is_none());
    }

    #[test]
    fn test_read_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileSystemReader::new().read_project_index(temp_dir.path());
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_symlink_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let target = write(&temp_dir, "index.json", "[]");
        let link = temp_dir.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = FileSystemReader::new().read_project_index(&link);
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("symbolic link"));
    }
}
