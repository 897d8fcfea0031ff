use artifact_inspector::ports::outbound::ProjectIndexEntry;
use artifact_inspector::prelude::*;
use std::path::Path;

/// Mock NotificationReader for testing
pub struct MockNotificationReader {
    pub events: Vec<RawNotificationEvent>,
    pub should_fail: bool,
}

impl MockNotificationReader {
    pub fn new(events: Vec<RawNotificationEvent>) -> Self {
        Self {
            events,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            events: Vec::new(),
            should_fail: true,
        }
    }
}

impl NotificationReader for MockNotificationReader {
    fn read_notifications(&self, _path: &Path) -> Result<Vec<RawNotificationEvent>> {
        if self.should_fail {
            anyhow::bail!("Mock notification read failure");
        }
        Ok(self.events.clone())
    }
}

/// Mock ProjectIndexReader for testing
#[derive(Default)]
pub struct MockProjectIndexReader {
    pub entries: Vec<ProjectIndexEntry>,
}

impl MockProjectIndexReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, name: &str, version: &str, locations: &[&str]) -> Self {
        self.entries.push(ProjectIndexEntry {
            project_name: name.to_string(),
            project_version_name: version.to_string(),
            locations: locations.iter().map(|l| l.parse().unwrap()).collect(),
        });
        self
    }
}

impl ProjectIndexReader for MockProjectIndexReader {
    fn read_project_index(&self, _path: &Path) -> Result<Vec<ProjectIndexEntry>> {
        Ok(self.entries.clone())
    }
}
