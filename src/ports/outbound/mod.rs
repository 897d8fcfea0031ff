/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (property store, intelligence service,
/// file system, console).
pub mod artifact_metadata;
pub mod component_status_repository;
pub mod formatter;
pub mod manifest_locator;
pub mod notification_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod project_index;

pub use artifact_metadata::{
    ArtifactMetadataReader, ArtifactRecord, ArtifactRecordReader, FileLayout,
};
pub use component_status_repository::ComponentStatusRepository;
pub use formatter::ReportFormatter;
pub use manifest_locator::{
    ComposerDist, ComposerManifest, ComposerManifestLocator, ComposerRelease,
};
pub use notification_reader::NotificationReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use project_index::{ProjectIndex, ProjectIndexEntry, ProjectIndexReader};
