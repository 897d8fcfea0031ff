/// In-memory adapters built from exported data
mod in_memory_project_index;
mod static_artifact_metadata;

pub use in_memory_project_index::InMemoryProjectIndex;
pub use static_artifact_metadata::{NoComposerManifests, StaticArtifactMetadata};
