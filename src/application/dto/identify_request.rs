use crate::inspection::domain::{ArtifactLocation, Ecosystem};
use std::path::PathBuf;

/// IdentifyRequest - artifacts to identify and where their metadata lives
#[derive(Debug, Clone)]
pub struct IdentifyRequest {
    pub locations: Vec<ArtifactLocation>,
    /// Ecosystem for every artifact, overriding the per-repository declaration
    pub ecosystem: Option<Ecosystem>,
    /// JSON export of item metadata, for ecosystems that read properties
    pub metadata_path: Option<PathBuf>,
}

impl IdentifyRequest {
    pub fn new(
        locations: Vec<ArtifactLocation>,
        ecosystem: Option<Ecosystem>,
        metadata_path: Option<PathBuf>,
    ) -> Self {
        Self {
            locations,
            ecosystem,
            metadata_path,
        }
    }
}
