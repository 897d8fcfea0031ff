//! artifact-inspector - component intelligence for binary artifact repositories
//!
//! This library resolves canonical component identities for artifacts stored
//! in a package-manager-agnostic repository, and reconciles policy and
//! vulnerability notifications from a component-intelligence service against
//! the repository contents. It follows hexagonal architecture and
//! Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`inspection`): Domain models, identity extractors and services
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use artifact_inspector::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let use_case = IdentifyArtifactsUseCase::new(
//!     FileSystemReader::new(),
//!     Arc::new(NoComposerManifests),
//!     StderrProgressReporter::new(),
//!     ResolverConfig::default(),
//! );
//!
//! let location: ArtifactLocation = "conda-remote/linux-64/numpy-1.19.2-py38_0.conda".parse()?;
//! let request = IdentifyRequest::new(vec![location], Some(Ecosystem::Conda), None);
//! let response = use_case.execute(request)?;
//!
//! let output = JsonFormatter::new().format_identification(&response)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod inspection;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, MirrorManifestLocator, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, MarkdownFormatter};
    pub use crate::adapters::outbound::memory::{
        InMemoryProjectIndex, NoComposerManifests, StaticArtifactMetadata,
    };
    pub use crate::adapters::outbound::network::BlackDuckClient;
    pub use crate::application::dto::{
        IdentifyRequest, IdentifyResponse, OutputFormat, ReconcileRequest, ReconcileResponse,
        ReportMetadata,
    };
    pub use crate::application::use_cases::{
        IdentifyArtifactsUseCase, ReconcileNotificationsUseCase,
    };
    pub use crate::inspection::domain::{
        ArtifactLocation, CanonicalIdentity, Ecosystem, ExtractionFailure, NotificationKind,
        ProcessedNotification, RawNotificationEvent, ReconcileError, ReconciliationReport,
        StatusFetchError,
    };
    pub use crate::inspection::services::{
        IdentityResolver, NotificationDispatcher, ReconcileConfig, RepositoryCorrelator,
        ResolverConfig,
    };
    pub use crate::ports::outbound::{
        ArtifactMetadataReader, ArtifactRecordReader, ComponentStatusRepository,
        ComposerManifestLocator, NotificationReader, OutputPresenter, ProgressReporter,
        ProjectIndex, ProjectIndexReader, ReportFormatter,
    };
    pub use crate::shared::Result;
}
