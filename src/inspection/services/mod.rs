pub mod classifiers;
mod identity_resolver;
mod notification_dispatcher;
mod repository_correlator;
mod status_cache;

pub use identity_resolver::{
    IdentifiedArtifact, IdentityResolver, ResolutionOutcome, ResolverConfig, SkippedArtifact,
};
pub use notification_dispatcher::{NotificationDispatcher, ReconcileConfig};
pub use repository_correlator::RepositoryCorrelator;
pub use status_cache::SingleFlightStatusCache;
