use crate::inspection::domain::{
    ComponentRef, PolicySummaryStatus, StatusFetchError, VulnerabilityAggregate,
};
use async_trait::async_trait;

/// ComponentStatusRepository port for fetching fresh component state
///
/// This port abstracts the intelligence service. Every call reads current
/// state; nothing is taken from the notification payload, which may be stale.
///
/// # Async Support
/// Implementations must be `Send + Sync` so one repository can serve many
/// concurrently classified events. Calls must be idempotent: the caller may
/// retry them.
#[async_trait]
pub trait ComponentStatusRepository: Send + Sync {
    /// Fetches the current approval status of a component-version
    ///
    /// # Errors
    /// Returns a [`StatusFetchError`] when the service is unreachable, answers
    /// with an error status, or the component carries no status link.
    async fn fetch_policy_status(
        &self,
        component: &ComponentRef,
    ) -> Result<PolicySummaryStatus, StatusFetchError>;

    /// Fetches the current vulnerability counts of a component-version
    async fn fetch_vulnerability_aggregate(
        &self,
        component: &ComponentRef,
    ) -> Result<VulnerabilityAggregate, StatusFetchError>;
}
