use crate::inspection::domain::{
    ComponentRef, PolicySummaryStatus, StatusFetchError, VulnerabilityAggregate,
};
use crate::ports::outbound::ComponentStatusRepository;
use async_trait::async_trait;
use dashmap::DashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

const BACKOFF_STEP: Duration = Duration::from_millis(100);

/// Cache key for one fetch of one component-version
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    component_name: String,
    component_version_name: String,
    link: Option<String>,
}

impl From<&ComponentRef> for CacheKey {
    fn from(component: &ComponentRef) -> Self {
        Self {
            component_name: component.component_name.clone(),
            component_version_name: component.component_version_name.clone(),
            link: component.link.clone(),
        }
    }
}

type Slot<T> = Arc<OnceCell<Result<T, StatusFetchError>>>;

/// SingleFlightStatusCache wraps a ComponentStatusRepository for one pass.
///
/// Each key is fetched at most once; concurrent callers for the same key wait
/// for the first fetch and share its result, failures included. Retryable
/// failures are retried up to `max_attempts` times with a linear backoff.
/// No map guard is held across an await.
pub struct SingleFlightStatusCache {
    inner: Arc<dyn ComponentStatusRepository>,
    max_attempts: u32,
    backoff_step: Duration,
    policy: DashMap<CacheKey, Slot<PolicySummaryStatus>>,
    vulnerability: DashMap<CacheKey, Slot<VulnerabilityAggregate>>,
}

impl SingleFlightStatusCache {
    pub fn new(inner: Arc<dyn ComponentStatusRepository>, max_attempts: u32) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            backoff_step: BACKOFF_STEP,
            policy: DashMap::new(),
            vulnerability: DashMap::new(),
        }
    }

    /// Overrides the backoff step between attempts
    pub fn with_backoff_step(mut self, backoff_step: Duration) -> Self {
        self.backoff_step = backoff_step;
        self
    }

    /// Number of distinct keys fetched so far
    pub fn len(&self) -> usize {
        self.policy.len() + self.vulnerability.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    async fn single_flight<T, F, Fut>(
        &self,
        slots: &DashMap<CacheKey, Slot<T>>,
        component: &ComponentRef,
        fetch: F,
    ) -> Result<T, StatusFetchError>
    where
        T: Clone,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StatusFetchError>>,
    {
        let slot = Arc::clone(&slots.entry(CacheKey::from(component)).or_default());
        slot.get_or_init(|| self.fetch_with_retry(component, fetch))
            .await
            .clone()
    }

    async fn fetch_with_retry<T, F, Fut>(
        &self,
        component: &ComponentRef,
        mut fetch: F,
    ) -> Result<T, StatusFetchError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, StatusFetchError>>,
    {
        let mut attempt = 1;
        loop {
            match fetch().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < self.max_attempts => {
                    tracing::warn!(
                        component = %component,
                        attempt,
                        error = %e,
                        "Status fetch failed, retrying"
                    );
                    tokio::time::sleep(self.backoff_step * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        component = %component,
                        attempts = attempt,
                        error = %e,
                        "Status fetch failed"
                    );
                    return Err(e);
                }
            }
        }
    }
}

#[async_trait]
impl ComponentStatusRepository for SingleFlightStatusCache {
    async fn fetch_policy_status(
        &self,
        component: &ComponentRef,
    ) -> Result<PolicySummaryStatus, StatusFetchError> {
        self.single_flight(&self.policy, component, || {
            self.inner.fetch_policy_status(component)
        })
        .await
    }

    async fn fetch_vulnerability_aggregate(
        &self,
        component: &ComponentRef,
    ) -> Result<VulnerabilityAggregate, StatusFetchError> {
        self.single_flight(&self.vulnerability, component, || {
            self.inner.fetch_vulnerability_aggregate(component)
        })
        .await
    }
}
