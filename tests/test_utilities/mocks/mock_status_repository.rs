use artifact_inspector::inspection::domain::{
    ComponentRef, PolicySummaryStatus, StatusFetchError, VulnerabilityAggregate,
};
use artifact_inspector::ports::outbound::ComponentStatusRepository;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Mock ComponentStatusRepository for testing
///
/// Answers from tables keyed by `name@version`; unknown components are
/// `NOT_IN_VIOLATION` with no vulnerabilities. Every call is counted.
#[derive(Default)]
pub struct MockStatusRepository {
    pub policy: HashMap<String, PolicySummaryStatus>,
    pub vulnerabilities: HashMap<String, VulnerabilityAggregate>,
    pub failing: HashSet<String>,
    /// Components that fail this many times before answering
    pub transient_failures: HashMap<String, usize>,
    pub delay: Duration,
    calls: AtomicUsize,
    attempts: Mutex<HashMap<String, usize>>,
}

impl MockStatusRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, name: &str, version: &str, status: PolicySummaryStatus) -> Self {
        self.policy.insert(key(name, version), status);
        self
    }

    pub fn with_vulnerabilities(
        mut self,
        name: &str,
        version: &str,
        aggregate: VulnerabilityAggregate,
    ) -> Self {
        self.vulnerabilities.insert(key(name, version), aggregate);
        self
    }

    pub fn with_failure(mut self, name: &str, version: &str) -> Self {
        self.failing.insert(key(name, version));
        self
    }

    pub fn with_transient_failures(mut self, name: &str, version: &str, count: usize) -> Self {
        self.transient_failures.insert(key(name, version), count);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, component: &ComponentRef) -> Result<String, StatusFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let key = key(&component.component_name, &component.component_version_name);
        if self.failing.contains(&key) {
            return Err(StatusFetchError::UnexpectedStatus {
                status: 404,
                url: format!("https://bd.example.com/api/components/{}", key),
            });
        }

        if let Some(&limit) = self.transient_failures.get(&key) {
            let mut attempts = self.attempts.lock().unwrap();
            let attempt = attempts.entry(key.clone()).or_insert(0);
            *attempt += 1;
            if *attempt <= limit {
                return Err(StatusFetchError::Transport {
                    details: "connection reset".to_string(),
                });
            }
        }

        Ok(key)
    }
}

fn key(name: &str, version: &str) -> String {
    format!("{}@{}", name, version)
}

#[async_trait]
impl ComponentStatusRepository for MockStatusRepository {
    async fn fetch_policy_status(
        &self,
        component: &ComponentRef,
    ) -> Result<PolicySummaryStatus, StatusFetchError> {
        let key = self.answer(component).await?;
        Ok(self
            .policy
            .get(&key)
            .copied()
            .unwrap_or(PolicySummaryStatus::NotInViolation))
    }

    async fn fetch_vulnerability_aggregate(
        &self,
        component: &ComponentRef,
    ) -> Result<VulnerabilityAggregate, StatusFetchError> {
        let key = self.answer(component).await?;
        Ok(self.vulnerabilities.get(&key).copied().unwrap_or_default())
    }
}
