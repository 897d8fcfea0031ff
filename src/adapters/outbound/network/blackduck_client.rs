use crate::inspection::domain::{
    ComponentRef, PolicySummaryStatus, StatusFetchError, VulnerabilityAggregate,
};
use crate::ports::outbound::ComponentStatusRepository;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::OnceCell;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BearerTokenResponse {
    bearer_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyStatusView {
    approval_status: PolicySummaryStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BomComponentView {
    #[serde(default)]
    security_risk_profile: Option<RiskProfile>,
}

#[derive(Debug, Deserialize)]
struct RiskProfile {
    #[serde(default)]
    counts: Vec<RiskCount>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RiskCount {
    count_type: String,
    count: u32,
}

impl RiskProfile {
    fn into_aggregate(self) -> VulnerabilityAggregate {
        let mut aggregate = VulnerabilityAggregate::default();
        for RiskCount { count_type, count } in self.counts {
            match count_type.as_str() {
                "CRITICAL" => aggregate.critical = aggregate.critical.saturating_add(count),
                "HIGH" => aggregate.high = aggregate.high.saturating_add(count),
                "MEDIUM" => aggregate.medium = aggregate.medium.saturating_add(count),
                "LOW" => aggregate.low = aggregate.low.saturating_add(count),
                _ => {}
            }
        }
        aggregate
    }
}

/// BlackDuckClient adapter for the component-intelligence service
///
/// Implements the ComponentStatusRepository port over the service's REST API.
/// It authenticates lazily on first use and follows the links carried by
/// notification payloads.
///
/// # Security
/// - Links outside the configured service URL are never followed, so the
///   bearer token is only ever sent to that service
/// - Requests time out after 30 seconds
pub struct BlackDuckClient {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    bearer: OnceCell<String>,
}

impl BlackDuckClient {
    const TIMEOUT_SECONDS: u64 = 30;
    const AUTHENTICATE_PATH: &'static str = "/api/tokens/authenticate";

    /// Creates a client for the service at `base_url`
    pub fn new(base_url: &str, api_token: impl Into<String>) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("artifact-inspector/{}", version);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            bearer: OnceCell::new(),
        })
    }

    async fn bearer_token(&self) -> std::result::Result<&str, StatusFetchError> {
        self.bearer
            .get_or_try_init(|| self.authenticate())
            .await
            .map(String::as_str)
    }

    async fn authenticate(&self) -> std::result::Result<String, StatusFetchError> {
        let url = format!("{}{}", self.base_url, Self::AUTHENTICATE_PATH);
        tracing::debug!(url = %url, "Authenticating with the intelligence service");

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("token {}", self.api_token))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(StatusFetchError::Authentication {
                details: format!("API token rejected with status code {}", status.as_u16()),
            });
        }
        if !status.is_success() {
            return Err(StatusFetchError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body: BearerTokenResponse = response.json().await.map_err(malformed_response)?;
        Ok(body.bearer_token)
    }

    /// Rejects links that would send credentials to another host
    fn validate_link(&self, link: &str) -> std::result::Result<(), StatusFetchError> {
        let inside = link
            .strip_prefix(&self.base_url)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
        if inside {
            Ok(())
        } else {
            Err(StatusFetchError::ForeignLink {
                url: link.to_string(),
            })
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        link: &str,
    ) -> std::result::Result<T, StatusFetchError> {
        self.validate_link(link)?;
        let token = self.bearer_token().await?;

        let response = self
            .client
            .get(link)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusFetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: link.to_string(),
            });
        }

        response.json::<T>().await.map_err(malformed_response)
    }
}

fn required_link<'a>(
    component: &'a ComponentRef,
    link: &'static str,
) -> std::result::Result<&'a str, StatusFetchError> {
    component
        .link
        .as_deref()
        .ok_or_else(|| StatusFetchError::MissingLink {
            link,
            component: component.to_string(),
        })
}

fn transport_error(e: reqwest::Error) -> StatusFetchError {
    StatusFetchError::Transport {
        details: e.to_string(),
    }
}

fn malformed_response(e: reqwest::Error) -> StatusFetchError {
    StatusFetchError::MalformedResponse {
        details: e.to_string(),
    }
}

#[async_trait]
impl ComponentStatusRepository for BlackDuckClient {
    async fn fetch_policy_status(
        &self,
        component: &ComponentRef,
    ) -> std::result::Result<PolicySummaryStatus, StatusFetchError> {
        let link = required_link(component, "policy status")?;
        let view: PolicyStatusView = self.get_json(link).await?;
        tracing::debug!(
            component = %component,
            status = %view.approval_status,
            "Fetched policy status"
        );
        Ok(view.approval_status)
    }

    async fn fetch_vulnerability_aggregate(
        &self,
        component: &ComponentRef,
    ) -> std::result::Result<VulnerabilityAggregate, StatusFetchError> {
        let link = required_link(component, "BOM component")?;
        let view: BomComponentView = self.get_json(link).await?;
        Ok(view
            .security_risk_profile
            .map(RiskProfile::into_aggregate)
            .unwrap_or_default())
    }
}
