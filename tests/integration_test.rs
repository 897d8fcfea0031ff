/// Integration tests for the application layer
mod test_utilities;

use artifact_inspector::adapters::outbound::filesystem::FileSystemReader;
use artifact_inspector::inspection::domain::{
    FailureReason, NotificationPayload, PolicySeverity, PolicySummaryStatus,
    VulnerabilityAggregate,
};
use artifact_inspector::prelude::*;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use test_utilities::mocks::*;

const PROJECT: &str = "conda-remote";
const VERSION: &str = "2024-01";

fn index() -> MockProjectIndexReader {
    MockProjectIndexReader::new().with_project(
        PROJECT,
        VERSION,
        &[
            "conda-remote/linux-64/numpy-1.19.2-py38_0.conda",
            "conda-remote/osx-64/numpy-1.19.2-py38_0.conda",
        ],
    )
}

fn violation(components: &[(&str, &str)]) -> RawNotificationEvent {
    let statuses: Vec<_> = components
        .iter()
        .map(|(name, version)| json!({"componentName": name, "componentVersionName": version}))
        .collect();
    RawNotificationEvent::new(
        "RULE_VIOLATION",
        PROJECT,
        VERSION,
        json!({
            "componentVersionStatuses": statuses,
            "policyInfos": [
                {"policyName": "No GPL", "severity": "MAJOR"},
                {"policyName": "No Critical CVEs", "severity": "BLOCKER"}
            ]
        }),
    )
}

fn cleared(name: &str, version: &str) -> RawNotificationEvent {
    RawNotificationEvent::new(
        "RULE_VIOLATION_CLEARED",
        PROJECT,
        VERSION,
        json!({
            "componentVersionStatuses": [{"componentName": name, "componentVersionName": version}],
            "policyInfos": [{"policyName": "No GPL", "severity": "MAJOR"}]
        }),
    )
}

fn override_event(name: &str, version: &str) -> RawNotificationEvent {
    RawNotificationEvent::new(
        "POLICY_OVERRIDE",
        PROJECT,
        VERSION,
        json!({
            "componentName": name,
            "componentVersionName": version,
            "policyInfos": [{"policyName": "No GPL", "severity": "MINOR"}],
            "firstName": "Ada",
            "lastName": "Lovelace"
        }),
    )
}

fn vulnerability(name: &str, version: &str) -> RawNotificationEvent {
    RawNotificationEvent::new(
        "VULNERABILITY",
        PROJECT,
        VERSION,
        json!({
            "componentName": name,
            "versionName": version,
            "newVulnerabilityIds": [{"source": "NVD", "vulnerabilityId": "CVE-2021-3711"}]
        }),
    )
}

fn request(deadline: Option<Duration>) -> ReconcileRequest {
    ReconcileRequest::new(
        PathBuf::from("notifications.json"),
        PathBuf::from("index.json"),
        deadline,
    )
}

fn use_case(
    events: Vec<RawNotificationEvent>,
    status: Arc<MockStatusRepository>,
    config: ReconcileConfig,
) -> ReconcileNotificationsUseCase<MockNotificationReader, MockProjectIndexReader, MockProgressReporter>
{
    ReconcileNotificationsUseCase::new(
        MockNotificationReader::new(events),
        index(),
        status,
        MockProgressReporter::new(),
        config,
    )
}

#[tokio::test]
async fn test_reconcile_all_kinds() {
    let status = Arc::new(
        MockStatusRepository::new()
            .with_policy("numpy", "1.19.2", PolicySummaryStatus::InViolation)
            .with_policy("six", "1.16.0", PolicySummaryStatus::InViolationOverridden)
            .with_vulnerabilities("openssl", "1.1.1k", VulnerabilityAggregate::new(0, 2, 1, 0)),
    );
    let events = vec![
        violation(&[("numpy", "1.19.2")]),
        override_event("six", "1.16.0"),
        cleared("scipy", "1.5.0"),
        vulnerability("openssl", "1.1.1k"),
    ];

    let use_case = use_case(events, status.clone(), ReconcileConfig::default());
    let response = use_case.execute(request(None)).await.unwrap();

    assert!(response.is_clean());
    assert_eq!(response.events, 4);
    let report = &response.report;
    assert_eq!(report.processed.len(), 4);

    // Sorted by component name
    let names: Vec<_> = report
        .processed
        .iter()
        .map(|p| p.component_name.as_str())
        .collect();
    assert_eq!(names, vec!["numpy", "openssl", "scipy", "six"]);

    match &report.processed[0].payload {
        NotificationPayload::Policy { report, .. } => {
            assert_eq!(report.status, PolicySummaryStatus::InViolation);
            let severities: Vec<_> = report.severities.iter().copied().collect();
            assert_eq!(
                severities,
                vec![PolicySeverity::Blocker, PolicySeverity::Major]
            );
        }
        other => panic!("unexpected payload: {:?}", other),
    }
    match &report.processed[1].payload {
        NotificationPayload::Vulnerability(vulnerability) => {
            assert_eq!(vulnerability.aggregate.high, 2);
            assert_eq!(vulnerability.new_ids.len(), 1);
        }
        other => panic!("unexpected payload: {:?}", other),
    }
    assert!(matches!(
        report.processed[2].payload,
        NotificationPayload::RuleCleared { .. }
    ));
    match &report.processed[3].payload {
        NotificationPayload::Policy {
            report,
            overridden_by,
        } => {
            assert_eq!(report.status, PolicySummaryStatus::InViolationOverridden);
            assert_eq!(overridden_by.as_deref(), Some("Ada Lovelace"));
        }
        other => panic!("unexpected payload: {:?}", other),
    }

    for processed in &report.processed {
        assert_eq!(processed.locations.len(), 2);
    }
    // The cleared event needs no fetch
    assert_eq!(status.calls(), 3);
}

#[tokio::test]
async fn test_reconcile_partial_failure_keeps_other_components() {
    let status = Arc::new(
        MockStatusRepository::new()
            .with_policy("numpy", "1.19.2", PolicySummaryStatus::InViolation)
            .with_failure("broken", "0.1"),
    );
    let progress_reporter = MockProgressReporter::new();
    let use_case = ReconcileNotificationsUseCase::new(
        MockNotificationReader::new(vec![violation(&[("numpy", "1.19.2"), ("broken", "0.1")])]),
        index(),
        status,
        progress_reporter.clone(),
        ReconcileConfig::default(),
    );
    let response = use_case.execute(request(None)).await.unwrap();

    assert!(!response.is_clean());
    assert_eq!(response.report.processed.len(), 1);
    assert_eq!(response.report.processed[0].component_name, "numpy");
    assert_eq!(response.report.failures.len(), 1);

    let failure = &response.report.failures[0];
    assert_eq!(failure.component.as_deref(), Some("broken 0.1"));
    assert!(matches!(
        failure.reason,
        FailureReason::StatusFetch(StatusFetchError::UnexpectedStatus { status: 404, .. })
    ));
    assert_eq!(progress_reporter.error_messages().len(), 1);
}

#[tokio::test]
async fn test_reconcile_failed_event_does_not_block_other_events() {
    let status = Arc::new(
        MockStatusRepository::new()
            .with_policy("numpy", "1.19.2", PolicySummaryStatus::InViolation)
            .with_failure("openssl", "1.1.1k"),
    );
    let use_case = use_case(
        vec![
            vulnerability("openssl", "1.1.1k"),
            violation(&[("numpy", "1.19.2")]),
        ],
        status.clone(),
        ReconcileConfig::default(),
    );

    let response = use_case.execute(request(None)).await.unwrap();

    assert!(!response.is_clean());
    assert_eq!(response.report.processed.len(), 1);
    assert_eq!(response.report.processed[0].component_name, "numpy");
    assert_eq!(response.report.failures.len(), 1);

    let failure = &response.report.failures[0];
    assert_eq!(failure.event_index, 0);
    assert_eq!(failure.kind, NotificationKind::Vulnerability);
    assert!(matches!(
        failure.reason,
        FailureReason::StatusFetch(StatusFetchError::UnexpectedStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_reconcile_unknown_kind_fails_batch_without_fetching() {
    let status = Arc::new(MockStatusRepository::new());
    let mut unknown = violation(&[("numpy", "1.19.2")]);
    unknown.kind = "BOM_EDIT".to_string();
    let events = vec![violation(&[("numpy", "1.19.2")]), unknown];

    let use_case = use_case(events, status.clone(), ReconcileConfig::default());
    let err = use_case.execute(request(None)).await.unwrap_err();

    match err.downcast_ref::<ReconcileError>() {
        Some(ReconcileError::UnknownEventKind { kind, index }) => {
            assert_eq!(kind, "BOM_EDIT");
            assert_eq!(*index, 1);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(status.calls(), 0);
}

#[tokio::test]
async fn test_reconcile_uncorrelated_project_produces_nothing() {
    let status = Arc::new(MockStatusRepository::new());
    let mut event = violation(&[("numpy", "1.19.2")]);
    event.project_version_name = "2023-12".to_string();

    let use_case = use_case(vec![event], status.clone(), ReconcileConfig::default());
    let response = use_case.execute(request(None)).await.unwrap();

    assert!(response.is_clean());
    assert!(response.report.processed.is_empty());
    assert!(response.report.failures.is_empty());
    assert_eq!(status.calls(), 0);
}

#[tokio::test]
async fn test_reconcile_fetches_each_component_once_per_pass() {
    let status = Arc::new(
        MockStatusRepository::new()
            .with_policy("numpy", "1.19.2", PolicySummaryStatus::InViolation)
            .with_delay(Duration::from_millis(20)),
    );
    let events = vec![
        violation(&[("numpy", "1.19.2")]),
        violation(&[("numpy", "1.19.2")]),
        violation(&[("numpy", "1.19.2"), ("numpy", "1.19.2")]),
    ];

    let use_case = use_case(events, status.clone(), ReconcileConfig::default());
    let response = use_case.execute(request(None)).await.unwrap();

    assert_eq!(response.report.processed.len(), 4);
    assert_eq!(status.calls(), 1);
}

#[tokio::test]
async fn test_reconcile_is_idempotent() {
    let status = Arc::new(
        MockStatusRepository::new()
            .with_policy("numpy", "1.19.2", PolicySummaryStatus::InViolation)
            .with_failure("broken", "0.1"),
    );
    let events = vec![
        violation(&[("numpy", "1.19.2"), ("broken", "0.1")]),
        cleared("scipy", "1.5.0"),
        vulnerability("openssl", "1.1.1k"),
    ];

    let use_case = use_case(events, status, ReconcileConfig::default());
    let first = use_case.execute(request(None)).await.unwrap();
    let second = use_case.execute(request(None)).await.unwrap();

    assert_eq!(first.report, second.report);
    assert_ne!(first.metadata.run_id, second.metadata.run_id);
}

#[tokio::test]
async fn test_reconcile_retries_transient_failures() {
    let status = Arc::new(
        MockStatusRepository::new()
            .with_policy("numpy", "1.19.2", PolicySummaryStatus::NotInViolation)
            .with_transient_failures("numpy", "1.19.2", 1),
    );
    let config = ReconcileConfig {
        fetch_retry_count: 2,
        max_concurrent_events: 4,
    };

    let use_case = use_case(vec![violation(&[("numpy", "1.19.2")])], status.clone(), config);
    let response = use_case.execute(request(None)).await.unwrap();

    assert!(response.is_clean());
    assert_eq!(status.calls(), 2);
}

#[tokio::test]
async fn test_reconcile_gives_up_after_retry_budget() {
    let status = Arc::new(
        MockStatusRepository::new().with_transient_failures("numpy", "1.19.2", 5),
    );
    let config = ReconcileConfig {
        fetch_retry_count: 1,
        max_concurrent_events: 4,
    };

    let use_case = use_case(vec![violation(&[("numpy", "1.19.2")])], status.clone(), config);
    let response = use_case.execute(request(None)).await.unwrap();

    assert_eq!(response.report.failures.len(), 1);
    assert_eq!(status.calls(), 1);
}

#[tokio::test]
async fn test_reconcile_deadline_returns_partial_result() {
    let status = Arc::new(MockStatusRepository::new().with_delay(Duration::from_secs(5)));
    let events = vec![
        violation(&[("numpy", "1.19.2")]),
        cleared("scipy", "1.5.0"),
    ];
    let config = ReconcileConfig {
        fetch_retry_count: 1,
        max_concurrent_events: 2,
    };

    let use_case = use_case(events, status, config);
    let response = use_case
        .execute(request(Some(Duration::from_millis(100))))
        .await
        .unwrap();

    assert!(response.report.deadline_exceeded);
    assert!(!response.is_clean());
    assert_eq!(response.report.abandoned_events, 1);
    // The cleared event completes without waiting on the service
    assert_eq!(response.report.processed.len(), 1);
    assert_eq!(response.report.processed[0].component_name, "scipy");
}

#[tokio::test]
async fn test_reconcile_notification_read_failure() {
    let use_case = ReconcileNotificationsUseCase::new(
        MockNotificationReader::with_failure(),
        index(),
        Arc::new(MockStatusRepository::new()),
        MockProgressReporter::new(),
        ReconcileConfig::default(),
    );

    let err = use_case.execute(request(None)).await.unwrap_err();
    assert!(err.to_string().contains("Mock notification read failure"));
}

#[tokio::test]
async fn test_reconcile_from_fixture_files() {
    let progress_reporter = MockProgressReporter::new();
    let status = Arc::new(
        MockStatusRepository::new().with_policy("numpy", "1.19.2", PolicySummaryStatus::InViolation),
    );
    let use_case = ReconcileNotificationsUseCase::new(
        FileSystemReader::new(),
        FileSystemReader::new(),
        status,
        progress_reporter.clone(),
        ReconcileConfig::default(),
    );

    let request = ReconcileRequest::new(
        PathBuf::from("tests/fixtures/notifications.json"),
        PathBuf::from("tests/fixtures/project-index.json"),
        None,
    );
    let response = use_case.execute(request).await.unwrap();

    assert_eq!(response.events, 3);
    assert_eq!(response.report.processed.len(), 3);
    assert!(response.report.failures.is_empty());
    assert!(progress_reporter.error_messages().is_empty());
    assert!(progress_reporter
        .get_messages()
        .iter()
        .any(|m| m.contains("Completed: ")));
}

#[test]
fn test_identify_from_fixture_metadata() {
    let config = ResolverConfig {
        repositories: [
            ("conda-remote".to_string(), Ecosystem::Conda),
            ("npm-remote".to_string(), Ecosystem::Npm),
            ("maven-remote".to_string(), Ecosystem::Maven),
        ]
        .into_iter()
        .collect(),
        ..Default::default()
    };
    let progress_reporter = MockProgressReporter::new();
    let use_case = IdentifyArtifactsUseCase::new(
        FileSystemReader::new(),
        Arc::new(NoComposerManifests),
        progress_reporter.clone(),
        config,
    );

    let locations = [
        "conda-remote/linux-64/numpy-1.19.2-py38_0.conda",
        "npm-remote/left-pad/-/left-pad-1.3.0.tgz",
        "maven-remote/org/apache/commons/commons-lang3/3.12.0/commons-lang3-3.12.0.jar",
        "npm-remote/unknown/-/unknown-0.0.1.tgz",
    ]
    .iter()
    .map(|p| p.parse().unwrap())
    .collect();
    let request = IdentifyRequest::new(
        locations,
        None,
        Some(PathBuf::from("tests/fixtures/artifact-metadata.json")),
    );

    let response = use_case.execute(request).unwrap();

    let ids: Vec<_> = response
        .identified
        .iter()
        .map(|v| v.external_id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "anaconda:numpy:1.19.2-py38_0-linux-64",
            "npmjs:left-pad:1.3.0",
            "maven:org.apache.commons:commons-lang3:3.12.0",
        ]
    );
    assert_eq!(response.skipped.len(), 1);
    assert_eq!(response.skipped[0].path, "npm-remote/unknown/-/unknown-0.0.1.tgz");
    assert_eq!(progress_reporter.error_messages().len(), 1);
}

#[test]
fn test_identify_zero_locations_is_clean() {
    let use_case = IdentifyArtifactsUseCase::new(
        FileSystemReader::new(),
        Arc::new(NoComposerManifests),
        MockProgressReporter::new(),
        ResolverConfig::default(),
    );

    let response = use_case
        .execute(IdentifyRequest::new(Vec::new(), None, None))
        .unwrap();

    assert!(response.is_clean());
    assert!(response.identified.is_empty());
}
