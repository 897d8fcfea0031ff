use super::{ClassificationContext, ClassifierOutput};
use crate::inspection::domain::{
    ComponentRef, NotificationPayload, PolicyOverrideContent, PolicyStatusReport,
};

/// Classifies a policy-override event.
///
/// The component's approval status is fetched fresh. Severities are taken only
/// from the rules the override names; no other severity source is consulted.
/// The record stands on its own: violation records for the same component
/// in the same pass are left untouched.
pub async fn classify(context: ClassificationContext<'_>) -> ClassifierOutput {
    let content: PolicyOverrideContent = match context.decode() {
        Ok(content) => content,
        Err(reason) => return ClassifierOutput::failed(context.failure(None, reason)),
    };

    let component = ComponentRef::new(
        content.component_name.clone(),
        content.component_version_name.clone(),
        content.bom_component_version_policy_status.clone(),
    );

    match context.status.fetch_policy_status(&component).await {
        Ok(status) => {
            let report = PolicyStatusReport::from_policy_infos(status, &content.policy_infos);
            let record = context.record(
                &content.component_name,
                &content.component_version_name,
                NotificationPayload::Policy {
                    report,
                    overridden_by: overriding_user(&content),
                },
            );
            ClassifierOutput {
                processed: vec![record],
                failures: Vec::new(),
            }
        }
        Err(e) => {
            ClassifierOutput::failed(context.failure(Some(component.to_string()), e.into()))
        }
    }
}

fn overriding_user(content: &PolicyOverrideContent) -> Option<String> {
    let name = [content.first_name.as_deref(), content.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspection::domain::{
        FailureReason, NotificationKind, PolicySeverity, PolicySummaryStatus,
        RawNotificationEvent,
    };
    use crate::inspection::services::classifiers::test_support::{
        locations, TableStatusRepository,
    };
    use serde_json::json;
    use std::collections::HashMap;

    fn override_event(first_name: Option<&str>) -> RawNotificationEvent {
        RawNotificationEvent::new(
            "POLICY_OVERRIDE",
            "conda-remote",
            "2024-01",
            json!({
                "componentName": "numpy",
                "componentVersionName": "1.19.2",
                "bomComponentVersionPolicyStatus": "https://bd/api/status/numpy",
                "policyInfos": [{ "policyName": "No GPL", "severity": "MINOR" }],
                "firstName": first_name,
                "lastName": "Doe"
            }),
        )
    }

    #[tokio::test]
    async fn test_override_record() {
        let status = TableStatusRepository {
            policy: HashMap::from([(
                "numpy".to_string(),
                Ok(PolicySummaryStatus::InViolationOverridden),
            )]),
            ..Default::default()
        };
        let event = override_event(Some("Jane"));
        let locations = locations();

        let output = classify(ClassificationContext {
            kind: NotificationKind::PolicyOverride,
            event_index: 4,
            event: &event,
            locations: &locations,
            status: &status,
        })
        .await;

        assert!(output.failures.is_empty());
        assert_eq!(output.processed.len(), 1);
        let record = &output.processed[0];
        assert_eq!(record.kind, NotificationKind::PolicyOverride);
        match &record.payload {
            NotificationPayload::Policy {
                report,
                overridden_by,
            } => {
                assert_eq!(report.status, PolicySummaryStatus::InViolationOverridden);
                assert_eq!(
                    report.severities.iter().copied().collect::<Vec<_>>(),
                    vec![PolicySeverity::Minor]
                );
                assert_eq!(overridden_by.as_deref(), Some("Jane Doe"));
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_override_fetch_failure() {
        let status = TableStatusRepository::default();
        let event = override_event(None);
        let locations = locations();

        let output = classify(ClassificationContext {
            kind: NotificationKind::PolicyOverride,
            event_index: 4,
            event: &event,
            locations: &locations,
            status: &status,
        })
        .await;

        assert!(output.processed.is_empty());
        assert_eq!(output.failures.len(), 1);
        assert_eq!(output.failures[0].event_index, 4);
        assert!(matches!(
            output.failures[0].reason,
            FailureReason::StatusFetch(_)
        ));
    }

    #[test]
    fn test_overriding_user() {
        let mut content: PolicyOverrideContent = serde_json::from_value(json!({
            "componentName": "numpy",
            "componentVersionName": "1.19.2"
        }))
        .unwrap();
        assert_eq!(overriding_user(&content), None);

        content.last_name = Some("Doe".to_string());
        assert_eq!(overriding_user(&content).as_deref(), Some("Doe"));
    }
}
