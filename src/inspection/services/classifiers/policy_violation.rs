use super::{ClassificationContext, ClassifierOutput};
use crate::inspection::domain::{
    ComponentRef, NotificationPayload, PolicyStatusReport, RuleViolationContent,
};
use futures::future::join_all;

/// Classifies a rule-violation event.
///
/// The approval status of every component is fetched fresh; severities come
/// from the policy rules named in the event.
pub async fn classify(context: ClassificationContext<'_>) -> ClassifierOutput {
    let content: RuleViolationContent = match context.decode() {
        Ok(content) => content,
        Err(reason) => return ClassifierOutput::failed(context.failure(None, reason)),
    };

    let components: Vec<ComponentRef> = content
        .component_version_statuses
        .iter()
        .map(ComponentRef::from)
        .collect();
    let statuses = join_all(
        components
            .iter()
            .map(|component| context.status.fetch_policy_status(component)),
    )
    .await;

    let mut output = ClassifierOutput::default();
    for (component, status) in components.iter().zip(statuses) {
        match status {
            Ok(status) => {
                let report = PolicyStatusReport::from_policy_infos(status, &content.policy_infos);
                output.processed.push(context.record(
                    &component.component_name,
                    &component.component_version_name,
                    NotificationPayload::Policy {
                        report,
                        overridden_by: None,
                    },
                ));
            }
            Err(e) => output
                .failures
                .push(context.failure(Some(component.to_string()), e.into())),
        }
    }
    output
}
