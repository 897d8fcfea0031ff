use super::{ClassificationContext, ClassifierOutput};
use crate::inspection::domain::{NotificationPayload, PolicyRuleRef, RuleViolationClearedContent};
use std::collections::BTreeSet;

/// Classifies a rule-cleared event.
///
/// The cleared rules travel in the event itself, so nothing is fetched.
pub fn classify(context: ClassificationContext<'_>) -> ClassifierOutput {
    let content: RuleViolationClearedContent = match context.decode() {
        Ok(content) => content,
        Err(reason) => return ClassifierOutput::failed(context.failure(None, reason)),
    };

    let rules: BTreeSet<PolicyRuleRef> = content
        .policy_infos
        .iter()
        .map(PolicyRuleRef::from)
        .collect();

    let processed = content
        .component_version_statuses
        .iter()
        .map(|status| {
            context.record(
                &status.component_name,
                &status.component_version_name,
                NotificationPayload::RuleCleared {
                    rules: rules.clone(),
                },
            )
        })
        .collect();

    ClassifierOutput {
        processed,
        failures: Vec::new(),
    }
}
