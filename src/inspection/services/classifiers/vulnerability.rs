use super::{ClassificationContext, ClassifierOutput};
use crate::inspection::domain::{
    ComponentRef, NotificationPayload, VulnerabilityContent, VulnerabilityReport,
};

/// Classifies a vulnerability event.
///
/// Severity comes from the component's fresh vulnerability counts; the event
/// contributes the identifiers that changed.
pub async fn classify(context: ClassificationContext<'_>) -> ClassifierOutput {
    let content: VulnerabilityContent = match context.decode() {
        Ok(content) => content,
        Err(reason) => return ClassifierOutput::failed(context.failure(None, reason)),
    };

    let component = ComponentRef::new(
        content.component_name.clone(),
        content.version_name.clone(),
        content.bom_component.clone(),
    );

    match context.status.fetch_vulnerability_aggregate(&component).await {
        Ok(aggregate) => {
            let report = VulnerabilityReport {
                aggregate,
                new_ids: content.new_vulnerability_ids.into_iter().collect(),
                updated_ids: content.updated_vulnerability_ids.into_iter().collect(),
                deleted_ids: content.deleted_vulnerability_ids.into_iter().collect(),
            };
            let record = context.record(
                &content.component_name,
                &content.version_name,
                NotificationPayload::Vulnerability(report),
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
