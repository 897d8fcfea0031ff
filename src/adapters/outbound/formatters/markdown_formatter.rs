use crate::application::dto::{IdentifyResponse, ReconcileResponse, ReportMetadata};
use crate::inspection::domain::{
    ClassificationFailure, NotificationPayload, PolicyRuleRef, PolicyStatusReport,
    ProcessedNotification, VulnerabilityReport,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use std::collections::BTreeSet;

const POLICY_TABLE_HEADER: &str =
    "| Component | Version | Project | Status | Highest Severity | Overridden By | Locations |\n";
const POLICY_TABLE_SEPARATOR: &str =
    "|-----------|---------|---------|--------|------------------|---------------|-----------|\n";

const CLEARED_TABLE_HEADER: &str = "| Component | Version | Project | Cleared Rules | Locations |\n";
const CLEARED_TABLE_SEPARATOR: &str = "|-----------|---------|---------|---------------|-----------|\n";

const VULN_TABLE_HEADER: &str =
    "| Component | Version | Project | Critical | High | Medium | Low | New | Updated | Deleted | Locations |\n";
const VULN_TABLE_SEPARATOR: &str =
    "|-----------|---------|---------|----------|------|--------|-----|-----|---------|---------|-----------|\n";

const FAILURE_TABLE_HEADER: &str = "| Event | Kind | Project | Component | Reason |\n";
const FAILURE_TABLE_SEPARATOR: &str = "|-------|------|---------|-----------|--------|\n";

/// MarkdownFormatter adapter for human-readable reports
///
/// Records are grouped by payload type into tables; every table cell is
/// escaped so component names and failure messages cannot break the layout.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_metadata(output: &mut String, metadata: &ReportMetadata) {
        output.push_str(&format!(
            "Generated by {} {} at {}  \nRun: `{}`\n\n",
            metadata.tool_name, metadata.tool_version, metadata.generated_at, metadata.run_id
        ));
    }

    fn record_prefix(record: &ProcessedNotification) -> String {
        format!(
            "| {} | {} | {} / {} |",
            Self::escape_markdown_table_cell(&record.component_name),
            Self::escape_markdown_table_cell(&record.component_version_name),
            Self::escape_markdown_table_cell(&record.project_name),
            Self::escape_markdown_table_cell(&record.project_version_name)
        )
    }

    fn locations_cell(record: &ProcessedNotification) -> String {
        let locations: Vec<String> = record
            .locations
            .iter()
            .map(|location| {
                format!(
                    "`{}`",
                    Self::escape_markdown_table_cell(&location.to_string())
                )
            })
            .collect();
        locations.join("<br>")
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering reconciliation sections
impl MarkdownFormatter {
    fn render_summary(output: &mut String, response: &ReconcileResponse) {
        let report = &response.report;
        output.push_str("## Summary\n\n");
        output.push_str("| Events | Records | Failures | Abandoned Events | Deadline Exceeded |\n");
        output.push_str("|--------|---------|----------|------------------|-------------------|\n");
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n\n",
            response.events,
            report.processed.len(),
            report.failures.len(),
            report.abandoned_events,
            if report.deadline_exceeded { "yes" } else { "no" }
        ));
    }

    fn render_policy_records(output: &mut String, records: &[&ProcessedNotification]) {
        let rows: Vec<String> = records
            .iter()
            .filter_map(|record| match &record.payload {
                NotificationPayload::Policy {
                    report,
                    overridden_by,
                } => Some(Self::policy_row(record, report, overridden_by.as_deref())),
                _ => None,
            })
            .collect();
        if rows.is_empty() {
            return;
        }

        output.push_str("## Policy Status\n\n");
        output.push_str(POLICY_TABLE_HEADER);
        output.push_str(POLICY_TABLE_SEPARATOR);
        for row in rows {
            output.push_str(&row);
        }
        output.push('\n');
    }

    fn policy_row(
        record: &ProcessedNotification,
        report: &PolicyStatusReport,
        overridden_by: Option<&str>,
    ) -> String {
        let severity = report
            .highest_severity()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        format!(
            "{} {} | {} | {} | {} |\n",
            Self::record_prefix(record),
            report.status,
            severity,
            Self::escape_markdown_table_cell(overridden_by.unwrap_or("")),
            Self::locations_cell(record)
        )
    }

    fn render_cleared_records(output: &mut String, records: &[&ProcessedNotification]) {
        let rows: Vec<String> = records
            .iter()
            .filter_map(|record| match &record.payload {
                NotificationPayload::RuleCleared { rules } => {
                    Some(Self::cleared_row(record, rules))
                }
                _ => None,
            })
            .collect();
        if rows.is_empty() {
            return;
        }

        output.push_str("## Cleared Rules\n\n");
        output.push_str(CLEARED_TABLE_HEADER);
        output.push_str(CLEARED_TABLE_SEPARATOR);
        for row in rows {
            output.push_str(&row);
        }
        output.push('\n');
    }

    fn cleared_row(record: &ProcessedNotification, rules: &BTreeSet<PolicyRuleRef>) -> String {
        let rules: Vec<String> = rules
            .iter()
            .map(|rule| {
                format!(
                    "{} ({})",
                    Self::escape_markdown_table_cell(&rule.name),
                    rule.severity
                )
            })
            .collect();
        format!(
            "{} {} | {} |\n",
            Self::record_prefix(record),
            rules.join(", "),
            Self::locations_cell(record)
        )
    }

    fn render_vulnerability_records(output: &mut String, records: &[&ProcessedNotification]) {
        let rows: Vec<String> = records
            .iter()
            .filter_map(|record| match &record.payload {
                NotificationPayload::Vulnerability(report) => {
                    Some(Self::vulnerability_row(record, report))
                }
                _ => None,
            })
            .collect();
        if rows.is_empty() {
            return;
        }

        output.push_str("## Vulnerabilities\n\n");
        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);
        for row in rows {
            output.push_str(&row);
        }
        output.push('\n');
    }

    fn vulnerability_row(record: &ProcessedNotification, report: &VulnerabilityReport) -> String {
        let aggregate = report.aggregate;
        format!(
            "{} {} | {} | {} | {} | {} | {} | {} | {} |\n",
            Self::record_prefix(record),
            aggregate.critical,
            aggregate.high,
            aggregate.medium,
            aggregate.low,
            report.new_ids.len(),
            report.updated_ids.len(),
            report.deleted_ids.len(),
            Self::locations_cell(record)
        )
    }

    fn render_failures(output: &mut String, failures: &[ClassificationFailure]) {
        if failures.is_empty() {
            return;
        }

        output.push_str("## Failures\n\n");
        output.push_str("The following components could not be classified in this pass.\n\n");
        output.push_str(FAILURE_TABLE_HEADER);
        output.push_str(FAILURE_TABLE_SEPARATOR);
        for failure in failures {
            let event = failure
                .event_id
                .clone()
                .unwrap_or_else(|| format!("#{}", failure.event_index));
            output.push_str(&format!(
                "| {} | {} | {} / {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&event),
                failure.kind,
                Self::escape_markdown_table_cell(&failure.project_name),
                Self::escape_markdown_table_cell(&failure.project_version_name),
                Self::escape_markdown_table_cell(failure.component.as_deref().unwrap_or("-")),
                Self::escape_markdown_table_cell(&failure.reason.to_string())
            ));
        }
        output.push('\n');
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format_reconciliation(&self, response: &ReconcileResponse) -> Result<String> {
        let mut output = String::new();
        output.push_str("# Notification Reconciliation Report\n\n");
        Self::render_metadata(&mut output, &response.metadata);
        Self::render_summary(&mut output, response);

        let records: Vec<&ProcessedNotification> = response.report.processed.iter().collect();
        Self::render_policy_records(&mut output, &records);
        Self::render_cleared_records(&mut output, &records);
        Self::render_vulnerability_records(&mut output, &records);
        Self::render_failures(&mut output, &response.report.failures);

        if response.report.deadline_exceeded {
            output.push_str(&format!(
                "> **Note:** the pass deadline expired; {} event(s) were abandoned and will be picked up by the next pass.\n",
                response.report.abandoned_events
            ));
        }
        Ok(output)
    }

    fn format_identification(&self, response: &IdentifyResponse) -> Result<String> {
        let mut output = String::new();
        output.push_str("# Artifact Identification Report\n\n");
        Self::render_metadata(&mut output, &response.metadata);

        output.push_str("## Identified Artifacts\n\n");
        if response.identified.is_empty() {
            output.push_str("*No artifacts were identified.*\n\n");
        } else {
            output.push_str("| Path | Ecosystem | Name | Version | External ID |\n");
            output.push_str("|------|-----------|------|---------|-------------|\n");
            for artifact in &response.identified {
                let name = match &artifact.namespace {
                    Some(namespace) => format!("{}:{}", namespace, artifact.name),
                    None => artifact.name.clone(),
                };
                output.push_str(&format!(
                    "| `{}` | {} | {} | {} | `{}` |\n",
                    Self::escape_markdown_table_cell(&artifact.path),
                    artifact.ecosystem,
                    Self::escape_markdown_table_cell(&name),
                    Self::escape_markdown_table_cell(&artifact.version),
                    Self::escape_markdown_table_cell(&artifact.external_id)
                ));
            }
            output.push('\n');
        }

        if !response.skipped.is_empty() {
            output.push_str("## Skipped Artifacts\n\n");
            output.push_str("| Path | Reason |\n");
            output.push_str("|------|--------|\n");
            for artifact in &response.skipped {
                output.push_str(&format!(
                    "| `{}` | {} |\n",
                    Self::escape_markdown_table_cell(&artifact.path),
                    Self::escape_markdown_table_cell(&artifact.reason)
                ));
            }
            output.push('\n');
        }
        Ok(output)
    }
}
