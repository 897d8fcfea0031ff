use crate::application::dto::{IdentifyResponse, ReconcileResponse};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonFormatter adapter for machine-readable reports
///
/// The report is the pretty-printed serialization of the response DTO, so
/// its shape follows the domain types directly.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_reconciliation(&self, response: &ReconcileResponse) -> Result<String> {
        serde_json::to_string_pretty(response).map_err(Into::into)
    }

    fn format_identification(&self, response: &IdentifyResponse) -> Result<String> {
        serde_json::to_string_pretty(response).map_err(Into::into)
    }
}
