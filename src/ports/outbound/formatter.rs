use crate::application::dto::{IdentifyResponse, ReconcileResponse};
use crate::shared::Result;

/// ReportFormatter port for rendering use-case results
///
/// This port abstracts the output formats (JSON, Markdown).
pub trait ReportFormatter {
    /// Formats the result of a reconciliation pass
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format_reconciliation(&self, response: &ReconcileResponse) -> Result<String>;

    /// Formats the result of an identification run
    fn format_identification(&self, response: &IdentifyResponse) -> Result<String>;
}
