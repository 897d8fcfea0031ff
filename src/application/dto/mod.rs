/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod identify_request;
mod identify_response;
mod output_format;
mod reconcile_request;
mod reconcile_response;
mod report_metadata;

pub use identify_request::IdentifyRequest;
pub use identify_response::{IdentifiedView, IdentifyResponse, SkippedView};
pub use output_format::OutputFormat;
pub use reconcile_request::ReconcileRequest;
pub use reconcile_response::ReconcileResponse;
pub use report_metadata::ReportMetadata;
