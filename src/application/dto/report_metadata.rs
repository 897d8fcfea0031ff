use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

const TOOL_NAME: &str = "artifact-inspector";

/// ReportMetadata - identifies one run of the tool in its report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    pub tool_name: String,
    pub tool_version: String,
    /// `urn:uuid:` identifier of the run
    pub run_id: String,
    /// RFC 3339 timestamp of report generation
    pub generated_at: String,
}

impl ReportMetadata {
    /// Metadata for a run starting now
    pub fn generate() -> Self {
        Self {
            tool_name: TOOL_NAME.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            run_id: format!("urn:uuid:{}", Uuid::new_v4()),
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_metadata() {
        let metadata = ReportMetadata::generate();
        assert_eq!(metadata.tool_name, "artifact-inspector");
        assert_eq!(metadata.tool_version, env!("CARGO_PKG_VERSION"));
        assert!(chrono::DateTime::parse_from_rfc3339(&metadata.generated_at).is_ok());
    }

    #[test]
    fn test_run_id_format() {
        let metadata = ReportMetadata::generate();
        let uuid_part = metadata.run_id.strip_prefix("urn:uuid:").unwrap();
        assert!(Uuid::parse_str(uuid_part).is_ok());
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(
            ReportMetadata::generate().run_id,
            ReportMetadata::generate().run_id
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(ReportMetadata::generate()).unwrap();
        assert!(json.get("run_id").is_some());
        assert!(json.get("generated_at").is_some());
    }
}
