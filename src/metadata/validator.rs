//! Metadata validator using JSON Schema

use crate::metadata::MetadataError;
use jsonschema::{Draft, JSONSchema};
use serde_json::{Map, Value};

/// Validates project metadata documents against the embedded schema
pub struct MetadataValidator {
    schema: JSONSchema,
}

impl MetadataValidator {
    pub fn new() -> Result<Self, MetadataError> {
        let schema_value: Value = serde_json::from_str(Self::embedded_schema())
            .map_err(|e| MetadataError::Internal(format!("Invalid JSON Schema: {}", e)))?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| MetadataError::Internal(format!("Failed to compile schema: {}", e)))?;

        Ok(Self { schema })
    }

    fn embedded_schema() -> &'static str {
        include_str!("metadata_schema.json")
    }

    /// Validate a parsed document, reporting every violation at once
    pub fn validate(&self, content: &Map<String, Value>) -> Result<(), MetadataError> {
        let document = Value::Object(content.clone());
        if let Err(errors) = self.schema.validate(&document) {
            let error_msgs: Vec<String> = errors
                .map(|e| format!("{} at '{}'", e, e.instance_path))
                .collect();
            return Err(MetadataError::SchemaValidation(format!(
                "\n  - {}",
                error_msgs.join("\n  - ")
            )));
        }
        Ok(())
    }
}
