//! Boot version metadata reader
//!
//! A [`BootMetadataReader`] is built once per refresh: it reads and parses the
//! whole document up front and then answers queries from the parsed content.
//! Build a new instance to pick up newer metadata.

use crate::metadata::config::ReaderConfig;
use crate::metadata::element::DefaultMetadataElement;
use crate::metadata::source::MetadataSource;
use crate::metadata::stream::{read_bounded, MetadataStream, PROTECTED_LENGTH};
use crate::metadata::validator::MetadataValidator;
use crate::metadata::MetadataError;
use serde_json::{Map, Value};

const SNAPSHOT_SUFFIX: &str = " (SNAPSHOT)";

/// Parsed project metadata, ready to be queried
#[derive(Debug, Clone)]
pub struct BootMetadataReader {
    content: Map<String, Value>,
}

impl BootMetadataReader {
    /// Read and parse the document from `source` with the default 50 KiB limit
    pub fn new(source: &MetadataSource) -> Result<Self, MetadataError> {
        Self::with_limit(source, PROTECTED_LENGTH)
    }

    pub fn with_limit(source: &MetadataSource, limit: u64) -> Result<Self, MetadataError> {
        let stream = source.open()?;
        let reader = Self::from_stream(stream, limit).map_err(|e| match e {
            MetadataError::NoInput { hint, .. } => MetadataError::NoInput {
                origin: source.to_string(),
                hint: hint.or_else(|| Some("Check that the metadata file exists.".to_string())),
            },
            other => other,
        })?;
        tracing::debug!(source = %source, "loaded project metadata");
        Ok(reader)
    }

    /// Read and parse an already opened stream. `None` fails with `NoInput`.
    pub fn from_stream<S: MetadataStream>(
        stream: Option<S>,
        limit: u64,
    ) -> Result<Self, MetadataError> {
        let text = read_bounded(stream, limit)?;
        Self::parse(&text)
    }

    /// Build a reader as described by `config`, validating the document when asked to
    pub fn from_config(config: &ReaderConfig) -> Result<Self, MetadataError> {
        let source = config.to_source()?;
        let reader = Self::with_limit(&source, config.size_limit)?;
        if config.validate_schema {
            MetadataValidator::new()?.validate(&reader.content)?;
        }
        Ok(reader)
    }

    /// Parse a document held in memory. The top-level value must be an object.
    ///
    /// No size bound applies here; public constructors go through [`read_bounded`].
    pub(crate) fn parse(text: &str) -> Result<Self, MetadataError> {
        let content: Map<String, Value> =
            serde_json::from_str(text).map_err(MetadataError::MalformedJson)?;
        Ok(Self { content })
    }

    pub fn content(&self) -> &Map<String, Value> {
        &self.content
    }

    /// Return the boot versions listed under `projectReleases`, in document order
    pub fn boot_versions(&self) -> Result<Vec<DefaultMetadataElement>, MetadataError> {
        let releases = get_array(&self.content, "projectReleases", "")?;
        releases
            .iter()
            .enumerate()
            .map(|(i, value)| -> Result<DefaultMetadataElement, MetadataError> {
                let path = format!("projectReleases[{}]", i);
                let release = value.as_object().ok_or_else(|| MetadataError::FieldType {
                    path: path.clone(),
                    expected: "object",
                    found: type_name(value).to_string(),
                })?;
                let id = get_str(release, "version", &path)?;
                let name = get_str(release, "versionDisplayName", &path)?;
                let name = if get_bool(release, "snapshot", &path)? {
                    format!("{}{}", name, SNAPSHOT_SUFFIX)
                } else {
                    name.to_string()
                };
                let is_default = get_bool(release, "current", &path)?;
                Ok(DefaultMetadataElement::new(id, name, is_default))
            })
            .collect()
    }
}

fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn get_field<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a Value, MetadataError> {
    object.get(key).ok_or_else(|| MetadataError::MissingField {
        path: field_path(parent, key),
    })
}

fn get_array<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a Vec<Value>, MetadataError> {
    let value = get_field(object, key, parent)?;
    value.as_array().ok_or_else(|| MetadataError::FieldType {
        path: field_path(parent, key),
        expected: "array",
        found: type_name(value).to_string(),
    })
}

fn get_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
    parent: &str,
) -> Result<&'a str, MetadataError> {
    let value = get_field(object, key, parent)?;
    value.as_str().ok_or_else(|| MetadataError::FieldType {
        path: field_path(parent, key),
        expected: "string",
        found: type_name(value).to_string(),
    })
}

/// Booleans may also be spelled as the strings "true" or "false".
fn get_bool(object: &Map<String, Value>, key: &str, parent: &str) -> Result<bool, MetadataError> {
    let value = get_field(object, key, parent)?;
    match value {
        Value::Bool(b) => Ok(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(MetadataError::FieldType {
            path: field_path(parent, key),
            expected: "boolean",
            found: type_name(other).to_string(),
        }),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_RELEASES: &str = r#"{"projectReleases":[
        {"version":"2.1.0","versionDisplayName":"2.1.0","snapshot":false,"current":true},
        {"version":"2.2.0","versionDisplayName":"2.2.0","snapshot":true,"current":false}
    ]}"#;

    #[test]
    fn test_boot_versions_example() {
        let reader = BootMetadataReader::parse(TWO_RELEASES).unwrap();
        assert_eq!(
            reader.boot_versions().unwrap(),
            vec![
                DefaultMetadataElement::new("2.1.0", "2.1.0", true),
                DefaultMetadataElement::new("2.2.0", "2.2.0 (SNAPSHOT)", false),
            ]
        );
    }

    #[test]
    fn test_order_is_preserved() {
        let doc = r#"{"projectReleases":[
            {"version":"1.5.9","versionDisplayName":"1.5.9","snapshot":false,"current":false},
            {"version":"2.0.0","versionDisplayName":"2.0.0","snapshot":false,"current":true},
            {"version":"1.5.9","versionDisplayName":"1.5.9","snapshot":false,"current":false}
        ]}"#;
        let ids: Vec<String> = BootMetadataReader::parse(doc)
            .unwrap()
            .boot_versions()
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["1.5.9", "2.0.0", "1.5.9"]);
    }

    #[test]
    fn test_query_is_repeatable() {
        let reader = BootMetadataReader::parse(TWO_RELEASES).unwrap();
        assert_eq!(reader.boot_versions().unwrap(), reader.boot_versions().unwrap());
    }

    #[test]
    fn test_empty_release_list() {
        let reader = BootMetadataReader::parse(r#"{"projectReleases":[]}"#).unwrap();
        assert!(reader.boot_versions().unwrap().is_empty());
    }

    #[test]
    fn test_missing_project_releases() {
        let reader = BootMetadataReader::parse(r#"{"id":"spring-boot"}"#).unwrap();
        let err = reader.boot_versions().unwrap_err();
        assert!(
            matches!(err, MetadataError::MissingField { ref path } if path == "projectReleases")
        );
    }

    #[test]
    fn test_project_releases_wrong_type() {
        let reader = BootMetadataReader::parse(r#"{"projectReleases":{}}"#).unwrap();
        let err = reader.boot_versions().unwrap_err();
        assert!(matches!(
            err,
            MetadataError::FieldType { expected: "array", .. }
        ));
    }

    #[test]
    fn test_release_must_be_object() {
        let reader = BootMetadataReader::parse(r#"{"projectReleases":["2.1.0"]}"#).unwrap();
        let err = reader.boot_versions().unwrap_err();
        match err {
            MetadataError::FieldType { path, expected, .. } => {
                assert_eq!(path, "projectReleases[0]");
                assert_eq!(expected, "object");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_version_fails_whole_query() {
        let doc = r#"{"projectReleases":[
            {"version":"2.1.0","versionDisplayName":"2.1.0","snapshot":false,"current":true},
            {"versionDisplayName":"2.2.0","snapshot":true,"current":false}
        ]}"#;
        let err = BootMetadataReader::parse(doc).unwrap().boot_versions().unwrap_err();
        match err {
            MetadataError::MissingField { path } => assert_eq!(path, "projectReleases[1].version"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_version_must_be_string() {
        let doc = r#"{"projectReleases":[
            {"version":2,"versionDisplayName":"2","snapshot":false,"current":true}
        ]}"#;
        let err = BootMetadataReader::parse(doc).unwrap().boot_versions().unwrap_err();
        assert!(matches!(
            err,
            MetadataError::FieldType { expected: "string", ref found, .. } if found == "number"
        ));
    }

    #[test]
    fn test_boolean_strings_are_accepted() {
        let doc = r#"{"projectReleases":[
            {"version":"2.2.0","versionDisplayName":"2.2.0","snapshot":"TRUE","current":"false"}
        ]}"#;
        let versions = BootMetadataReader::parse(doc).unwrap().boot_versions().unwrap();
        assert_eq!(versions[0].name, "2.2.0 (SNAPSHOT)");
        assert!(!versions[0].is_default);
    }

    #[test]
    fn test_non_boolean_flag_is_rejected() {
        let doc = r#"{"projectReleases":[
            {"version":"2.2.0","versionDisplayName":"2.2.0","snapshot":1,"current":false}
        ]}"#;
        let err = BootMetadataReader::parse(doc).unwrap().boot_versions().unwrap_err();
        assert!(matches!(
            err,
            MetadataError::FieldType { expected: "boolean", .. }
        ));
    }

    #[test]
    fn test_malformed_json_fails_construction() {
        let err = BootMetadataReader::parse(r#"{"projectReleases":["#).unwrap_err();
        assert!(matches!(err, MetadataError::MalformedJson(_)));
    }

    #[test]
    fn test_top_level_array_is_rejected() {
        let err = BootMetadataReader::parse("[]").unwrap_err();
        assert!(matches!(err, MetadataError::MalformedJson(_)));
    }

    #[test]
    fn test_bundled_metadata_loads() {
        let reader = BootMetadataReader::new(&MetadataSource::Bundled).unwrap();
        let versions = reader.boot_versions().unwrap();
        assert!(!versions.is_empty());
        assert_eq!(versions.iter().filter(|v| v.is_default).count(), 1);
    }

    #[test]
    fn test_missing_file_names_the_source() {
        let source = MetadataSource::file("no/such/metadata.json");
        let err = BootMetadataReader::new(&source).unwrap_err();
        match err {
            MetadataError::NoInput { origin, hint } => {
                assert_eq!(origin, "file no/such/metadata.json");
                assert!(hint.is_some());
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
