//! Metadata sources: bundled resource, local file, or remote endpoint

use crate::metadata::stream::MetadataStream;
use crate::metadata::MetadataError;
use reqwest::header::ACCEPT;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use url::Url;

/// Project metadata shipped with the crate
pub const BUNDLED_METADATA: &[u8] = include_bytes!("metadata.json");

/// Canonical remote location of the Spring Boot project metadata
pub const DEFAULT_METADATA_URL: &str = "https://spring.io/project_metadata/spring-boot";

/// Where a metadata document is read from
#[derive(Debug, Clone)]
pub enum MetadataSource {
    /// The `metadata.json` compiled into this crate
    Bundled,
    /// A JSON file on the local file system
    File(PathBuf),
    /// An HTTP endpoint serving the document
    Remote {
        url: Url,
        client: reqwest::blocking::Client,
    },
}

impl MetadataSource {
    pub fn file(path: impl AsRef<Path>) -> Self {
        MetadataSource::File(path.as_ref().to_path_buf())
    }

    /// Remote source using a preconfigured client
    pub fn remote(client: reqwest::blocking::Client, url: &str) -> Result<Self, MetadataError> {
        let url = Url::parse(url).map_err(|e| {
            MetadataError::configuration(format!("Invalid metadata URL '{}': {}", url, e))
                .with_hint("Use an absolute http:// or https:// URL.")
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(MetadataError::configuration(format!(
                "Unsupported metadata URL scheme '{}'",
                url.scheme()
            )));
        }
        Ok(MetadataSource::Remote { url, client })
    }

    /// Open the source. `Ok(None)` means the source has nothing to read.
    pub fn open(&self) -> Result<Option<Box<dyn MetadataStream>>, MetadataError> {
        tracing::debug!(source = %self, "opening metadata source");
        match self {
            MetadataSource::Bundled => {
                let stream: Box<dyn MetadataStream> = Box::new(Cursor::new(BUNDLED_METADATA));
                Ok(Some(stream))
            }
            MetadataSource::File(path) => match std::fs::File::open(path) {
                Ok(file) => {
                    let stream: Box<dyn MetadataStream> = Box::new(file);
                    Ok(Some(stream))
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(MetadataError::ReadFailure(e)),
            },
            MetadataSource::Remote { url, client } => {
                let response = client
                    .get(url.clone())
                    .header(ACCEPT, "application/json")
                    .send()
                    .map_err(|e| MetadataError::Remote {
                        url: url.to_string(),
                        reason: format!("HTTP request failed: {}", e),
                        hint: Some(
                            "Check your internet connection and verify the URL is accessible."
                                .to_string(),
                        ),
                    })?;

                if !response.status().is_success() {
                    return Err(MetadataError::Remote {
                        url: url.to_string(),
                        reason: format!("HTTP {}", response.status()),
                        hint: Some("Verify the metadata endpoint URL.".to_string()),
                    });
                }
                let stream: Box<dyn MetadataStream> = Box::new(response);
                Ok(Some(stream))
            }
        }
    }
}

impl fmt::Display for MetadataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataSource::Bundled => write!(f, "bundled metadata.json"),
            MetadataSource::File(path) => write!(f, "file {}", path.display()),
            MetadataSource::Remote { url, .. } => write!(f, "remote {}", url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_bundled_source_always_opens() {
        let mut stream = MetadataSource::Bundled.open().unwrap().unwrap();
        let mut text = String::new();
        stream.read_to_string(&mut text).unwrap();
        assert!(text.contains("projectReleases"));
    }

    #[test]
    fn test_missing_file_opens_to_none() {
        let source = MetadataSource::file("does/not/exist/metadata.json");
        assert!(source.open().unwrap().is_none());
    }

    #[test]
    fn test_remote_rejects_invalid_url() {
        let client = reqwest::blocking::Client::new();
        let err = MetadataSource::remote(client, "not a url").unwrap_err();
        assert!(matches!(err, MetadataError::Configuration { .. }));
    }

    #[test]
    fn test_remote_rejects_non_http_scheme() {
        let client = reqwest::blocking::Client::new();
        let err = MetadataSource::remote(client, "ftp://spring.io/metadata").unwrap_err();
        assert!(matches!(err, MetadataError::Configuration { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(MetadataSource::Bundled.to_string(), "bundled metadata.json");
        let client = reqwest::blocking::Client::new();
        let remote = MetadataSource::remote(client, DEFAULT_METADATA_URL).unwrap();
        assert_eq!(
            remote.to_string(),
            "remote https://spring.io/project_metadata/spring-boot"
        );
    }
}
