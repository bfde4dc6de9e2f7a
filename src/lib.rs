//! # initializr-metadata
//!
//! Bounded loader for Spring Boot project metadata.
//!
//! ## Overview
//!
//! Reads the project metadata document (bundled with the crate, from a local
//! file, or from a remote endpoint such as `spring.io/project_metadata`),
//! enforces a 50 KiB size bound on the raw stream, and turns the
//! `projectReleases` array into an ordered list of
//! [`DefaultMetadataElement`]s suitable for a version picker.
//!
//! Construction either yields a fully parsed reader or fails with a
//! [`MetadataError`]; there is no partially initialized state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use initializr_metadata::{BootMetadataReader, ReaderConfig};
//!
//! fn main() -> initializr_metadata::Result<()> {
//!     let config = ReaderConfig::from_env()?;
//!     let reader = BootMetadataReader::from_config(&config)?;
//!     let default = reader.boot_versions()?.into_iter().find(|v| v.is_default);
//!     println!("default boot version: {:?}", default.map(|v| v.id));
//!     Ok(())
//! }
//! ```

pub mod metadata;

pub use metadata::{
    BootMetadataReader, DefaultMetadataElement, MetadataError, MetadataSource, ReaderConfig,
    SourceKind,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, MetadataError>;
