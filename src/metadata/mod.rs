//! # Project Metadata Layer
//!
//! This module loads a Spring project metadata document and exposes the boot
//! versions it lists.
//!
//! ## Overview
//!
//! A document is read from a [`MetadataSource`] through a size-capped stream,
//! decoded as UTF-8, parsed as a JSON object, and held by a
//! [`BootMetadataReader`] for the lifetime of one refresh.
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`reader`] | Document parsing and the boot version query |
//! | [`source`] | Bundled, file, and remote metadata sources |
//! | [`stream`] | Capped reads and scoped stream release |
//! | [`config`] | Reader configuration from defaults, env, or YAML |
//! | [`validator`] | Optional JSON Schema validation |
//! | [`element`] | The `DefaultMetadataElement` value type |
//! | [`error`] | Metadata error types |
//!
//! ## Example
//!
//! ```rust,no_run
//! use initializr_metadata::metadata::{BootMetadataReader, MetadataSource};
//!
//! fn main() -> initializr_metadata::Result<()> {
//!     let reader = BootMetadataReader::new(&MetadataSource::Bundled)?;
//!     for version in reader.boot_versions()? {
//!         println!("{} ({})", version.name, version.id);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod element;
pub mod error;
pub mod reader;
pub mod source;
pub mod stream;
pub mod validator;

pub use config::{ReaderConfig, SourceKind};
pub use element::DefaultMetadataElement;
pub use error::MetadataError;
pub use reader::BootMetadataReader;
pub use source::MetadataSource;
pub use stream::{CappedReader, MetadataStream, StreamGuard, PROTECTED_LENGTH};
pub use validator::MetadataValidator;
