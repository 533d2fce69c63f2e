//! # GAR Schema
//!
//! Schema objects and deterministic path derivation for chunked on-disk graph
//! archives.
//!
//! A graph archive stores vertices and edges as chunked columnar files. This
//! crate describes that layout: which properties exist, how they are grouped
//! into files, which adjacency representations are materialized, and where
//! every chunk lives. It never reads or writes graph data itself.
//!
//! ## Features
//!
//! - **Typed schemas**: [`VertexInfo`], [`EdgeInfo`] and [`GraphInfo`]
//! - **Immutable extension**: published schemas grow through `extend*` and
//!   are assembled in place through builders
//! - **Path derivation**: pure functions from schema plus indices to chunk
//!   paths
//! - **Persistence**: YAML documents through a pluggable [`FileSystem`]
//!
//! ## Quick Start
//!
//! ```rust
//! use gar_schema::{
//!     DataType, FileType, FormatVersion, Property, PropertyGroup, SchemaInfo,
//!     VertexInfoBuilder,
//! };
//!
//! let id = PropertyGroup::new(
//!     vec![Property::primary("id", DataType::Int32)],
//!     FileType::Csv,
//! );
//! let mut builder = VertexInfoBuilder::new("person", 100, FormatVersion::V1, "vertex/person/");
//! builder.add_property_group(id.clone())?;
//! let person = builder.build()?;
//!
//! assert!(person.is_validated());
//! assert_eq!(person.get_file_path(&id, 0)?, "vertex/person/id/chunk0");
//! # Ok::<(), gar_schema::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod document;
#[cfg(test)]
mod document_tests;
pub mod edge_info;
pub mod error;
#[cfg(test)]
mod error_tests;
pub mod fs;
#[cfg(test)]
mod fs_tests;
pub mod graph_info;
pub mod info;
pub mod property;
pub mod types;
pub mod vertex_info;

pub use config::{ConfigError, DefaultsConfig, GarConfig, LoggingConfig, SaveOptions, StorageConfig};
pub use edge_info::{AdjListInfo, EdgeInfo, EdgeInfoBuilder, EdgeKey};
pub use error::{Error, Result};
pub use fs::{FileSystem, LocalFileSystem, MemoryFileSystem};
pub use graph_info::{GraphInfo, GraphInfoBuilder};
pub use info::SchemaInfo;
pub use property::{Property, PropertyGroup};
pub use types::{AdjListType, AlignedBy, DataType, FileType, FormatVersion};
pub use vertex_info::{VertexInfo, VertexInfoBuilder};
