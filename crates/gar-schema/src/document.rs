//! Serialized shapes of the schema documents.
//!
//! ```yaml
//! label: person
//! chunk_size: 100
//! prefix: vertex/person/
//! property_groups:
//!   - file_type: csv
//!     properties:
//!       - name: id
//!         data_type: int32
//!         is_primary: true
//! version: gar/v1
//! ```
//!
//! Edge documents list adjacency lists as `{ordered, aligned_by, file_type,
//! property_groups}`; graph documents list children either as relative paths
//! or as inline documents.

use serde::{Deserialize, Serialize};

use crate::property::{Property, PropertyGroup};
use crate::types::{AlignedBy, DataType, FileType, FormatVersion};

/// One property entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDoc {
    /// Property name.
    pub name: String,
    /// Data type tag.
    pub data_type: DataType,
    /// Primary-key flag.
    #[serde(default)]
    pub is_primary: bool,
}

/// One property group entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroupDoc {
    /// Explicit path segment; derived from property names when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Physical format.
    pub file_type: FileType,
    /// Properties in column order.
    #[serde(default)]
    pub properties: Vec<PropertyDoc>,
}

/// Vertex schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDoc {
    /// Vertex label.
    pub label: String,
    /// Vertices per chunk.
    pub chunk_size: i64,
    /// Path prefix.
    #[serde(default)]
    pub prefix: String,
    /// Property groups.
    #[serde(default)]
    pub property_groups: Vec<PropertyGroupDoc>,
    /// Format version tag.
    pub version: FormatVersion,
}

/// One adjacency-list representation entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjListDoc {
    /// Sorted within each partition.
    pub ordered: bool,
    /// Endpoint the representation is partitioned by.
    pub aligned_by: AlignedBy,
    /// Physical format of adjacency and offset chunks.
    pub file_type: FileType,
    /// Property groups scoped to this representation.
    #[serde(default)]
    pub property_groups: Vec<PropertyGroupDoc>,
}

/// Edge schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDoc {
    /// Source vertex label.
    pub src_label: String,
    /// Edge label.
    pub edge_label: String,
    /// Destination vertex label.
    pub dst_label: String,
    /// Edges per chunk.
    pub chunk_size: i64,
    /// Source vertices per chunk.
    pub src_chunk_size: i64,
    /// Destination vertices per chunk.
    pub dst_chunk_size: i64,
    /// Directed edge type.
    pub directed: bool,
    /// Path prefix.
    #[serde(default)]
    pub prefix: String,
    /// Materialized adjacency representations.
    #[serde(default)]
    pub adj_lists: Vec<AdjListDoc>,
    /// Format version tag.
    pub version: FormatVersion,
}

/// A child schema inside a graph document: a reference or an inline document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChildEntry<T> {
    /// Path of a separately stored document, relative to the graph document.
    Path(String),
    /// Embedded document.
    Inline(T),
}

/// Graph schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDoc {
    /// Graph name.
    pub name: String,
    /// Absolute prefix of the graph's data.
    #[serde(default)]
    pub prefix: String,
    /// Vertex schemas.
    #[serde(default)]
    pub vertices: Vec<ChildEntry<VertexDoc>>,
    /// Edge schemas.
    #[serde(default)]
    pub edges: Vec<ChildEntry<EdgeDoc>>,
    /// Format version tag.
    pub version: FormatVersion,
}

impl From<&Property> for PropertyDoc {
    fn from(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            data_type: property.data_type.clone(),
            is_primary: property.is_primary,
        }
    }
}

impl From<PropertyDoc> for Property {
    fn from(doc: PropertyDoc) -> Self {
        Self {
            name: doc.name,
            data_type: doc.data_type,
            is_primary: doc.is_primary,
        }
    }
}

impl From<&PropertyGroup> for PropertyGroupDoc {
    fn from(group: &PropertyGroup) -> Self {
        Self {
            prefix: group.prefix().map(str::to_string),
            file_type: group.file_type(),
            properties: group.properties().iter().map(PropertyDoc::from).collect(),
        }
    }
}

impl From<PropertyGroupDoc> for PropertyGroup {
    fn from(doc: PropertyGroupDoc) -> Self {
        let properties = doc.properties.into_iter().map(Property::from).collect();
        let group = PropertyGroup::new(properties, doc.file_type);
        match doc.prefix {
            Some(prefix) => group.with_prefix(prefix),
            None => group,
        }
    }
}

pub(crate) fn groups_to_docs(groups: &[PropertyGroup]) -> Vec<PropertyGroupDoc> {
    groups.iter().map(PropertyGroupDoc::from).collect()
}

pub(crate) fn groups_from_docs(docs: Vec<PropertyGroupDoc>) -> Vec<PropertyGroup> {
    docs.into_iter().map(PropertyGroup::from).collect()
}
