//! Schema for one `(src, edge, dst)` triple.
//!
//! Each of the four [`AdjListType`] representations is schematized on its own:
//! it has a file type and an ordered list of property groups, and property
//! names only need to be unique within one representation.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::document::{groups_from_docs, groups_to_docs, AdjListDoc, EdgeDoc};
use crate::error::{Error, Result};
use crate::info::SchemaInfo;
use crate::property::{check_addition, check_groups, Property, PropertyGroup};
use crate::types::{AdjListType, DataType, FileType, FormatVersion};
use crate::vertex_info::normalize_prefix;

/// Identity of an edge type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    /// Source vertex label.
    pub src_label: String,
    /// Edge label.
    pub edge_label: String,
    /// Destination vertex label.
    pub dst_label: String,
}

impl EdgeKey {
    /// Creates a key from its three labels.
    #[must_use]
    pub fn new(
        src_label: impl Into<String>,
        edge_label: impl Into<String>,
        dst_label: impl Into<String>,
    ) -> Self {
        Self {
            src_label: src_label.into(),
            edge_label: edge_label.into(),
            dst_label: dst_label.into(),
        }
    }
}

/// Renders as `src_edge_dst`, the default edge directory name.
impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.src_label, self.edge_label, self.dst_label)
    }
}

/// One materialized adjacency-list representation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjListInfo {
    file_type: FileType,
    property_groups: Vec<PropertyGroup>,
}

impl AdjListInfo {
    /// Returns the file type of adjacency and offset chunks.
    #[must_use]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Returns the property groups scoped to this representation.
    #[must_use]
    pub fn property_groups(&self) -> &[PropertyGroup] {
        &self.property_groups
    }

    fn find_group(&self, name: &str) -> Option<&PropertyGroup> {
        self.property_groups.iter().find(|g| g.contains(name))
    }
}

/// Schema for one edge type.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeInfo {
    key: EdgeKey,
    chunk_size: i64,
    src_chunk_size: i64,
    dst_chunk_size: i64,
    directed: bool,
    prefix: String,
    version: FormatVersion,
    adj_lists: BTreeMap<AdjListType, AdjListInfo>,
}

impl EdgeInfo {
    /// Creates an edge schema with no adjacency lists.
    ///
    /// An empty `prefix` defaults to `<src>_<edge>_<dst>/`.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        src_label: impl Into<String>,
        edge_label: impl Into<String>,
        dst_label: impl Into<String>,
        chunk_size: i64,
        src_chunk_size: i64,
        dst_chunk_size: i64,
        directed: bool,
        version: FormatVersion,
        prefix: impl Into<String>,
    ) -> Self {
        let key = EdgeKey::new(src_label, edge_label, dst_label);
        let prefix = normalize_prefix(prefix.into(), || format!("{key}/"));
        Self {
            key,
            chunk_size,
            src_chunk_size,
            dst_chunk_size,
            directed,
            prefix,
            version,
            adj_lists: BTreeMap::new(),
        }
    }

    /// Returns the triple key.
    #[must_use]
    pub fn key(&self) -> &EdgeKey {
        &self.key
    }

    /// Returns the source vertex label.
    #[must_use]
    pub fn src_label(&self) -> &str {
        &self.key.src_label
    }

    /// Returns the edge label.
    #[must_use]
    pub fn edge_label(&self) -> &str {
        &self.key.edge_label
    }

    /// Returns the destination vertex label.
    #[must_use]
    pub fn dst_label(&self) -> &str {
        &self.key.dst_label
    }

    /// Returns the number of edges per chunk.
    #[must_use]
    pub fn chunk_size(&self) -> i64 {
        self.chunk_size
    }

    /// Returns the source vertex chunk size.
    #[must_use]
    pub fn src_chunk_size(&self) -> i64 {
        self.src_chunk_size
    }

    /// Returns the destination vertex chunk size.
    #[must_use]
    pub fn dst_chunk_size(&self) -> i64 {
        self.dst_chunk_size
    }

    /// Returns whether the edge type is directed.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Returns the path prefix, always ending in `/`.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the format version.
    #[must_use]
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Returns the materialized representations in canonical order.
    pub fn adj_list_types(&self) -> impl Iterator<Item = AdjListType> + '_ {
        self.adj_lists.keys().copied()
    }

    /// Returns the representation, if materialized.
    #[must_use]
    pub fn adj_list(&self, adj_list_type: AdjListType) -> Option<&AdjListInfo> {
        self.adj_lists.get(&adj_list_type)
    }

    /// Returns true if the representation is materialized.
    #[must_use]
    pub fn contain_adj_list(&self, adj_list_type: AdjListType) -> bool {
        self.adj_lists.contains_key(&adj_list_type)
    }

    fn require_adj_list(&self, adj_list_type: AdjListType) -> Result<&AdjListInfo> {
        self.adj_lists
            .get(&adj_list_type)
            .ok_or(Error::AdjListTypeNotFound(adj_list_type))
    }

    /// Returns the file type of the representation.
    pub fn get_file_type(&self, adj_list_type: AdjListType) -> Result<FileType> {
        Ok(self.require_adj_list(adj_list_type)?.file_type)
    }

    /// Returns the property groups of the representation.
    pub fn get_property_groups(&self, adj_list_type: AdjListType) -> Result<&[PropertyGroup]> {
        Ok(&self.require_adj_list(adj_list_type)?.property_groups)
    }

    /// Returns the group holding `name` within the representation.
    pub fn get_property_group(
        &self,
        name: &str,
        adj_list_type: AdjListType,
    ) -> Result<&PropertyGroup> {
        self.require_adj_list(adj_list_type)?
            .find_group(name)
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Returns true if `group` belongs to the representation.
    #[must_use]
    pub fn contain_property_group(&self, group: &PropertyGroup, adj_list_type: AdjListType) -> bool {
        self.adj_lists
            .get(&adj_list_type)
            .is_some_and(|adj| adj.property_groups.iter().any(|g| g == group))
    }

    /// Returns true if any representation has a property named `name`.
    #[must_use]
    pub fn contain_property(&self, name: &str) -> bool {
        self.adj_lists.values().any(|adj| adj.find_group(name).is_some())
    }

    /// Returns true if the representation has a property named `name`.
    #[must_use]
    pub fn contain_property_in(&self, name: &str, adj_list_type: AdjListType) -> bool {
        self.adj_lists
            .get(&adj_list_type)
            .is_some_and(|adj| adj.find_group(name).is_some())
    }

    /// Returns the named property from the first representation (canonical
    /// order) that has it.
    pub fn get_property(&self, name: &str) -> Result<&Property> {
        self.adj_lists
            .values()
            .find_map(|adj| adj.find_group(name).and_then(|g| g.get(name)))
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Returns the data type of the named property.
    pub fn get_property_type(&self, name: &str) -> Result<&DataType> {
        Ok(&self.get_property(name)?.data_type)
    }

    /// Returns the primary-key flag of the named property.
    pub fn is_primary_key(&self, name: &str) -> Result<bool> {
        Ok(self.get_property(name)?.is_primary)
    }

    // ------------------------------------------------------------------
    // Extension
    // ------------------------------------------------------------------

    /// Returns a new schema with an empty representation registered.
    ///
    /// # Errors
    ///
    /// `AdjListTypeAlreadyExists` if the representation is present.
    pub fn extend_adj_list(&self, adj_list_type: AdjListType, file_type: FileType) -> Result<EdgeInfo> {
        let mut extended = self.clone();
        extended.insert_adj_list(adj_list_type, file_type)?;
        debug!(edge = %self.key, adj_list = %adj_list_type, "extending edge info with adj list");
        Ok(extended)
    }

    /// Returns a new schema with `group` appended to the representation.
    ///
    /// # Errors
    ///
    /// `AdjListTypeNotFound`, `EmptyGroup` or `DuplicatePropertyName`.
    pub fn extend_property_group(
        &self,
        group: PropertyGroup,
        adj_list_type: AdjListType,
    ) -> Result<EdgeInfo> {
        let mut extended = self.clone();
        debug!(
            edge = %self.key,
            adj_list = %adj_list_type,
            segment = %group.segment(),
            "extending edge info with property group"
        );
        extended.insert_property_group(group, adj_list_type)?;
        Ok(extended)
    }

    /// Returns a builder seeded with a copy of this schema.
    #[must_use]
    pub fn to_builder(&self) -> EdgeInfoBuilder {
        EdgeInfoBuilder {
            draft: self.clone(),
        }
    }

    fn insert_adj_list(&mut self, adj_list_type: AdjListType, file_type: FileType) -> Result<()> {
        if self.adj_lists.contains_key(&adj_list_type) {
            return Err(Error::AdjListTypeAlreadyExists(adj_list_type));
        }
        self.adj_lists.insert(
            adj_list_type,
            AdjListInfo {
                file_type,
                property_groups: Vec::new(),
            },
        );
        Ok(())
    }

    fn insert_property_group(&mut self, group: PropertyGroup, adj_list_type: AdjListType) -> Result<()> {
        let adj = self
            .adj_lists
            .get_mut(&adj_list_type)
            .ok_or(Error::AdjListTypeNotFound(adj_list_type))?;
        check_addition(&adj.property_groups, &group)?;
        adj.property_groups.push(group);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Path derivation
    // ------------------------------------------------------------------

    fn type_dir(&self, adj_list_type: AdjListType) -> Result<String> {
        self.require_adj_list(adj_list_type)?;
        Ok(format!("{}{}/", self.prefix, adj_list_type.as_str()))
    }

    /// Directory of adjacency chunks: `<prefix><type>/adj_list/`.
    pub fn get_adj_list_path_prefix(&self, adj_list_type: AdjListType) -> Result<String> {
        Ok(format!("{}adj_list/", self.type_dir(adj_list_type)?))
    }

    /// Adjacency chunk:
    /// `<prefix><type>/adj_list/part<part_index>/chunk<chunk_index>`.
    pub fn get_adj_list_file_path(
        &self,
        part_index: i64,
        chunk_index: i64,
        adj_list_type: AdjListType,
    ) -> Result<String> {
        let dir = self.get_adj_list_path_prefix(adj_list_type)?;
        check_indices(part_index, chunk_index)?;
        Ok(format!("{dir}part{part_index}/chunk{chunk_index}"))
    }

    /// Directory of offset chunks: `<prefix><type>/offset/`.
    pub fn get_offset_path_prefix(&self, adj_list_type: AdjListType) -> Result<String> {
        Ok(format!("{}offset/", self.type_dir(adj_list_type)?))
    }

    /// Offset chunk: `<prefix><type>/offset/chunk<chunk_index>`.
    ///
    /// Offsets are indexed by the aligned vertex chunk, so there is no
    /// partition component.
    pub fn get_adj_list_offset_file_path(
        &self,
        chunk_index: i64,
        adj_list_type: AdjListType,
    ) -> Result<String> {
        let dir = self.get_offset_path_prefix(adj_list_type)?;
        if chunk_index < 0 {
            return Err(Error::InvalidChunkIndex(chunk_index));
        }
        Ok(format!("{dir}chunk{chunk_index}"))
    }

    /// Directory of a property group's chunks: `<prefix><type>/<segment>/`.
    pub fn get_property_group_path_prefix(
        &self,
        group: &PropertyGroup,
        adj_list_type: AdjListType,
    ) -> Result<String> {
        let dir = self.type_dir(adj_list_type)?;
        if !self.contain_property_group(group, adj_list_type) {
            return Err(Error::PropertyGroupNotFound(group.segment()));
        }
        Ok(format!("{dir}{}/", group.segment()))
    }

    /// Property chunk:
    /// `<prefix><type>/<segment>/part<part_index>/chunk<chunk_index>`.
    pub fn get_property_file_path(
        &self,
        group: &PropertyGroup,
        adj_list_type: AdjListType,
        part_index: i64,
        chunk_index: i64,
    ) -> Result<String> {
        let dir = self.get_property_group_path_prefix(group, adj_list_type)?;
        check_indices(part_index, chunk_index)?;
        Ok(format!("{dir}part{part_index}/chunk{chunk_index}"))
    }

    /// File recording the aligned vertex count: `<prefix><type>/vertex_count`.
    pub fn get_vertices_num_file_path(&self, adj_list_type: AdjListType) -> Result<String> {
        Ok(format!("{}vertex_count", self.type_dir(adj_list_type)?))
    }

    /// File recording the edge count of one aligned vertex chunk:
    /// `<prefix><type>/edge_count<vertex_chunk_index>`.
    pub fn get_edges_num_file_path(
        &self,
        vertex_chunk_index: i64,
        adj_list_type: AdjListType,
    ) -> Result<String> {
        let dir = self.type_dir(adj_list_type)?;
        if vertex_chunk_index < 0 {
            return Err(Error::InvalidChunkIndex(vertex_chunk_index));
        }
        Ok(format!("{dir}edge_count{vertex_chunk_index}"))
    }
}

fn check_indices(part_index: i64, chunk_index: i64) -> Result<()> {
    if part_index < 0 {
        return Err(Error::InvalidPartIndex(part_index));
    }
    if chunk_index < 0 {
        return Err(Error::InvalidChunkIndex(chunk_index));
    }
    Ok(())
}

impl SchemaInfo for EdgeInfo {
    type Document = EdgeDoc;

    const KIND: &'static str = "edge";

    fn ident(&self) -> String {
        self.key.to_string()
    }

    /// Checks labels, the three chunk sizes and per-representation
    /// property-name uniqueness.
    fn validate(&self) -> Result<()> {
        for (field, label) in [
            ("src_label", &self.key.src_label),
            ("edge_label", &self.key.edge_label),
            ("dst_label", &self.key.dst_label),
        ] {
            if label.is_empty() {
                return Err(Error::InvalidLabel(format!("{field} is empty")));
            }
        }
        for (field, value) in [
            ("chunk_size", self.chunk_size),
            ("src_chunk_size", self.src_chunk_size),
            ("dst_chunk_size", self.dst_chunk_size),
        ] {
            if value <= 0 {
                return Err(Error::InvalidChunkSize { field, value });
            }
        }
        self.adj_lists
            .values()
            .try_for_each(|adj| check_groups(&adj.property_groups))
    }

    fn to_document(&self) -> EdgeDoc {
        EdgeDoc {
            src_label: self.key.src_label.clone(),
            edge_label: self.key.edge_label.clone(),
            dst_label: self.key.dst_label.clone(),
            chunk_size: self.chunk_size,
            src_chunk_size: self.src_chunk_size,
            dst_chunk_size: self.dst_chunk_size,
            directed: self.directed,
            prefix: self.prefix.clone(),
            adj_lists: self
                .adj_lists
                .iter()
                .map(|(adj_list_type, adj)| AdjListDoc {
                    ordered: adj_list_type.is_ordered(),
                    aligned_by: adj_list_type.aligned_by(),
                    file_type: adj.file_type,
                    property_groups: groups_to_docs(&adj.property_groups),
                })
                .collect(),
            version: self.version,
        }
    }

    /// A document listing the same representation twice is rejected with
    /// `AdjListTypeAlreadyExists`; everything else loads unchecked.
    fn from_document(doc: EdgeDoc) -> Result<Self> {
        let mut info = Self::new(
            doc.src_label,
            doc.edge_label,
            doc.dst_label,
            doc.chunk_size,
            doc.src_chunk_size,
            doc.dst_chunk_size,
            doc.directed,
            doc.version,
            doc.prefix,
        );
        for adj_doc in doc.adj_lists {
            let adj_list_type = AdjListType::from_parts(adj_doc.ordered, adj_doc.aligned_by);
            info.insert_adj_list(adj_list_type, adj_doc.file_type)?;
            if let Some(adj) = info.adj_lists.get_mut(&adj_list_type) {
                adj.property_groups = groups_from_docs(adj_doc.property_groups);
            }
        }
        Ok(info)
    }
}

/// Mutable draft of an [`EdgeInfo`] that has not been published yet.
#[derive(Debug, Clone)]
pub struct EdgeInfoBuilder {
    draft: EdgeInfo,
}

impl EdgeInfoBuilder {
    /// Starts a draft with no adjacency lists.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        src_label: impl Into<String>,
        edge_label: impl Into<String>,
        dst_label: impl Into<String>,
        chunk_size: i64,
        src_chunk_size: i64,
        dst_chunk_size: i64,
        directed: bool,
        version: FormatVersion,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            draft: EdgeInfo::new(
                src_label,
                edge_label,
                dst_label,
                chunk_size,
                src_chunk_size,
                dst_chunk_size,
                directed,
                version,
                prefix,
            ),
        }
    }

    /// Registers an empty representation in place.
    ///
    /// # Errors
    ///
    /// `AdjListTypeAlreadyExists` if the representation is present.
    pub fn add_adj_list(&mut self, adj_list_type: AdjListType, file_type: FileType) -> Result<&mut Self> {
        self.draft.insert_adj_list(adj_list_type, file_type)?;
        Ok(self)
    }

    /// Appends `group` to the representation in place.
    ///
    /// # Errors
    ///
    /// `AdjListTypeNotFound`, `EmptyGroup` or `DuplicatePropertyName`; the
    /// draft is unchanged on failure.
    pub fn add_property_group(
        &mut self,
        group: PropertyGroup,
        adj_list_type: AdjListType,
    ) -> Result<&mut Self> {
        self.draft.insert_property_group(group, adj_list_type)?;
        Ok(self)
    }

    /// Read access to the draft.
    #[must_use]
    pub fn draft(&self) -> &EdgeInfo {
        &self.draft
    }

    /// Validates and publishes the draft.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn build(self) -> Result<EdgeInfo> {
        self.draft.validate()?;
        Ok(self.draft)
    }
}
