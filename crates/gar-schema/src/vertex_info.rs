//! Schema for one vertex label.
//!
//! A published [`VertexInfo`] is immutable: growth goes through
//! [`VertexInfo::extend`], which returns a new value and leaves the receiver
//! untouched. In-progress schemas are assembled with [`VertexInfoBuilder`].

use std::collections::HashMap;

use tracing::debug;

use crate::document::{groups_from_docs, groups_to_docs, VertexDoc};
use crate::error::{Error, Result};
use crate::info::SchemaInfo;
use crate::property::{check_addition, check_groups, Property, PropertyGroup};
use crate::types::{DataType, FormatVersion};

/// Schema for one vertex label.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexInfo {
    label: String,
    chunk_size: i64,
    prefix: String,
    version: FormatVersion,
    property_groups: Vec<PropertyGroup>,
    /// property name -> index into `property_groups`
    property_index: HashMap<String, usize>,
}

impl VertexInfo {
    /// Creates a vertex schema with no property groups.
    ///
    /// An empty `prefix` defaults to `<label>/`; a non-empty prefix gets a
    /// trailing `/` if it lacks one.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        chunk_size: i64,
        version: FormatVersion,
        prefix: impl Into<String>,
    ) -> Self {
        let label = label.into();
        let prefix = normalize_prefix(prefix.into(), || format!("{label}/"));
        Self {
            label,
            chunk_size,
            prefix,
            version,
            property_groups: Vec::new(),
            property_index: HashMap::new(),
        }
    }

    /// Rebuilds a schema from already-decoded parts without checking them.
    pub(crate) fn from_parts(
        label: String,
        chunk_size: i64,
        version: FormatVersion,
        prefix: String,
        property_groups: Vec<PropertyGroup>,
    ) -> Self {
        let mut info = Self::new(label, chunk_size, version, prefix);
        for group in property_groups {
            info.push_group(group);
        }
        info
    }

    /// Returns the vertex label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of vertices per chunk.
    #[must_use]
    pub fn chunk_size(&self) -> i64 {
        self.chunk_size
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

    /// Returns the property groups in registration order.
    #[must_use]
    pub fn property_groups(&self) -> &[PropertyGroup] {
        &self.property_groups
    }

    /// Returns true if any group holds a property with this name.
    #[must_use]
    pub fn contain_property(&self, name: &str) -> bool {
        self.property_index.contains_key(name)
    }

    /// Returns true if `group` is one of this schema's groups.
    #[must_use]
    pub fn contain_property_group(&self, group: &PropertyGroup) -> bool {
        self.property_groups.iter().any(|g| g == group)
    }

    /// Returns the group holding the named property.
    pub fn get_property_group(&self, name: &str) -> Result<&PropertyGroup> {
        self.property_index
            .get(name)
            .map(|&idx| &self.property_groups[idx])
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Returns the named property.
    pub fn get_property(&self, name: &str) -> Result<&Property> {
        self.get_property_group(name)?
            .get(name)
            .ok_or_else(|| Error::PropertyNotFound(name.to_string()))
    }

    /// Returns the data type of the named property.
    pub fn get_property_type(&self, name: &str) -> Result<&DataType> {
        Ok(&self.get_property(name)?.data_type)
    }

    /// Returns whether the named property is a primary key.
    ///
    /// Fails with `PropertyNotFound` rather than answering `false` for an
    /// unknown name.
    pub fn is_primary_key(&self, name: &str) -> Result<bool> {
        Ok(self.get_property(name)?.is_primary)
    }

    /// Returns the first primary-key property, in group then column order.
    #[must_use]
    pub fn primary_key(&self) -> Option<&Property> {
        self.property_groups
            .iter()
            .flat_map(PropertyGroup::properties)
            .find(|p| p.is_primary)
    }

    /// Returns a new schema with `group` appended.
    ///
    /// # Errors
    ///
    /// `EmptyGroup` for a group without properties, `DuplicatePropertyName`
    /// if any of its names is already used by this schema.
    pub fn extend(&self, group: PropertyGroup) -> Result<VertexInfo> {
        check_addition(&self.property_groups, &group)?;
        let mut extended = self.clone();
        debug!(label = %self.label, segment = %group.segment(), "extending vertex info");
        extended.push_group(group);
        Ok(extended)
    }

    /// Returns a builder seeded with a copy of this schema.
    #[must_use]
    pub fn to_builder(&self) -> VertexInfoBuilder {
        VertexInfoBuilder {
            draft: self.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Path derivation
    // ------------------------------------------------------------------

    /// Directory holding the chunks of `group`: `<prefix><segment>/`.
    pub fn get_path_prefix(&self, group: &PropertyGroup) -> Result<String> {
        if !self.contain_property_group(group) {
            return Err(Error::PropertyGroupNotFound(group.segment()));
        }
        Ok(format!("{}{}/", self.prefix, group.segment()))
    }

    /// Chunk file of `group`: `<prefix><segment>/chunk<chunk_index>`.
    ///
    /// # Errors
    ///
    /// `PropertyGroupNotFound` for a foreign group, `InvalidChunkIndex` for a
    /// negative index.
    pub fn get_file_path(&self, group: &PropertyGroup, chunk_index: i64) -> Result<String> {
        let dir = self.get_path_prefix(group)?;
        if chunk_index < 0 {
            return Err(Error::InvalidChunkIndex(chunk_index));
        }
        Ok(format!("{dir}chunk{chunk_index}"))
    }

    /// File recording the total vertex count: `<prefix>vertex_count`.
    #[must_use]
    pub fn get_vertices_num_file_path(&self) -> String {
        format!("{}vertex_count", self.prefix)
    }

    fn push_group(&mut self, group: PropertyGroup) {
        let idx = self.property_groups.len();
        for property in group.properties() {
            self.property_index
                .entry(property.name.clone())
                .or_insert(idx);
        }
        self.property_groups.push(group);
    }
}

impl SchemaInfo for VertexInfo {
    type Document = VertexDoc;

    const KIND: &'static str = "vertex";

    fn ident(&self) -> String {
        self.label.clone()
    }

    /// Checks label, chunk size and property-name uniqueness.
    fn validate(&self) -> Result<()> {
        if self.label.is_empty() {
            return Err(Error::InvalidLabel("vertex label is empty".to_string()));
        }
        if self.chunk_size <= 0 {
            return Err(Error::InvalidChunkSize {
                field: "chunk_size",
                value: self.chunk_size,
            });
        }
        check_groups(&self.property_groups)
    }

    fn to_document(&self) -> VertexDoc {
        VertexDoc {
            label: self.label.clone(),
            chunk_size: self.chunk_size,
            prefix: self.prefix.clone(),
            property_groups: groups_to_docs(&self.property_groups),
            version: self.version,
        }
    }

    fn from_document(doc: VertexDoc) -> Result<Self> {
        Ok(Self::from_parts(
            doc.label,
            doc.chunk_size,
            doc.version,
            doc.prefix,
            groups_from_docs(doc.property_groups),
        ))
    }
}

/// Mutable draft of a [`VertexInfo`] that has not been published yet.
#[derive(Debug, Clone)]
pub struct VertexInfoBuilder {
    draft: VertexInfo,
}

impl VertexInfoBuilder {
    /// Starts a draft with no property groups.
    #[must_use]
    pub fn new(
        label: impl Into<String>,
        chunk_size: i64,
        version: FormatVersion,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            draft: VertexInfo::new(label, chunk_size, version, prefix),
        }
    }

    /// Appends `group` to the draft in place.
    ///
    /// # Errors
    ///
    /// Same as [`VertexInfo::extend`]; the draft is unchanged on failure.
    pub fn add_property_group(&mut self, group: PropertyGroup) -> Result<&mut Self> {
        check_addition(&self.draft.property_groups, &group)?;
        self.draft.push_group(group);
        Ok(self)
    }

    /// Read access to the draft.
    #[must_use]
    pub fn draft(&self) -> &VertexInfo {
        &self.draft
    }

    /// Validates and publishes the draft.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn build(self) -> Result<VertexInfo> {
        self.draft.validate()?;
        Ok(self.draft)
    }
}

pub(crate) fn normalize_prefix(prefix: String, default: impl FnOnce() -> String) -> String {
    if prefix.is_empty() {
        default()
    } else if prefix.ends_with('/') {
        prefix
    } else {
        format!("{prefix}/")
    }
}
