//! Top-level graph schema.
//!
//! A [`GraphInfo`] owns the vertex and edge schemas registered into it and
//! records where separately persisted child documents live. Each recorded
//! path is bound to the label (or triple) of the child it holds, so a dump can
//! mix path references and embedded children. Child documents referenced by
//! path are resolved relative to the graph document when the graph is loaded.

use std::hash::Hash;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::document::{ChildEntry, GraphDoc};
use crate::edge_info::{EdgeInfo, EdgeKey};
use crate::error::{Error, Result};
use crate::fs::{resolve_relative, FileSystem};
use crate::info::{read_text, SchemaInfo};
use crate::property::PropertyGroup;
use crate::types::{AdjListType, FormatVersion};
use crate::vertex_info::VertexInfo;

/// Schema of a whole graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphInfo {
    name: String,
    version: FormatVersion,
    prefix: String,
    vertex_infos: IndexMap<String, VertexInfo>,
    edge_infos: IndexMap<EdgeKey, EdgeInfo>,
    /// Child path to the label it holds; `None` until resolved.
    vertex_paths: IndexMap<String, Option<String>>,
    edge_paths: IndexMap<String, Option<EdgeKey>>,
}

impl GraphInfo {
    /// Creates an empty graph schema.
    #[must_use]
    pub fn new(name: impl Into<String>, version: FormatVersion, prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version,
            prefix: prefix.into(),
            vertex_infos: IndexMap::new(),
            edge_infos: IndexMap::new(),
            vertex_paths: IndexMap::new(),
            edge_paths: IndexMap::new(),
        }
    }

    /// Returns the graph name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the format version.
    #[must_use]
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Returns the absolute data prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns registered vertex schemas keyed by label, in registration order.
    #[must_use]
    pub fn vertex_infos(&self) -> &IndexMap<String, VertexInfo> {
        &self.vertex_infos
    }

    /// Returns registered edge schemas keyed by triple, in registration order.
    #[must_use]
    pub fn edge_infos(&self) -> &IndexMap<EdgeKey, EdgeInfo> {
        &self.edge_infos
    }

    /// Returns the recorded vertex document paths.
    #[must_use]
    pub fn vertex_info_paths(&self) -> Vec<&str> {
        self.vertex_paths.keys().map(String::as_str).collect()
    }

    /// Returns the recorded edge document paths.
    #[must_use]
    pub fn edge_info_paths(&self) -> Vec<&str> {
        self.edge_paths.keys().map(String::as_str).collect()
    }

    /// Returns the path recorded for the vertex document of `label`.
    #[must_use]
    pub fn vertex_info_path(&self, label: &str) -> Option<&str> {
        bound_path(&self.vertex_paths, &label.to_string())
    }

    /// Returns the path recorded for the edge document of a triple.
    #[must_use]
    pub fn edge_info_path(
        &self,
        src_label: &str,
        edge_label: &str,
        dst_label: &str,
    ) -> Option<&str> {
        bound_path(&self.edge_paths, &EdgeKey::new(src_label, edge_label, dst_label))
    }

    /// Looks up a vertex schema by label.
    pub fn get_vertex_info(&self, label: &str) -> Result<&VertexInfo> {
        self.vertex_infos
            .get(label)
            .ok_or_else(|| Error::VertexNotFound(label.to_string()))
    }

    /// Looks up an edge schema by its triple.
    pub fn get_edge_info(&self, src_label: &str, edge_label: &str, dst_label: &str) -> Result<&EdgeInfo> {
        let key = EdgeKey::new(src_label, edge_label, dst_label);
        self.edge_infos
            .get(&key)
            .ok_or_else(|| Error::EdgeNotFound(key.to_string()))
    }

    /// Returns the group holding `property` in the vertex schema for `label`.
    pub fn get_vertex_property_group(&self, label: &str, property: &str) -> Result<&PropertyGroup> {
        self.get_vertex_info(label)?.get_property_group(property)
    }

    /// Returns the group holding `property` under one representation of an
    /// edge schema.
    pub fn get_edge_property_group(
        &self,
        src_label: &str,
        edge_label: &str,
        dst_label: &str,
        property: &str,
        adj_list_type: AdjListType,
    ) -> Result<&PropertyGroup> {
        self.get_edge_info(src_label, edge_label, dst_label)?
            .get_property_group(property, adj_list_type)
    }

    /// Returns a new graph with `vertex_info` registered.
    ///
    /// # Errors
    ///
    /// `DuplicateLabel` if the label is already registered.
    pub fn extend_vertex(&self, vertex_info: VertexInfo) -> Result<GraphInfo> {
        let mut extended = self.clone();
        extended.insert_vertex(vertex_info)?;
        Ok(extended)
    }

    /// Returns a new graph with `edge_info` registered.
    ///
    /// # Errors
    ///
    /// `DuplicateLabel` if the triple is already registered.
    pub fn extend_edge(&self, edge_info: EdgeInfo) -> Result<GraphInfo> {
        let mut extended = self.clone();
        extended.insert_edge(edge_info)?;
        Ok(extended)
    }

    /// Returns a builder seeded with a copy of this graph.
    #[must_use]
    pub fn to_builder(&self) -> GraphInfoBuilder {
        GraphInfoBuilder {
            draft: self.clone(),
        }
    }

    /// Checks that every edge endpoint names a registered vertex label.
    ///
    /// # Errors
    ///
    /// `UnknownVertexLabel` for the first dangling endpoint.
    pub fn check_references(&self) -> Result<()> {
        for edge in self.edge_infos.values() {
            for label in [edge.src_label(), edge.dst_label()] {
                if !self.vertex_infos.contains_key(label) {
                    return Err(Error::UnknownVertexLabel {
                        edge: edge.key().to_string(),
                        label: label.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks every child schema, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// The first child error, unchanged.
    pub fn validate_children(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::InvalidLabel("graph name is empty".to_string()));
        }
        for vertex in self.vertex_infos.values() {
            vertex.validate()?;
        }
        for edge in self.edge_infos.values() {
            edge.validate()?;
        }
        Ok(())
    }

    fn insert_vertex(&mut self, vertex_info: VertexInfo) -> Result<()> {
        if self.vertex_infos.contains_key(vertex_info.label()) {
            return Err(Error::DuplicateLabel(vertex_info.label().to_string()));
        }
        debug!(graph = %self.name, label = %vertex_info.label(), "registering vertex info");
        self.vertex_infos
            .insert(vertex_info.label().to_string(), vertex_info);
        Ok(())
    }

    fn insert_edge(&mut self, edge_info: EdgeInfo) -> Result<()> {
        if self.edge_infos.contains_key(edge_info.key()) {
            return Err(Error::DuplicateLabel(edge_info.key().to_string()));
        }
        debug!(graph = %self.name, edge = %edge_info.key(), "registering edge info");
        self.edge_infos.insert(edge_info.key().clone(), edge_info);
        Ok(())
    }

    /// Decodes a graph document, resolving path entries through `fs`
    /// relative to `base`.
    fn from_document_resolved(doc: GraphDoc, fs: Option<(&dyn FileSystem, &str)>) -> Result<Self> {
        let mut graph = Self::new(doc.name, doc.version, doc.prefix);
        for entry in doc.vertices {
            match entry {
                ChildEntry::Inline(vertex_doc) => {
                    graph.insert_vertex(VertexInfo::from_document(vertex_doc)?)?;
                }
                ChildEntry::Path(path) => {
                    let mut label = None;
                    if let Some((fs, base)) = fs {
                        let text = read_text(fs, &resolve_relative(base, &path))?;
                        let vertex = VertexInfo::from_yaml(&text)?;
                        label = Some(vertex.label().to_string());
                        graph.insert_vertex(vertex)?;
                    }
                    record_path(&mut graph.vertex_paths, path, label);
                }
            }
        }
        for entry in doc.edges {
            match entry {
                ChildEntry::Inline(edge_doc) => {
                    graph.insert_edge(EdgeInfo::from_document(edge_doc)?)?;
                }
                ChildEntry::Path(path) => {
                    let mut key = None;
                    if let Some((fs, base)) = fs {
                        let text = read_text(fs, &resolve_relative(base, &path))?;
                        let edge = EdgeInfo::from_yaml(&text)?;
                        key = Some(edge.key().clone());
                        graph.insert_edge(edge)?;
                    }
                    record_path(&mut graph.edge_paths, path, key);
                }
            }
        }
        Ok(graph)
    }
}

/// Returns the path bound to `owner`, if any.
fn bound_path<'a, K: PartialEq>(
    paths: &'a IndexMap<String, Option<K>>,
    owner: &K,
) -> Option<&'a str> {
    paths
        .iter()
        .find(|(_, bound)| bound.as_ref() == Some(owner))
        .map(|(path, _)| path.as_str())
}

/// Records `path`, binding it to `owner` when known. A child holds at most one
/// path, so binding drops any other path bound to the same owner. An unbound
/// record never clears an existing binding.
fn record_path<K: PartialEq>(
    paths: &mut IndexMap<String, Option<K>>,
    path: String,
    owner: Option<K>,
) {
    match owner {
        Some(owner) => {
            paths.retain(|p, bound| *p == path || bound.as_ref() != Some(&owner));
            paths.insert(path, Some(owner));
        }
        None => {
            paths.entry(path).or_insert(None);
        }
    }
}

/// One entry per registered child, as its bound path or embedded, followed by
/// every recorded path whose child is not registered.
fn child_entries<K, I, D>(
    children: &IndexMap<K, I>,
    paths: &IndexMap<String, Option<K>>,
    to_document: impl Fn(&I) -> D,
) -> Vec<ChildEntry<D>>
where
    K: Hash + Eq,
{
    let mut entries: Vec<ChildEntry<D>> = children
        .iter()
        .map(|(key, child)| match bound_path(paths, key) {
            Some(path) => ChildEntry::Path(path.to_string()),
            None => ChildEntry::Inline(to_document(child)),
        })
        .collect();
    entries.extend(
        paths
            .iter()
            .filter(|(_, bound)| !bound.as_ref().is_some_and(|key| children.contains_key(key)))
            .map(|(path, _)| ChildEntry::Path(path.clone())),
    );
    entries
}

impl SchemaInfo for GraphInfo {
    type Document = GraphDoc;

    const KIND: &'static str = "graph";

    fn ident(&self) -> String {
        self.name.clone()
    }

    /// Every child validates and every edge endpoint is a registered vertex.
    fn validate(&self) -> Result<()> {
        self.validate_children()?;
        self.check_references()
    }

    /// Writes a registered child as its recorded path when it has one and
    /// embeds it otherwise. Paths of children that are not registered are
    /// kept as path entries.
    fn to_document(&self) -> GraphDoc {
        GraphDoc {
            name: self.name.clone(),
            prefix: self.prefix.clone(),
            vertices: child_entries(
                &self.vertex_infos,
                &self.vertex_paths,
                VertexInfo::to_document,
            ),
            edges: child_entries(&self.edge_infos, &self.edge_paths, EdgeInfo::to_document),
            version: self.version,
        }
    }

    /// Path entries are recorded but not resolved; use
    /// [`load_with`](SchemaInfo::load_with) to resolve them.
    fn from_document(doc: GraphDoc) -> Result<Self> {
        Self::from_document_resolved(doc, None)
    }

    fn load_with(fs: &dyn FileSystem, path: &str) -> Result<Self> {
        let text = read_text(fs, path)?;
        let doc: GraphDoc = serde_yaml::from_str(&text)?;
        let graph = Self::from_document_resolved(doc, Some((fs, path)))?;
        if let Err(err) = graph.validate() {
            warn!(kind = Self::KIND, path, error = %err, "loaded schema does not validate");
        }
        debug!(
            graph = %graph.name,
            vertices = graph.vertex_infos.len(),
            edges = graph.edge_infos.len(),
            "loaded graph info"
        );
        Ok(graph)
    }
}

/// Mutable draft of a [`GraphInfo`] that has not been published yet.
#[derive(Debug, Clone)]
pub struct GraphInfoBuilder {
    draft: GraphInfo,
}

impl GraphInfoBuilder {
    /// Starts an empty draft.
    #[must_use]
    pub fn new(name: impl Into<String>, version: FormatVersion, prefix: impl Into<String>) -> Self {
        Self {
            draft: GraphInfo::new(name, version, prefix),
        }
    }

    /// Registers a vertex schema in place.
    ///
    /// # Errors
    ///
    /// `DuplicateLabel` if the label is already registered.
    pub fn add_vertex(&mut self, vertex_info: VertexInfo) -> Result<&mut Self> {
        self.draft.insert_vertex(vertex_info)?;
        Ok(self)
    }

    /// Registers an edge schema in place.
    ///
    /// # Errors
    ///
    /// `DuplicateLabel` if the triple is already registered.
    pub fn add_edge(&mut self, edge_info: EdgeInfo) -> Result<&mut Self> {
        self.draft.insert_edge(edge_info)?;
        Ok(self)
    }

    /// Records where the vertex document for `label` is persisted, relative
    /// to the graph document. The vertex may be registered before or after.
    /// A later path for the same label replaces the earlier one.
    pub fn add_vertex_info_path(
        &mut self,
        label: impl Into<String>,
        path: impl Into<String>,
    ) -> &mut Self {
        record_path(&mut self.draft.vertex_paths, path.into(), Some(label.into()));
        self
    }

    /// Records where the edge document for a triple is persisted, relative
    /// to the graph document. A later path for the same triple replaces the
    /// earlier one.
    pub fn add_edge_info_path(
        &mut self,
        src_label: &str,
        edge_label: &str,
        dst_label: &str,
        path: impl Into<String>,
    ) -> &mut Self {
        let key = EdgeKey::new(src_label, edge_label, dst_label);
        record_path(&mut self.draft.edge_paths, path.into(), Some(key));
        self
    }

    /// Read access to the draft.
    #[must_use]
    pub fn draft(&self) -> &GraphInfo {
        &self.draft
    }

    /// Publishes the draft after checking every child schema.
    ///
    /// References between edges and vertices are not required here; check
    /// them with [`GraphInfo::check_references`] or `validate()`.
    ///
    /// # Errors
    ///
    /// The first child validation failure.
    pub fn build(self) -> Result<GraphInfo> {
        self.draft.validate_children()?;
        Ok(self.draft)
    }
}
