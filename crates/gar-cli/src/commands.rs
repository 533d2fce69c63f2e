//! Subcommand implementations.

use anyhow::{anyhow, bail, Context as _, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use gar_schema::{
    AdjListType, DataType, EdgeInfo, EdgeInfoBuilder, GarConfig, GraphInfo, Property,
    PropertyGroup, SchemaInfo, VertexInfo, VertexInfoBuilder,
};

use crate::{FormatArg, KindArg};

/// Shared state for one CLI invocation.
pub struct Context {
    config: GarConfig,
}

impl Context {
    pub fn new(config: GarConfig) -> Self {
        Self { config }
    }

    /// Resolves a user-supplied path against `storage.root` when it is relative.
    pub fn resolve(&self, path: &Path) -> Result<String> {
        let resolved = match &self.config.storage.root {
            Some(root) if path.is_relative() => PathBuf::from(root).join(path),
            _ => path.to_path_buf(),
        };
        resolved
            .to_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", resolved.display()))
    }
}

/// A schema file loaded as whichever kind it holds.
pub enum LoadedSchema {
    Vertex(VertexInfo),
    Edge(EdgeInfo),
    Graph(GraphInfo),
}

impl LoadedSchema {
    fn validate(&self) -> gar_schema::Result<()> {
        match self {
            Self::Vertex(info) => info.validate(),
            Self::Edge(info) => info.validate(),
            Self::Graph(info) => info.validate(),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Vertex(_) => VertexInfo::KIND,
            Self::Edge(_) => EdgeInfo::KIND,
            Self::Graph(_) => GraphInfo::KIND,
        }
    }
}

/// Detects the schema kind from a file name such as `person.vertex.yml`.
pub fn detect_kind(path: &Path) -> Option<KindArg> {
    let name = path.file_name()?.to_str()?;
    let stem = name
        .strip_suffix(".yml")
        .or_else(|| name.strip_suffix(".yaml"))?;
    match stem.rsplit('.').next()? {
        "vertex" => Some(KindArg::Vertex),
        "edge" => Some(KindArg::Edge),
        "graph" => Some(KindArg::Graph),
        _ => None,
    }
}

pub fn load(ctx: &Context, file: &Path, kind: Option<KindArg>) -> Result<LoadedSchema> {
    let kind = kind.or_else(|| detect_kind(file)).ok_or_else(|| {
        anyhow!(
            "cannot detect schema kind of {}; pass --kind",
            file.display()
        )
    })?;
    let path = ctx.resolve(file)?;
    debug!(?kind, path = %path, "loading schema");

    let loaded = match kind {
        KindArg::Vertex => LoadedSchema::Vertex(VertexInfo::load(&path)?),
        KindArg::Edge => LoadedSchema::Edge(EdgeInfo::load(&path)?),
        KindArg::Graph => LoadedSchema::Graph(GraphInfo::load(&path)?),
    };
    Ok(loaded)
}

// =============================================================================
// show
// =============================================================================

pub fn show(ctx: &Context, file: &Path, kind: Option<KindArg>, format: FormatArg) -> Result<()> {
    let schema = load(ctx, file, kind)?;
    match format {
        FormatArg::Json => {
            let json = match &schema {
                LoadedSchema::Vertex(info) => to_json(&info.to_document())?,
                LoadedSchema::Edge(info) => to_json(&info.to_document())?,
                LoadedSchema::Graph(info) => to_json(&info.to_document())?,
            };
            println!("{json}");
        }
        FormatArg::Text => {
            let lines = match &schema {
                LoadedSchema::Vertex(info) => describe_vertex(info),
                LoadedSchema::Edge(info) => describe_edge(info),
                LoadedSchema::Graph(info) => describe_graph(info),
            };
            for line in lines {
                println!("{line}");
            }
        }
    }
    Ok(())
}

fn to_json<T: Serialize>(doc: &T) -> Result<String> {
    serde_json::to_string_pretty(doc).context("failed to encode JSON")
}

fn describe_group(group: &PropertyGroup) -> String {
    let props: Vec<String> = group
        .properties()
        .iter()
        .map(|p| {
            if p.is_primary {
                format!("{}: {} (primary)", p.name, p.data_type)
            } else {
                format!("{}: {}", p.name, p.data_type)
            }
        })
        .collect();
    format!("{} [{}] {}", group.segment(), group.file_type(), props.join(", "))
}

pub fn describe_vertex(info: &VertexInfo) -> Vec<String> {
    let mut lines = vec![
        format!("Vertex: {}", info.label()),
        format!("  chunk_size: {}", info.chunk_size()),
        format!("  prefix: {}", info.prefix()),
        format!("  version: {}", info.version()),
        format!("  property groups: {}", info.property_groups().len()),
    ];
    lines.extend(
        info.property_groups()
            .iter()
            .map(|g| format!("    - {}", describe_group(g))),
    );
    lines
}

pub fn describe_edge(info: &EdgeInfo) -> Vec<String> {
    let mut lines = vec![
        format!("Edge: {}", info.key()),
        format!(
            "  chunk_size: {} (src {}, dst {})",
            info.chunk_size(),
            info.src_chunk_size(),
            info.dst_chunk_size()
        ),
        format!("  directed: {}", info.is_directed()),
        format!("  prefix: {}", info.prefix()),
        format!("  version: {}", info.version()),
    ];
    for adj_list_type in info.adj_list_types() {
        let Some(adj) = info.adj_list(adj_list_type) else {
            continue;
        };
        lines.push(format!("  adj_list {adj_list_type} [{}]", adj.file_type()));
        lines.extend(
            adj.property_groups()
                .iter()
                .map(|g| format!("    - {}", describe_group(g))),
        );
    }
    lines
}

pub fn describe_graph(info: &GraphInfo) -> Vec<String> {
    let mut lines = vec![
        format!("Graph: {}", info.name()),
        format!("  prefix: {}", info.prefix()),
        format!("  version: {}", info.version()),
        format!("  vertices: {}", info.vertex_infos().len()),
    ];
    for vertex in info.vertex_infos().values() {
        lines.push(format!(
            "    - {} (chunk_size {}, {} groups)",
            vertex.label(),
            vertex.chunk_size(),
            vertex.property_groups().len()
        ));
    }
    lines.push(format!("  edges: {}", info.edge_infos().len()));
    for edge in info.edge_infos().values() {
        let types: Vec<String> = edge.adj_list_types().map(|t| t.to_string()).collect();
        lines.push(format!("    - {} [{}]", edge.key(), types.join(", ")));
    }
    lines
}

// =============================================================================
// validate
// =============================================================================

pub fn validate(ctx: &Context, file: &Path, kind: Option<KindArg>) -> Result<()> {
    let schema = load(ctx, file, kind)?;
    if let Err(err) = schema.validate() {
        bail!("{} is not valid: {err}", file.display());
    }
    println!("OK: {} schema {} is valid", schema.kind(), file.display());
    Ok(())
}

// =============================================================================
// paths
// =============================================================================

pub fn paths(
    ctx: &Context,
    file: &Path,
    kind: Option<KindArg>,
    part_index: i64,
    chunk_index: i64,
) -> Result<()> {
    let schema = load(ctx, file, kind)?;
    let lines = match &schema {
        LoadedSchema::Vertex(info) => vertex_paths(info, chunk_index)?,
        LoadedSchema::Edge(info) => edge_paths(info, part_index, chunk_index)?,
        LoadedSchema::Graph(info) => {
            let mut lines = Vec::new();
            for vertex in info.vertex_infos().values() {
                lines.extend(vertex_paths(vertex, chunk_index)?);
            }
            for edge in info.edge_infos().values() {
                lines.extend(edge_paths(edge, part_index, chunk_index)?);
            }
            lines
                .into_iter()
                .map(|p| format!("{}{p}", info.prefix()))
                .collect()
        }
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

pub fn vertex_paths(info: &VertexInfo, chunk_index: i64) -> gar_schema::Result<Vec<String>> {
    let mut lines = Vec::with_capacity(info.property_groups().len() + 1);
    for group in info.property_groups() {
        lines.push(info.get_file_path(group, chunk_index)?);
    }
    lines.push(info.get_vertices_num_file_path());
    Ok(lines)
}

pub fn edge_paths(
    info: &EdgeInfo,
    part_index: i64,
    chunk_index: i64,
) -> gar_schema::Result<Vec<String>> {
    let mut lines = Vec::new();
    for adj_list_type in info.adj_list_types() {
        lines.push(info.get_adj_list_file_path(part_index, chunk_index, adj_list_type)?);
        // offsets and edge counts are keyed by the aligned vertex chunk, i.e. the partition
        if adj_list_type.is_ordered() {
            lines.push(info.get_adj_list_offset_file_path(part_index, adj_list_type)?);
        }
        for group in info.get_property_groups(adj_list_type)? {
            lines.push(info.get_property_file_path(group, adj_list_type, part_index, chunk_index)?);
        }
        lines.push(info.get_vertices_num_file_path(adj_list_type)?);
        lines.push(info.get_edges_num_file_path(part_index, adj_list_type)?);
    }
    Ok(lines)
}

// =============================================================================
// new
// =============================================================================

/// Parses `name:type[:primary]`.
pub fn parse_property(spec: &str) -> Result<Property> {
    let mut fields = spec.split(':');
    let name = fields.next().unwrap_or_default().trim();
    let data_type = fields
        .next()
        .ok_or_else(|| anyhow!("property '{spec}' is missing a type (expected name:type)"))?;
    if name.is_empty() {
        bail!("property '{spec}' has an empty name");
    }
    let data_type: DataType = data_type.parse()?;
    match fields.next() {
        None => Ok(Property::new(name, data_type)),
        Some("primary") if fields.next().is_none() => Ok(Property::primary(name, data_type)),
        Some(_) => bail!("property '{spec}' has an unexpected suffix (expected name:type[:primary])"),
    }
}

/// Parses a comma-separated list of property entries into one group.
pub fn parse_group(spec: &str, ctx: &Context) -> Result<PropertyGroup> {
    let properties = spec
        .split(',')
        .map(parse_property)
        .collect::<Result<Vec<_>>>()?;
    Ok(PropertyGroup::new(
        properties,
        ctx.config.defaults.file_type,
    ))
}

pub fn new_vertex(
    ctx: &Context,
    label: &str,
    groups: &[String],
    output: Option<PathBuf>,
) -> Result<()> {
    let defaults = &ctx.config.defaults;
    let mut builder = VertexInfoBuilder::new(
        label,
        defaults.vertex_chunk_size,
        defaults.version,
        format!("vertex/{label}/"),
    );
    for spec in groups {
        builder.add_property_group(parse_group(spec, ctx)?)?;
    }
    let info = builder.build()?;

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{label}.vertex.yml")));
    let path = ctx.resolve(&output)?;
    info.save_with(&gar_schema::LocalFileSystem, &path, &ctx.config.save_options())?;
    info!(label, path = %path, "wrote vertex schema");
    println!("Wrote {path}");
    Ok(())
}

pub fn new_edge(
    ctx: &Context,
    [src, edge, dst]: [&str; 3],
    adj_lists: &[AdjListType],
    directed: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let defaults = &ctx.config.defaults;
    let mut builder = EdgeInfoBuilder::new(
        src,
        edge,
        dst,
        defaults.edge_chunk_size,
        defaults.vertex_chunk_size,
        defaults.vertex_chunk_size,
        directed,
        defaults.version,
        format!("edge/{src}_{edge}_{dst}/"),
    );
    for adj_list_type in adj_lists {
        builder.add_adj_list(*adj_list_type, defaults.file_type)?;
    }
    let info = builder.build()?;

    let output = output.unwrap_or_else(|| PathBuf::from(format!("{}.edge.yml", info.key())));
    let path = ctx.resolve(&output)?;
    info.save_with(&gar_schema::LocalFileSystem, &path, &ctx.config.save_options())?;
    info!(edge = %info.key(), path = %path, "wrote edge schema");
    println!("Wrote {path}");
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
