#![allow(clippy::doc_markdown)]
//! `gar` - inspect, validate and scaffold graph archive schema files
//!
//! Usage:
//!   `gar show ./social.graph.yml`
//!   `gar validate ./person.vertex.yml`
//!   `gar paths ./person_knows_person.edge.yml --chunk 3 --part 1`
//!   `gar new vertex person -g id:int64:primary -g firstName:string,lastName:string`

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use gar_schema::{AdjListType, GarConfig};

#[derive(Parser)]
#[command(name = "gar")]
#[command(author, version, about = "GAR CLI - Graph archive schema inspector")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Schema document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Vertex,
    Edge,
    Graph,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum FormatArg {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of a schema file
    Show {
        /// Path to a vertex, edge or graph schema file
        file: PathBuf,

        /// Schema kind (detected from the file name if omitted)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,
    },

    /// Load a schema file and check it
    Validate {
        /// Path to a vertex, edge or graph schema file
        file: PathBuf,

        /// Schema kind (detected from the file name if omitted)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Print every chunk path derived for one chunk index
    Paths {
        /// Path to a vertex, edge or graph schema file
        file: PathBuf,

        /// Schema kind (detected from the file name if omitted)
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Chunk index
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        chunk: i64,

        /// Partition index (edge schemas only); also selects the vertex chunk
        /// of the offset and edge_count files
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        part: i64,
    },

    /// Scaffold a new schema file using the configured defaults
    New {
        #[command(subcommand)]
        target: NewTarget,
    },
}

#[derive(Subcommand)]
enum NewTarget {
    /// Scaffold a vertex schema
    Vertex {
        /// Vertex label
        label: String,

        /// Property group as comma-separated `name:type[:primary]` entries
        #[arg(short, long = "group", value_name = "PROPS")]
        groups: Vec<String>,

        /// Output file path (defaults to `<label>.vertex.yml`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scaffold an edge schema
    Edge {
        /// Source vertex label
        src: String,

        /// Edge label
        edge: String,

        /// Destination vertex label
        dst: String,

        /// Adjacency list representation to materialize
        #[arg(short, long = "adj-list", value_name = "TYPE", value_parser = AdjListType::from_str)]
        adj_lists: Vec<AdjListType>,

        /// Mark the edge type as undirected
        #[arg(long)]
        undirected: bool,

        /// Output file path (defaults to `<src>_<edge>_<dst>.edge.yml`)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GarConfig::load_from_path(path)?,
        None => GarConfig::load()?,
    };
    config.validate()?;

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::from_str(&config.logging.level).unwrap_or(Level::INFO)
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    debug!(?config, "configuration loaded");

    let ctx = commands::Context::new(config);
    match cli.command {
        Commands::Show { file, kind, format } => {
            commands::show(&ctx, &file, kind, format)?;
        }
        Commands::Validate { file, kind } => {
            commands::validate(&ctx, &file, kind)?;
        }
        Commands::Paths {
            file,
            kind,
            chunk,
            part,
        } => {
            commands::paths(&ctx, &file, kind, part, chunk)?;
        }
        Commands::New { target } => match target {
            NewTarget::Vertex {
                label,
                groups,
                output,
            } => {
                commands::new_vertex(&ctx, &label, &groups, output)?;
            }
            NewTarget::Edge {
                src,
                edge,
                dst,
                adj_lists,
                undirected,
                output,
            } => {
                commands::new_edge(
                    &ctx,
                    [src.as_str(), edge.as_str(), dst.as_str()],
                    &adj_lists,
                    !undirected,
                    output,
                )?;
            }
        },
    }

    Ok(())
}
