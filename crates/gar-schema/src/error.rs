//! Error types for `gar-schema`.
//!
//! Every fallible schema operation returns [`Result`]. Variants carry a stable
//! `GAR-XXX` code so that tools built on top of the schema layer can report
//! failures without matching on message text.

use thiserror::Error;

use crate::types::AdjListType;

/// Result type alias for schema operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, querying or persisting schemas.
#[derive(Error, Debug)]
pub enum Error {
    /// Property lookup miss (GAR-001).
    #[error("[GAR-001] Property '{0}' not found")]
    PropertyNotFound(String),

    /// Property group lookup miss (GAR-002).
    #[error("[GAR-002] Property group '{0}' not found")]
    PropertyGroupNotFound(String),

    /// Vertex label lookup miss (GAR-003).
    #[error("[GAR-003] Vertex '{0}' not found")]
    VertexNotFound(String),

    /// Edge triple lookup miss (GAR-004).
    #[error("[GAR-004] Edge '{0}' not found")]
    EdgeNotFound(String),

    /// Adjacency-list representation is not materialized (GAR-005).
    #[error("[GAR-005] Adjacency list type '{0}' not found")]
    AdjListTypeNotFound(AdjListType),

    /// Adjacency-list representation already registered (GAR-006).
    #[error("[GAR-006] Adjacency list type '{0}' already exists")]
    AdjListTypeAlreadyExists(AdjListType),

    /// Property name already used by another group in the same scope (GAR-007).
    #[error("[GAR-007] Duplicate property name '{0}'")]
    DuplicatePropertyName(String),

    /// Vertex label or edge triple already registered (GAR-008).
    #[error("[GAR-008] Duplicate label '{0}'")]
    DuplicateLabel(String),

    /// Property group without properties (GAR-009).
    #[error("[GAR-009] Property group has no properties")]
    EmptyGroup,

    /// Empty or otherwise unusable identifier (GAR-010).
    #[error("[GAR-010] Invalid label: {0}")]
    InvalidLabel(String),

    /// Non-positive chunk size (GAR-011).
    #[error("[GAR-011] Invalid {field}: {value} (must be positive)")]
    InvalidChunkSize {
        /// Which chunk size field failed.
        field: &'static str,
        /// Offending value.
        value: i64,
    },

    /// Negative chunk index (GAR-012).
    #[error("[GAR-012] Invalid chunk index {0}")]
    InvalidChunkIndex(i64),

    /// Negative partition index (GAR-013).
    #[error("[GAR-013] Invalid part index {0}")]
    InvalidPartIndex(i64),

    /// Edge endpoint label has no registered vertex schema (GAR-014).
    #[error("[GAR-014] Edge '{edge}' references unknown vertex label '{label}'")]
    UnknownVertexLabel {
        /// Edge triple key, rendered as `src_edge_dst`.
        edge: String,
        /// The missing vertex label.
        label: String,
    },

    /// Unrecognized data type tag (GAR-015).
    #[error("[GAR-015] Unknown data type '{0}'")]
    UnknownDataType(String),

    /// Unrecognized file type tag (GAR-016).
    #[error("[GAR-016] Unknown file type '{0}'")]
    UnknownFileType(String),

    /// Unrecognized adjacency-list type tag (GAR-017).
    #[error("[GAR-017] Unknown adjacency list type '{0}'")]
    UnknownAdjListType(String),

    /// Unrecognized format version tag (GAR-018).
    #[error("[GAR-018] Unsupported format version '{0}'")]
    UnsupportedVersion(String),

    /// Textual encoding or decoding failure (GAR-019).
    #[error("[GAR-019] Encoding error: {0}")]
    Encoding(String),

    /// Filesystem collaborator failure (GAR-020).
    #[error("[GAR-020] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Persistence refused by policy (GAR-021).
    #[error("[GAR-021] Refusing to save unvalidated schema: {0}")]
    NotValidated(String),

    /// Property group path segment already used in the same scope (GAR-022).
    #[error("[GAR-022] Duplicate property group segment '{0}'")]
    DuplicateGroupSegment(String),
}

impl Error {
    /// Returns the error code (e.g., "GAR-001").
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::PropertyNotFound(_) => "GAR-001",
            Self::PropertyGroupNotFound(_) => "GAR-002",
            Self::VertexNotFound(_) => "GAR-003",
            Self::EdgeNotFound(_) => "GAR-004",
            Self::AdjListTypeNotFound(_) => "GAR-005",
            Self::AdjListTypeAlreadyExists(_) => "GAR-006",
            Self::DuplicatePropertyName(_) => "GAR-007",
            Self::DuplicateLabel(_) => "GAR-008",
            Self::EmptyGroup => "GAR-009",
            Self::InvalidLabel(_) => "GAR-010",
            Self::InvalidChunkSize { .. } => "GAR-011",
            Self::InvalidChunkIndex(_) => "GAR-012",
            Self::InvalidPartIndex(_) => "GAR-013",
            Self::UnknownVertexLabel { .. } => "GAR-014",
            Self::UnknownDataType(_) => "GAR-015",
            Self::UnknownFileType(_) => "GAR-016",
            Self::UnknownAdjListType(_) => "GAR-017",
            Self::UnsupportedVersion(_) => "GAR-018",
            Self::Encoding(_) => "GAR-019",
            Self::Io(_) => "GAR-020",
            Self::NotValidated(_) => "GAR-021",
            Self::DuplicateGroupSegment(_) => "GAR-022",
        }
    }

    /// Returns true for every lookup miss (property, group, label, triple or
    /// adjacency-list representation).
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PropertyNotFound(_)
                | Self::PropertyGroupNotFound(_)
                | Self::VertexNotFound(_)
                | Self::EdgeNotFound(_)
                | Self::AdjListTypeNotFound(_)
        )
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
