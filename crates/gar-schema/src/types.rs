//! Closed tag sets shared by every schema object.
//!
//! Data types, physical file formats, adjacency-list representations and the
//! format version are all part of the on-disk contract, so each one has a
//! single canonical textual name used both in schema documents and in derived
//! chunk paths.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Primitive and parametric property types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean.
    Bool,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point.
    Float,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string.
    String,
    /// Calendar date (days since epoch).
    Date,
    /// Timestamp (milliseconds since epoch).
    Timestamp,
    /// Homogeneous list of the element type.
    List(Box<DataType>),
}

impl DataType {
    /// Creates a list type over `element`.
    #[must_use]
    pub fn list(element: DataType) -> Self {
        Self::List(Box::new(element))
    }

    /// Returns the element type for lists, `None` otherwise.
    #[must_use]
    pub fn element_type(&self) -> Option<&DataType> {
        match self {
            Self::List(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::Int32 => f.write_str("int32"),
            Self::Int64 => f.write_str("int64"),
            Self::Float => f.write_str("float"),
            Self::Double => f.write_str("double"),
            Self::String => f.write_str("string"),
            Self::Date => f.write_str("date"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::List(inner) => write!(f, "list<{inner}>"),
        }
    }
}

impl FromStr for DataType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(inner) = trimmed
            .strip_prefix("list<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            return inner
                .parse::<DataType>()
                .map(DataType::list)
                .map_err(|_| Error::UnknownDataType(s.to_string()));
        }
        match trimmed {
            "bool" => Ok(Self::Bool),
            "int32" => Ok(Self::Int32),
            "int64" => Ok(Self::Int64),
            "float" => Ok(Self::Float),
            "double" => Ok(Self::Double),
            "string" => Ok(Self::String),
            "date" => Ok(Self::Date),
            "timestamp" => Ok(Self::Timestamp),
            _ => Err(Error::UnknownDataType(s.to_string())),
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Physical file format backing a property group or adjacency list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Comma-separated text.
    Csv,
    /// Apache Parquet.
    #[default]
    Parquet,
    /// Apache ORC.
    Orc,
}

impl FileType {
    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
            Self::Orc => "orc",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            "orc" => Ok(Self::Orc),
            _ => Err(Error::UnknownFileType(s.to_string())),
        }
    }
}

/// Which endpoint an adjacency list is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignedBy {
    /// Grouped by source vertex.
    Src,
    /// Grouped by destination vertex.
    Dst,
}

/// The four ways to materialize an edge type's connectivity.
///
/// Variant order is the iteration order used wherever a lookup spans every
/// representation of an edge.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AdjListType {
    /// Edges partitioned by source chunk, unsorted within a partition.
    UnorderedBySource,
    /// Edges partitioned by source chunk, sorted by source; has offsets.
    OrderedBySource,
    /// Edges partitioned by destination chunk, unsorted within a partition.
    UnorderedByDest,
    /// Edges partitioned by destination chunk, sorted by destination; has offsets.
    OrderedByDest,
}

impl AdjListType {
    /// All representations, in canonical order.
    pub const ALL: [AdjListType; 4] = [
        Self::UnorderedBySource,
        Self::OrderedBySource,
        Self::UnorderedByDest,
        Self::OrderedByDest,
    ];

    /// Returns the canonical name used in documents and chunk paths.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnorderedBySource => "unordered_by_source",
            Self::OrderedBySource => "ordered_by_source",
            Self::UnorderedByDest => "unordered_by_dest",
            Self::OrderedByDest => "ordered_by_dest",
        }
    }

    /// Builds the representation from its `(ordered, aligned_by)` description.
    #[must_use]
    pub const fn from_parts(ordered: bool, aligned_by: AlignedBy) -> Self {
        match (ordered, aligned_by) {
            (false, AlignedBy::Src) => Self::UnorderedBySource,
            (true, AlignedBy::Src) => Self::OrderedBySource,
            (false, AlignedBy::Dst) => Self::UnorderedByDest,
            (true, AlignedBy::Dst) => Self::OrderedByDest,
        }
    }

    /// Whether edges are sorted within each partition.
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        matches!(self, Self::OrderedBySource | Self::OrderedByDest)
    }

    /// The endpoint this representation is aligned by.
    #[must_use]
    pub const fn aligned_by(&self) -> AlignedBy {
        match self {
            Self::UnorderedBySource | Self::OrderedBySource => AlignedBy::Src,
            Self::UnorderedByDest | Self::OrderedByDest => AlignedBy::Dst,
        }
    }
}

impl fmt::Display for AdjListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdjListType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownAdjListType(s.to_string()))
    }
}

/// Format version tag stamped on every schema document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FormatVersion {
    /// First published layout. Group segments join property names with `_`.
    #[default]
    #[serde(rename = "gar/v1")]
    V1,
}

impl FormatVersion {
    /// Newest version this crate writes.
    pub const LATEST: FormatVersion = FormatVersion::V1;

    /// Returns the textual tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "gar/v1",
        }
    }

    /// Returns the numeric version.
    #[must_use]
    pub const fn number(&self) -> u32 {
        match self {
            Self::V1 => 1,
        }
    }
}

impl fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "gar/v1" => Ok(Self::V1),
            _ => Err(Error::UnsupportedVersion(s.to_string())),
        }
    }
}
