//! Properties and property groups.
//!
//! A [`PropertyGroup`] is the unit of physical chunk-file granularity: every
//! property in a group is stored in the same file for a given chunk index.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::types::{DataType, FileType};

/// A named, typed field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    /// Property name, unique within its owning schema scope.
    pub name: String,
    /// Value type.
    pub data_type: DataType,
    /// Whether this property identifies the vertex/edge.
    pub is_primary: bool,
}

impl Property {
    /// Creates a non-primary property.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_primary: false,
        }
    }

    /// Creates a primary-key property.
    #[must_use]
    pub fn primary(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            is_primary: true,
        }
    }
}

/// Ordered properties co-located in one physical file per chunk.
///
/// Property order is the physical column order, so two groups holding the same
/// properties in a different order are different groups.
#[derive(Debug, Clone, Eq)]
pub struct PropertyGroup {
    properties: Vec<Property>,
    file_type: FileType,
    prefix: Option<String>,
}

impl PropertyGroup {
    /// Creates a group whose path segment is derived from its property names.
    #[must_use]
    pub fn new(properties: Vec<Property>, file_type: FileType) -> Self {
        Self {
            properties,
            file_type,
            prefix: None,
        }
    }

    /// Overrides the derived path segment (builder pattern).
    ///
    /// Surrounding `/` characters are stripped; an empty prefix restores the
    /// derived segment.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_matches('/');
        self.prefix = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Returns the properties in physical column order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Returns the physical file format.
    #[must_use]
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Returns the explicit segment override, if any.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Number of properties in the group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if the group has no properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Returns true if some property in the group has this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Directory segment used in chunk paths.
    ///
    /// The explicit prefix when set, otherwise the property names joined with
    /// `_` in column order (a single property yields its bare name).
    #[must_use]
    pub fn segment(&self) -> String {
        match &self.prefix {
            Some(prefix) => prefix.clone(),
            None => self
                .properties
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join("_"),
        }
    }

    /// Checks the group on its own: non-empty, no empty or repeated names.
    pub(crate) fn check(&self) -> Result<()> {
        if self.properties.is_empty() {
            return Err(Error::EmptyGroup);
        }
        let mut seen = HashSet::with_capacity(self.properties.len());
        for property in &self.properties {
            if property.name.is_empty() {
                return Err(Error::InvalidLabel("property name is empty".to_string()));
            }
            if !seen.insert(property.name.as_str()) {
                return Err(Error::DuplicatePropertyName(property.name.clone()));
            }
        }
        Ok(())
    }
}

impl PartialEq for PropertyGroup {
    fn eq(&self, other: &Self) -> bool {
        self.properties == other.properties
            && self.file_type == other.file_type
            && self.segment() == other.segment()
    }
}

/// Checks that `group` can be appended to `existing` without reusing a
/// property name or a path segment already owned by another group in the
/// same scope.
pub(crate) fn check_addition(existing: &[PropertyGroup], group: &PropertyGroup) -> Result<()> {
    group.check()?;
    if let Some(dup) = group
        .properties()
        .iter()
        .find(|p| existing.iter().any(|g| g.contains(&p.name)))
    {
        return Err(Error::DuplicatePropertyName(dup.name.clone()));
    }
    // Two groups with one segment would share a chunk directory.
    let segment = group.segment();
    if existing.iter().any(|g| g.segment() == segment) {
        return Err(Error::DuplicateGroupSegment(segment));
    }
    Ok(())
}

/// Checks a whole group list: every group valid, names unique across groups.
pub(crate) fn check_groups(groups: &[PropertyGroup]) -> Result<()> {
    for (i, group) in groups.iter().enumerate() {
        check_addition(&groups[..i], group)?;
    }
    Ok(())
}
