//! Tests for `error` module

use super::error::*;
use crate::types::AdjListType;

// -------------------------------------------------------------------------
// Error code tests
// -------------------------------------------------------------------------

#[test]
fn test_error_codes_are_unique() {
    // Arrange - create all error variants
    let errors: Vec<Error> = vec![
        Error::PropertyNotFound("id".into()),
        Error::PropertyGroupNotFound("id".into()),
        Error::VertexNotFound("person".into()),
        Error::EdgeNotFound("person_knows_person".into()),
        Error::AdjListTypeNotFound(AdjListType::OrderedBySource),
        Error::AdjListTypeAlreadyExists(AdjListType::OrderedBySource),
        Error::DuplicatePropertyName("id".into()),
        Error::DuplicateLabel("person".into()),
        Error::EmptyGroup,
        Error::InvalidLabel("label is empty".into()),
        Error::InvalidChunkSize {
            field: "chunk_size",
            value: 0,
        },
        Error::InvalidChunkIndex(-1),
        Error::InvalidPartIndex(-1),
        Error::UnknownVertexLabel {
            edge: "person_knows_post".into(),
            label: "post".into(),
        },
        Error::UnknownDataType("int128".into()),
        Error::UnknownFileType("avro".into()),
        Error::UnknownAdjListType("sorted".into()),
        Error::UnsupportedVersion("gar/v9".into()),
        Error::Encoding("bad yaml".into()),
        Error::Io(std::io::Error::other("test")),
        Error::NotValidated("person".into()),
        Error::DuplicateGroupSegment("a_b".into()),
    ];

    // Act - collect all codes
    let codes: Vec<&str> = errors.iter().map(Error::code).collect();

    // Assert - all codes are unique and follow pattern
    let mut unique_codes = codes.clone();
    unique_codes.sort_unstable();
    unique_codes.dedup();
    assert_eq!(codes.len(), unique_codes.len(), "Error codes must be unique");

    for code in &codes {
        assert!(code.starts_with("GAR-"), "Code {code} should start with GAR-");
    }
}

#[test]
fn test_error_display_includes_code() {
    let err = Error::VertexNotFound("person".into());

    let display = format!("{err}");

    assert!(display.contains("GAR-003"));
    assert!(display.contains("person"));
}

#[test]
fn test_adj_list_error_uses_canonical_name() {
    let err = Error::AdjListTypeNotFound(AdjListType::UnorderedByDest);
    assert!(err.to_string().contains("unordered_by_dest"));
}

#[test]
fn test_chunk_size_display() {
    let err = Error::InvalidChunkSize {
        field: "src_chunk_size",
        value: -4,
    };
    assert_eq!(
        err.to_string(),
        "[GAR-011] Invalid src_chunk_size: -4 (must be positive)"
    );
}

#[test]
fn test_is_not_found_covers_lookup_misses_only() {
    assert!(Error::PropertyNotFound("x".into()).is_not_found());
    assert!(Error::PropertyGroupNotFound("x".into()).is_not_found());
    assert!(Error::VertexNotFound("x".into()).is_not_found());
    assert!(Error::EdgeNotFound("x".into()).is_not_found());
    assert!(Error::AdjListTypeNotFound(AdjListType::OrderedByDest).is_not_found());

    assert!(!Error::DuplicateLabel("x".into()).is_not_found());
    assert!(!Error::EmptyGroup.is_not_found());
    assert!(!Error::Encoding("x".into()).is_not_found());
}

#[test]
fn test_yaml_error_converts_to_encoding() {
    let yaml_err = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err();

    let err: Error = yaml_err.into();

    assert_eq!(err.code(), "GAR-019");
}

#[test]
fn test_io_error_converts() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");

    let err: Error = io_err.into();

    assert!(matches!(err, Error::Io(_)));
    assert_eq!(err.code(), "GAR-020");
}
