//! Tests for `document` module

use super::document::*;
use crate::property::{Property, PropertyGroup};
use crate::types::{AlignedBy, DataType, FileType, FormatVersion};

#[test]
fn test_vertex_doc_parses_minimal_yaml() {
    let text = r"
label: person
chunk_size: 100
property_groups:
  - file_type: csv
    properties:
      - name: id
        data_type: int32
        is_primary: true
      - name: tags
        data_type: list<string>
version: gar/v1
";
    let doc: VertexDoc = serde_yaml::from_str(text).unwrap();

    assert_eq!(doc.label, "person");
    assert_eq!(doc.prefix, "");
    assert_eq!(doc.property_groups.len(), 1);
    let group = &doc.property_groups[0];
    assert_eq!(group.prefix, None);
    assert!(group.properties[0].is_primary);
    assert!(!group.properties[1].is_primary);
    assert_eq!(group.properties[1].data_type, DataType::list(DataType::String));
}

#[test]
fn test_unknown_version_is_rejected() {
    let text = "label: person\nchunk_size: 100\nversion: gar/v9\n";
    assert!(serde_yaml::from_str::<VertexDoc>(text).is_err());
}

#[test]
fn test_unknown_file_type_is_rejected() {
    let text = "file_type: avro\nproperties: []\n";
    assert!(serde_yaml::from_str::<PropertyGroupDoc>(text).is_err());
}

#[test]
fn test_group_doc_omits_absent_prefix() {
    let group = PropertyGroup::new(vec![Property::new("name", DataType::String)], FileType::Orc);

    let text = serde_yaml::to_string(&PropertyGroupDoc::from(&group)).unwrap();

    assert!(!text.contains("prefix"));
    assert!(text.contains("file_type: orc"));
}

#[test]
fn test_group_doc_keeps_explicit_prefix() {
    let group = PropertyGroup::new(vec![Property::new("name", DataType::String)], FileType::Orc)
        .with_prefix("names");

    let doc = PropertyGroupDoc::from(&group);
    let back = PropertyGroup::from(doc);

    assert_eq!(back.prefix(), Some("names"));
    assert_eq!(back, group);
}

#[test]
fn test_adj_list_doc_fields() {
    let text = "ordered: true\naligned_by: dst\nfile_type: parquet\n";
    let doc: AdjListDoc = serde_yaml::from_str(text).unwrap();

    assert!(doc.ordered);
    assert_eq!(doc.aligned_by, AlignedBy::Dst);
    assert!(doc.property_groups.is_empty());
}

#[test]
fn test_child_entry_accepts_path_or_inline() {
    let text = r"
name: social
vertices:
  - person.vertex.yml
  - label: post
    chunk_size: 10
    prefix: vertex/post/
    version: gar/v1
version: gar/v1
";
    let doc: GraphDoc = serde_yaml::from_str(text).unwrap();

    assert_eq!(doc.vertices.len(), 2);
    assert!(matches!(&doc.vertices[0], ChildEntry::Path(p) if p == "person.vertex.yml"));
    assert!(matches!(&doc.vertices[1], ChildEntry::Inline(v) if v.label == "post"));
    assert!(doc.edges.is_empty());
    assert_eq!(doc.version, FormatVersion::V1);
}
