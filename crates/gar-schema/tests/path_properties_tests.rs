//! Property-based tests for path derivation and schema extension.

use gar_schema::{
    AdjListType, DataType, EdgeInfo, Error, FileType, FormatVersion, Property, PropertyGroup,
    SchemaInfo, VertexInfo,
};
use proptest::prelude::*;

/// Strategy for identifiers usable as labels and property names
fn ident_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9]{0,11}"
}

/// Strategy for a list of distinct property names
fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::btree_set(ident_strategy(), 1..=5)
        .prop_map(|set| set.into_iter().collect())
}

fn adj_list_type_strategy() -> impl Strategy<Value = AdjListType> {
    prop::sample::select(AdjListType::ALL.to_vec())
}

fn group_of(names: &[String]) -> PropertyGroup {
    PropertyGroup::new(
        names
            .iter()
            .map(|n| Property::new(n.clone(), DataType::Int64))
            .collect(),
        FileType::Parquet,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: the vertex chunk path is prefix, joined names, then chunk index
    #[test]
    fn prop_vertex_file_path_layout(
        label in ident_strategy(),
        names in names_strategy(),
        chunk_index in 0i64..1_000_000,
    ) {
        let group = group_of(&names);
        let info = VertexInfo::new(label.clone(), 100, FormatVersion::V1, "")
            .extend(group.clone())
            .unwrap();

        let path = info.get_file_path(&group, chunk_index).unwrap();

        prop_assert_eq!(path, format!("{}/{}/chunk{}", label, names.join("_"), chunk_index));
    }

    /// Property: negative indices never produce a path
    #[test]
    fn prop_negative_indices_rejected(
        chunk_index in i64::MIN..0,
        part_index in i64::MIN..0,
        adj_list_type in adj_list_type_strategy(),
    ) {
        let info = EdgeInfo::new("a", "e", "b", 10, 10, 10, true, FormatVersion::V1, "")
            .extend_adj_list(adj_list_type, FileType::Csv)
            .unwrap();

        prop_assert!(matches!(
            info.get_adj_list_file_path(0, chunk_index, adj_list_type),
            Err(Error::InvalidChunkIndex(_))
        ));
        prop_assert!(matches!(
            info.get_adj_list_file_path(part_index, 0, adj_list_type),
            Err(Error::InvalidPartIndex(_))
        ));
    }

    /// Property: adjacency paths embed the representation name and indices
    #[test]
    fn prop_adj_list_path_layout(
        part_index in 0i64..10_000,
        chunk_index in 0i64..10_000,
        adj_list_type in adj_list_type_strategy(),
    ) {
        let info = EdgeInfo::new("a", "e", "b", 10, 10, 10, true, FormatVersion::V1, "")
            .extend_adj_list(adj_list_type, FileType::Csv)
            .unwrap();

        let path = info
            .get_adj_list_file_path(part_index, chunk_index, adj_list_type)
            .unwrap();

        prop_assert_eq!(
            path,
            format!("a_e_b/{}/adj_list/part{}/chunk{}", adj_list_type, part_index, chunk_index)
        );
    }

    /// Property: a failed extension leaves the receiver untouched and a
    /// successful one leaves it untouched too
    #[test]
    fn prop_extend_never_mutates(
        first in names_strategy(),
        second in names_strategy(),
    ) {
        let base = VertexInfo::new("v", 10, FormatVersion::V1, "")
            .extend(group_of(&first))
            .unwrap();
        let before = base.clone();

        let overlaps = second.iter().any(|n| first.contains(n));
        let result = base.extend(group_of(&second));

        prop_assert_eq!(&base, &before);
        prop_assert_eq!(result.is_err(), overlaps);
        if let Ok(grown) = result {
            prop_assert!(grown.is_validated());
            prop_assert_eq!(grown.property_groups().len(), 2);
        }
    }

    /// Property: a group whose joined segment names an existing group's
    /// directory is rejected even though no property name repeats
    #[test]
    fn prop_colliding_segment_rejected(
        names in proptest::collection::btree_set(ident_strategy(), 2..=4),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let joined = names.join("_");
        let base = VertexInfo::new("v", 10, FormatVersion::V1, "")
            .extend(group_of(&[joined.clone()]))
            .unwrap();

        let result = base.extend(group_of(&names));

        prop_assert!(matches!(result, Err(Error::DuplicateGroupSegment(ref s)) if *s == joined));
    }

    /// Property: dumped documents reload to an equal schema
    #[test]
    fn prop_vertex_dump_reload(
        label in ident_strategy(),
        names in names_strategy(),
        chunk_size in 1i64..1_000_000,
    ) {
        let info = VertexInfo::new(label, chunk_size, FormatVersion::V1, "")
            .extend(group_of(&names))
            .unwrap();

        let reloaded = VertexInfo::from_yaml(&info.dump().unwrap()).unwrap();

        prop_assert_eq!(reloaded, info);
    }
}
