//! Fuzz target for chunk path derivation.
//!
//! Paths are pure functions of schema and indices: a successful derivation
//! must embed the requested indices, and negative indices must be rejected.

#![no_main]

use arbitrary::Arbitrary;
use gar_schema::{
    AdjListType, DataType, EdgeInfo, FileType, FormatVersion, Property, PropertyGroup,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct PathInput {
    src: String,
    edge: String,
    dst: String,
    property: String,
    adj_list: u8,
    part_index: i64,
    chunk_index: i64,
}

fuzz_target!(|input: PathInput| {
    let adj_list_type = AdjListType::ALL[usize::from(input.adj_list % 4)];
    let group = PropertyGroup::new(
        vec![Property::new(input.property.clone(), DataType::Int64)],
        FileType::Parquet,
    );
    let Ok(info) = EdgeInfo::new(
        input.src,
        input.edge,
        input.dst,
        1024,
        100,
        100,
        true,
        FormatVersion::V1,
        "",
    )
    .extend_adj_list(adj_list_type, FileType::Csv)
    .and_then(|info| info.extend_property_group(group.clone(), adj_list_type)) else {
        return;
    };

    let adj = info.get_adj_list_file_path(input.part_index, input.chunk_index, adj_list_type);
    let prop = info.get_property_file_path(&group, adj_list_type, input.part_index, input.chunk_index);

    if input.part_index < 0 || input.chunk_index < 0 {
        assert!(adj.is_err());
        assert!(prop.is_err());
    } else {
        let suffix = format!("part{}/chunk{}", input.part_index, input.chunk_index);
        assert!(adj.expect("non-negative indices").ends_with(&suffix));
        assert!(prop.expect("non-negative indices").ends_with(&suffix));
    }
});
