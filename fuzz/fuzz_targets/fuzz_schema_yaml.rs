//! Fuzz target for schema document decoding.
//!
//! Arbitrary text must never panic the decoder. Whatever decodes and
//! validates must survive a dump/decode cycle unchanged and derive paths
//! without panicking.

#![no_main]

use gar_schema::{EdgeInfo, GraphInfo, SchemaInfo, VertexInfo};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(vertex) = VertexInfo::from_yaml(text) {
        if vertex.is_validated() {
            let dumped = vertex.dump().expect("valid vertex dumps");
            let reloaded = VertexInfo::from_yaml(&dumped).expect("dump reloads");
            assert_eq!(reloaded, vertex);
            for group in vertex.property_groups() {
                let _ = vertex.get_file_path(group, 0);
            }
        }
    }

    if let Ok(edge) = EdgeInfo::from_yaml(text) {
        if edge.is_validated() {
            let dumped = edge.dump().expect("valid edge dumps");
            let reloaded = EdgeInfo::from_yaml(&dumped).expect("dump reloads");
            assert_eq!(reloaded, edge);
            for adj_list_type in edge.adj_list_types() {
                let _ = edge.get_adj_list_file_path(0, 0, adj_list_type);
                let _ = edge.get_adj_list_offset_file_path(0, adj_list_type);
            }
        }
    }

    if let Ok(graph) = GraphInfo::from_yaml(text) {
        let _ = graph.validate();
        let _ = graph.dump();
    }
});
