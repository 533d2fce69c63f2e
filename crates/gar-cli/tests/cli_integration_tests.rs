//! CLI Integration Tests
//!
//! Tests for `gar` commands using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PERSON: &str = "\
label: person
chunk_size: 100
prefix: vertex/person/
property_groups:
  - file_type: csv
    properties:
      - name: id
        data_type: int64
        is_primary: true
  - file_type: orc
    properties:
      - name: firstName
        data_type: string
      - name: lastName
        data_type: string
version: gar/v1
";

const KNOWS: &str = "\
src_label: person
edge_label: knows
dst_label: person
chunk_size: 1024
src_chunk_size: 100
dst_chunk_size: 100
directed: true
prefix: edge/person_knows_person/
adj_lists:
  - ordered: true
    aligned_by: dst
    file_type: parquet
  - ordered: false
    aligned_by: src
    file_type: parquet
    property_groups:
      - file_type: parquet
        properties:
          - name: creationDate
            data_type: string
version: gar/v1
";

const SOCIAL: &str = "\
name: social
prefix: /data/social/
vertices:
  - person.vertex.yml
edges:
  - person_knows_person.edge.yml
version: gar/v1
";

/// Get the CLI binary command
#[allow(deprecated)]
fn gar_cmd() -> Command {
    Command::cargo_bin("gar").unwrap()
}

/// Writes the sample graph into `dir`
fn write_sample(dir: &Path) {
    fs::write(dir.join("person.vertex.yml"), PERSON).unwrap();
    fs::write(dir.join("person_knows_person.edge.yml"), KNOWS).unwrap();
    fs::write(dir.join("social.graph.yml"), SOCIAL).unwrap();
}

// =============================================================================
// Help & Version Tests
// =============================================================================

#[test]
fn test_help_displays_usage() {
    gar_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GAR CLI"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    gar_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gar"));
}

#[test]
fn test_invalid_command_shows_error() {
    gar_cmd()
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// =============================================================================
// Show Command Tests
// =============================================================================

#[test]
fn test_show_vertex_text() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("show")
        .arg(temp_dir.path().join("person.vertex.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertex: person"))
        .stdout(predicate::str::contains("id [csv] id: int64 (primary)"))
        .stdout(predicate::str::contains("firstName_lastName [orc]"));
}

#[test]
fn test_show_edge_json() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("show")
        .arg(temp_dir.path().join("person_knows_person.edge.yml"))
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"edge_label\": \"knows\""))
        .stdout(predicate::str::contains("\"aligned_by\": \"dst\""));
}

#[test]
fn test_show_graph_resolves_children() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("show")
        .arg(temp_dir.path().join("social.graph.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph: social"))
        .stdout(predicate::str::contains("person (chunk_size 100, 2 groups)"))
        .stdout(predicate::str::contains(
            "person_knows_person [unordered_by_source, ordered_by_dest]",
        ));
}

#[test]
fn test_show_requires_kind_for_unknown_suffix() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("person.yml");
    fs::write(&path, PERSON).unwrap();

    gar_cmd()
        .arg("show")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--kind"));

    gar_cmd()
        .arg("show")
        .arg(&path)
        .args(["--kind", "vertex"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Vertex: person"));
}

// =============================================================================
// Validate Command Tests
// =============================================================================

#[test]
fn test_validate_ok() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("validate")
        .arg(temp_dir.path().join("social.graph.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: graph schema"));
}

#[test]
fn test_validate_reports_error_code() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.vertex.yml");
    fs::write(&path, PERSON.replace("chunk_size: 100", "chunk_size: 0")).unwrap();

    gar_cmd()
        .arg("validate")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GAR-011"));
}

#[test]
fn test_validate_graph_with_dangling_edge() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());
    let graph = temp_dir.path().join("edges_only.graph.yml");
    fs::write(
        &graph,
        "name: g\nedges:\n  - person_knows_person.edge.yml\nversion: gar/v1\n",
    )
    .unwrap();

    gar_cmd()
        .arg("validate")
        .arg(&graph)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GAR-014"));
}

#[test]
fn test_validate_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    gar_cmd()
        .arg("validate")
        .arg(temp_dir.path().join("missing.vertex.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("GAR-020"));
}

// =============================================================================
// Paths Command Tests
// =============================================================================

#[test]
fn test_paths_vertex() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("paths")
        .arg(temp_dir.path().join("person.vertex.yml"))
        .args(["--chunk", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vertex/person/id/chunk3"))
        .stdout(predicate::str::contains("vertex/person/firstName_lastName/chunk3"))
        .stdout(predicate::str::contains("vertex/person/vertex_count"));
}

#[test]
fn test_paths_edge() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("paths")
        .arg(temp_dir.path().join("person_knows_person.edge.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "edge/person_knows_person/ordered_by_dest/adj_list/part0/chunk0",
        ))
        .stdout(predicate::str::contains(
            "edge/person_knows_person/ordered_by_dest/offset/chunk0",
        ))
        .stdout(predicate::str::contains(
            "edge/person_knows_person/unordered_by_source/creationDate/part0/chunk0",
        ));
}

#[test]
fn test_paths_help_explains_part_selects_offset_chunk() {
    gar_cmd()
        .args(["paths", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("offset and edge_count"));
}

#[test]
fn test_paths_edge_offset_follows_part() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("paths")
        .arg(temp_dir.path().join("person_knows_person.edge.yml"))
        .args(["--part", "2", "--chunk", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "edge/person_knows_person/ordered_by_dest/adj_list/part2/chunk5",
        ))
        .stdout(predicate::str::contains(
            "edge/person_knows_person/ordered_by_dest/offset/chunk2",
        ));
}

#[test]
fn test_paths_graph_prefixes_data_root() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("paths")
        .arg(temp_dir.path().join("social.graph.yml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("/data/social/vertex/person/id/chunk0"));
}

#[test]
fn test_paths_negative_chunk_fails() {
    let temp_dir = TempDir::new().unwrap();
    write_sample(temp_dir.path());

    gar_cmd()
        .arg("paths")
        .arg(temp_dir.path().join("person.vertex.yml"))
        .args(["--chunk", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GAR-012"));
}

// =============================================================================
// New Command Tests
// =============================================================================

#[test]
fn test_new_vertex_then_validate() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("person.vertex.yml");

    gar_cmd()
        .args(["new", "vertex", "person"])
        .args(["-g", "id:int64:primary"])
        .args(["-g", "firstName:string,lastName:string"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    gar_cmd()
        .arg("validate")
        .arg(&output)
        .assert()
        .success();
}

#[test]
fn test_new_uses_config_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("gar.toml");
    fs::write(
        &config,
        "[defaults]\nvertex_chunk_size = 512\nfile_type = \"csv\"\n\n[storage]\nrequire_validated = true\n",
    )
    .unwrap();
    let output = temp_dir.path().join("post.vertex.yml");

    gar_cmd()
        .arg("--config")
        .arg(&config)
        .args(["new", "vertex", "post", "-g", "id:int64:primary", "-o"])
        .arg(&output)
        .assert()
        .success();

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("chunk_size: 512"));
    assert!(written.contains("file_type: csv"));
}

#[test]
fn test_new_edge_with_adj_lists() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("knows.edge.yml");

    gar_cmd()
        .args(["new", "edge", "person", "knows", "person"])
        .args(["--adj-list", "ordered_by_source", "--adj-list", "unordered_by_dest"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    gar_cmd()
        .arg("show")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("adj_list ordered_by_source [parquet]"))
        .stdout(predicate::str::contains("adj_list unordered_by_dest [parquet]"));
}

#[test]
fn test_new_edge_rejects_unknown_adj_list() {
    gar_cmd()
        .args(["new", "edge", "a", "e", "b", "--adj-list", "sorted"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GAR-017"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("gar.toml");
    fs::write(&config, "[logging]\nlevel = \"loud\"\n").unwrap();

    gar_cmd()
        .arg("--config")
        .arg(&config)
        .arg("show")
        .arg(temp_dir.path().join("x.vertex.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("logging.level"));
}
