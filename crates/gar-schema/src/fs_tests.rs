//! Tests for the filesystem collaborator.

use super::fs::*;
use tempfile::TempDir;

#[test]
fn test_local_write_creates_parents_and_reads_back() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("nested/dir/person.vertex.yml");
    let path = target.to_str().unwrap();

    LocalFileSystem.write(path, b"label: person\n").unwrap();

    assert_eq!(LocalFileSystem.read(path).unwrap(), b"label: person\n");
    let entries: Vec<_> = std::fs::read_dir(temp_dir.path().join("nested/dir"))
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["person.vertex.yml"]);
}

#[test]
fn test_local_failed_write_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    // A non-empty directory cannot be replaced by a file.
    let target = temp_dir.path().join("blocked");
    std::fs::create_dir(&target).unwrap();
    std::fs::write(target.join("keep"), b"x").unwrap();

    let result = LocalFileSystem.write(target.to_str().unwrap(), b"label: person\n");

    assert!(result.is_err());
    let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["blocked"]);
}

#[test]
fn test_local_concurrent_writes_to_one_path() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("g.graph.yml");
    let path = target.to_str().unwrap();
    let payloads: Vec<String> = (0..8).map(|i| format!("name: g{i}\n")).collect();

    std::thread::scope(|scope| {
        for payload in &payloads {
            scope.spawn(move || LocalFileSystem.write(path, payload.as_bytes()).unwrap());
        }
    });

    let written = String::from_utf8(LocalFileSystem.read(path).unwrap()).unwrap();
    assert!(payloads.contains(&written));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_local_accepts_file_uri() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("g.graph.yml");
    let uri = format!("file://{}", target.display());

    LocalFileSystem.write(&uri, b"name: g\n").unwrap();

    assert!(target.exists());
    assert_eq!(LocalFileSystem.read(&uri).unwrap(), b"name: g\n");
}

#[test]
fn test_local_read_missing_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.yml");

    let err = LocalFileSystem.read(missing.to_str().unwrap()).unwrap_err();

    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn test_local_write_overwrites() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("a.yml");
    let path = target.to_str().unwrap();

    LocalFileSystem.write(path, b"first").unwrap();
    LocalFileSystem.write(path, b"second").unwrap();

    assert_eq!(LocalFileSystem.read(path).unwrap(), b"second");
}

#[test]
fn test_memory_file_system() {
    let fs = MemoryFileSystem::new();
    assert!(!fs.contains("a.yml"));

    fs.write("b.yml", b"b").unwrap();
    fs.write("a.yml", b"a").unwrap();

    assert!(fs.contains("a.yml"));
    assert_eq!(fs.read("b.yml").unwrap(), b"b");
    assert_eq!(fs.paths(), vec!["a.yml".to_string(), "b.yml".to_string()]);
    assert_eq!(
        fs.read("c.yml").unwrap_err().kind(),
        std::io::ErrorKind::NotFound
    );
}

#[test]
fn test_resolve_relative() {
    assert_eq!(
        resolve_relative("/data/ldbc/ldbc.graph.yml", "person.vertex.yml"),
        "/data/ldbc/person.vertex.yml"
    );
    assert_eq!(
        resolve_relative("ldbc.graph.yml", "person.vertex.yml"),
        "person.vertex.yml"
    );
    assert_eq!(
        resolve_relative("/data/ldbc.graph.yml", "/abs/person.vertex.yml"),
        "/abs/person.vertex.yml"
    );
    assert_eq!(
        resolve_relative("/data/ldbc.graph.yml", "file:///abs/person.vertex.yml"),
        "file:///abs/person.vertex.yml"
    );
    assert_eq!(
        resolve_relative("file:///tmp/g.graph.yml", "e.edge.yml"),
        "file:///tmp/e.edge.yml"
    );
}
