//! Loading geometry from disk

use std::io::Write;

use meshbuf_core::{FaceArity, GeometryLoader, LoadError, LoadOptions};
use tempfile::NamedTempFile;

const OCTA_HALF: &str = "\
# upper half of an octahedron
v 1 0 0
v 0 1 0
v -1 0 0
v 0 0 1
v 0 0 -1
vn 0.577 0.577 0.577
vn -0.577 0.577 0.577
f 1//1 2//1 4//1
f 2//2 3//2 4//2
";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write temp file");
    file
}

#[test]
fn test_load_file_matches_load_str() {
    let file = write_temp(OCTA_HALF);
    let loader = GeometryLoader::default();

    let from_file = loader.load_file(file.path()).expect("load from file");
    let from_str = loader.load_str(OCTA_HALF).expect("load from str");

    assert_eq!(from_file.vertices, from_str.vertices);
    assert_eq!(from_file.indices, from_str.indices);
    assert_eq!(from_file.layout, from_str.layout);

    assert_eq!(from_file.counts.positions, 5);
    assert_eq!(from_file.counts.normals, 2);
    assert_eq!(from_file.counts.faces, 2);
    assert_eq!(from_file.layout.stride, 6);
    assert_eq!(from_file.vertices.len(), 6 * from_file.layout.stride);
    assert_eq!(from_file.indices, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = GeometryLoader::default()
        .load_file(dir.path().join("missing.obj"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_crlf_line_endings() {
    let file = write_temp("v 0 0 0\r\nv 1 0 0\r\nv 0 1 0\r\nf 1 2 3\r\n");
    let mesh = GeometryLoader::default()
        .load_file(file.path())
        .expect("load crlf file");
    assert_eq!(mesh.vertices, vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn test_triangulated_quad_from_file() {
    let file = write_temp("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n");
    let loader = GeometryLoader::new(LoadOptions {
        face_arity: FaceArity::Triangulate,
        ..LoadOptions::default()
    });
    let mesh = loader.load_file(file.path()).expect("load quad");
    assert_eq!(mesh.record_count(), 6);
    let area: f32 = mesh
        .triangles()
        .expect("aligned records")
        .iter()
        .map(|t| t.area())
        .sum();
    assert!((area - 1.0).abs() < 1e-6);
}

#[test]
fn test_reference_preset_reproduces_original_output() {
    let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0.5 0.5\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
    let mesh = GeometryLoader::new(LoadOptions::reference())
        .load_str(text)
        .expect("load");
    // Texture indices between two slashes are dropped, the layout still
    // reserves room for them.
    assert_eq!(mesh.layout.stride, 8);
    assert_eq!(mesh.vertices.len(), 3 * 6);
    assert_eq!(&mesh.vertices[..6], &[0.0, 0.0, 0.0, 0.0, 0.0, 1.0]);
    assert!(!mesh.records_aligned());
}

#[test]
fn test_latin1_comment_does_not_fail_load() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(b"# cr\xe9\xe9 par un exporteur\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3 # fa\xe7ade\n")
        .expect("Failed to write temp file");

    let mesh = GeometryLoader::default()
        .load_file(file.path())
        .expect("load latin-1 file");
    assert_eq!(mesh.counts.positions, 3);
    assert_eq!(mesh.record_count(), 3);
    assert!(mesh.diagnostics.is_empty());
}

#[test]
fn test_exporter_preamble_loads_with_defaults() {
    let text = "\
o Cube
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vn 0 1 0
s 0
usemtl m
f 1//1 2//1 3//2
";
    let mesh = GeometryLoader::default().load_str(text).expect("load");
    assert_eq!(mesh.layout.stride, 6);
    assert_eq!(mesh.vertices.len(), 18);
    assert_eq!(&mesh.vertices[12..18], &[0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
}
