use doc_lingo::manifest::{ManifestEntry, parse_manifest, read_manifest};
use std::path::Path;

#[test]
fn reads_filename_column_verbatim_and_ignores_others() {
    let raw = "id, filename ,notes\n1,alpha,first\n2, beta ,second\n";
    let entries = parse_manifest(raw.as_bytes()).unwrap();
    assert_eq!(
        entries,
        vec![
            ManifestEntry { filename: "alpha".into() },
            ManifestEntry { filename: " beta ".into() },
        ]
    );
}

#[test]
fn missing_filename_column_is_an_error() {
    let err = parse_manifest("name\nalpha\n".as_bytes()).unwrap_err();
    assert!(format!("{err:#}").contains("filename"));
}

#[test]
fn header_only_manifest_is_empty() {
    assert!(parse_manifest("filename\n".as_bytes()).unwrap().is_empty());
}

#[test]
fn missing_manifest_file_is_an_error() {
    assert!(read_manifest(Path::new("does/not/exist.csv")).is_err());
}

#[test]
fn pdf_path_appends_extension() {
    let entry = ManifestEntry { filename: "P2158".into() };
    assert_eq!(entry.pdf_path(Path::new("in")), Path::new("in").join("P2158.pdf"));
}
