use super::{find_documents, mirror_folder, prepare_destination, run_batch};
use crate::encoding::lookup;
use crate::mutation::MutationTable;
use crate::rewrite::TransformOptions;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_prepare_destination_keeps_preserved_dir() {
    let dest = TempDir::new().unwrap();
    write(&dest.path().join("DTM/terrain.dtm"), "keep");
    write(&dest.path().join("old.pf"), "stale");
    write(&dest.path().join("sub/old.txt"), "stale");

    prepare_destination(dest.path(), "DTM").unwrap();

    let names: Vec<_> = fs::read_dir(dest.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, ["DTM"]);
    assert_eq!(
        fs::read_to_string(dest.path().join("DTM/terrain.dtm")).unwrap(),
        "keep"
    );
}

#[test]
fn test_prepare_destination_creates_missing_dir() {
    let root = TempDir::new().unwrap();
    let dest = root.path().join("a/b");
    prepare_destination(&dest, "DTM").unwrap();
    assert!(dest.is_dir());
}

#[test]
fn test_mirror_folder_skips_preserved_source_dir() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(&src.path().join("a.pf"), "#A 1\n");
    write(&src.path().join("nested/b.pf"), "#B 2\n");
    write(&src.path().join("DTM/new.dtm"), "from source");
    write(&dest.path().join("DTM/old.dtm"), "from dest");

    mirror_folder(src.path(), dest.path(), "DTM").unwrap();

    assert_eq!(fs::read_to_string(dest.path().join("a.pf")).unwrap(), "#A 1\n");
    assert_eq!(
        fs::read_to_string(dest.path().join("nested/b.pf")).unwrap(),
        "#B 2\n"
    );
    assert!(dest.path().join("DTM/old.dtm").exists());
    assert!(!dest.path().join("DTM/new.dtm").exists());
}

#[test]
fn test_find_documents_filters_extensions_without_recursing() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("b.pf"), "");
    write(&dir.path().join("a.PF"), "");
    write(&dir.path().join("notes.txt"), "");
    write(&dir.path().join("nested/c.pf"), "");

    let docs = find_documents(&[dir.path().to_path_buf()], &["pf".to_string()]).unwrap();
    let names: Vec<_> = docs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.PF", "b.pf"]);
}

#[test]
fn test_find_documents_accepts_files_and_rejects_missing() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("x.pf");
    write(&file, "");
    let txt = dir.path().join("x.txt");
    write(&txt, "");

    let docs = find_documents(&[file.clone(), txt], &["pf".to_string()]).unwrap();
    assert_eq!(docs, [file]);

    assert!(find_documents(&[dir.path().join("missing")], &["pf".to_string()]).is_err());
}

#[test]
fn test_run_batch_rewrites_top_level_files_only() {
    let src = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    write(&src.path().join("road.pf"), "#数模 old\n#模型管理\n0 1\n");
    write(&src.path().join("nested/deep.pf"), "#数模 old\n");

    let reports = run_batch(
        src.path(),
        dest.path(),
        "DTM",
        &["pf".to_string()],
        &MutationTable::builtin(),
        TransformOptions {
            model_filename: true,
            start_elev_offset: false,
        },
        lookup("utf-8").unwrap(),
    )
    .unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(
        fs::read_to_string(dest.path().join("road.pf")).unwrap(),
        "#数模 2000地形图总和-8号色\n#模型管理\n0 road    改移道路\n"
    );
    assert_eq!(
        fs::read_to_string(dest.path().join("nested/deep.pf")).unwrap(),
        "#数模 old\n"
    );
    assert_eq!(
        fs::read_to_string(src.path().join("road.pf")).unwrap(),
        "#数模 old\n#模型管理\n0 1\n"
    );
}
