use romlauncher_catalog::{Catalog, CatalogBuilder, CatalogError, EntryKind};
use std::fs;
use tempfile::TempDir;

fn library() -> (TempDir, String) {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir(root.join("snes")).unwrap();
    fs::create_dir(root.join("NES")).unwrap();
    fs::create_dir(root.join("gba")).unwrap();
    fs::write(root.join("zelda.nes"), b"rom").unwrap();
    fs::write(root.join("Metroid.nes"), b"rom").unwrap();
    fs::write(root.join("_notes.txt"), b"txt").unwrap();
    fs::write(root.join("snes").join("mario.sfc"), b"rom").unwrap();

    let path = root.to_str().unwrap().to_string();
    (temp, path)
}

#[test]
fn test_build_orders_each_sequence_bytewise() {
    let (_temp, root) = library();
    let catalog = Catalog::build(root.clone()).unwrap();

    let dirs: Vec<&str> = catalog.directories().iter().map(|e| e.name.as_str()).collect();
    let files: Vec<&str> = catalog.files().iter().map(|e| e.name.as_str()).collect();

    assert_eq!(dirs, vec!["NES", "gba", "snes"]);
    assert_eq!(files, vec!["Metroid.nes", "_notes.txt", "zelda.nes"]);
    assert!(catalog.directories().iter().all(|e| e.kind == EntryKind::Directory));
    assert!(catalog.files().iter().all(|e| e.kind == EntryKind::File));
}

#[test]
fn test_directories_and_files_never_interleave() {
    let (_temp, root) = library();
    let catalog = Catalog::build(root).unwrap();

    for j in 0..catalog.file_count() {
        let vi = catalog.virtual_index_of_file(j);
        assert_eq!(vi, catalog.dir_count() + j);
        assert!(!catalog.entry(vi).unwrap().is_dir());
    }
    for i in 0..catalog.dir_count() {
        assert!(catalog.entry(catalog.virtual_index_of_dir(i)).unwrap().is_dir());
    }
}

#[test]
fn test_unreadable_directory() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing");
    let err = Catalog::build(missing.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, CatalogError::DirectoryUnreadable { .. }));
}

#[test]
fn test_navigate_into_and_up() {
    let (_temp, root) = library();
    let builder = CatalogBuilder::new();
    let catalog = builder.build(root.clone()).unwrap();

    // "snes" is the third directory.
    let snes = builder.navigate_into(&catalog, 2).unwrap();
    assert!(snes.path().ends_with("/snes"));
    assert_eq!(snes.file_count(), 1);
    assert_eq!(snes.files()[0].name.as_str(), "mario.sfc");

    let back = builder.navigate_up(&snes, &root).unwrap().unwrap();
    assert_eq!(back.path(), root);
    assert_eq!(back, catalog);

    // The root is a floor.
    assert!(builder.navigate_up(&back, &root).unwrap().is_none());
}

#[test]
fn test_navigate_into_file_is_rejected() {
    let (_temp, root) = library();
    let builder = CatalogBuilder::new();
    let catalog = builder.build(root).unwrap();
    let first_file = catalog.virtual_index_of_file(0);

    let err = builder.navigate_into(&catalog, first_file).unwrap_err();
    assert!(matches!(err, CatalogError::NotADirectory { .. }));
}

#[test]
fn test_failed_rebuild_leaves_old_catalog_intact() {
    let (temp, root) = library();
    let builder = CatalogBuilder::new();
    let catalog = builder.build(root.clone()).unwrap();
    let before = catalog.clone();

    // The directory vanishes between listing and entering it.
    fs::remove_dir_all(temp.path().join("gba")).unwrap();
    let result = builder.navigate_into(&catalog, 1);

    assert!(result.is_err());
    assert_eq!(catalog, before);
    assert_eq!(catalog.path(), root);
}

#[test]
fn test_rebuild_reflects_changes() {
    let (temp, root) = library();
    let builder = CatalogBuilder::new();
    let first = builder.build(root.clone()).unwrap();

    fs::write(temp.path().join("aaa.gb"), b"rom").unwrap();
    let second = builder.build(root).unwrap();

    assert_eq!(second.file_count(), first.file_count() + 1);
    assert_eq!(second.files()[0].name.as_str(), "Metroid.nes");
    assert_eq!(second.files()[2].name.as_str(), "aaa.gb");
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().unwrap();
    let catalog = Catalog::build(temp.path().to_str().unwrap()).unwrap();
    assert!(catalog.is_empty());
    assert!(catalog.entry(0).is_none());
    assert!(catalog.view_entries().is_empty());
}

#[test]
fn test_navigation_keeps_builder_entry_cap() {
    let (temp, root) = library();
    for name in ["a.sfc", "b.sfc", "c.sfc"] {
        fs::write(temp.path().join("snes").join(name), b"rom").unwrap();
    }
    fs::write(temp.path().join("zz.gb"), b"rom").unwrap();

    let builder = CatalogBuilder::new().max_entries(3);
    let catalog = builder.build(root.clone()).unwrap();
    assert_eq!(catalog.file_count(), 3);
    let snes = builder.navigate_into(&catalog, 2).unwrap();

    // mario.sfc sorts after the other three, so the cap drops it.
    let files: Vec<&str> = snes.files().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(files, vec!["a.sfc", "b.sfc", "c.sfc"]);

    let back = builder.navigate_up(&snes, &root).unwrap().unwrap();
    assert_eq!(back.file_count(), 3);
    assert!(back.files().iter().all(|e| e.name.as_str() != "zz.gb"));
}
