//! Ignore list persistence tests

use portfolio_sync::ignore::IgnoreList;
use tempfile::tempdir;

/// Bootstrapping keeps only decorative names and writes the file at once
#[test]
fn test_bootstrap_from_listing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("ignore.json");

    let names = ["hero.webp", "logo.svg", "project-1.png", "meow.jpg", "cert.png"];
    let (list, bootstrapped) = IgnoreList::load_or_bootstrap(&path, names).unwrap();

    assert!(bootstrapped);
    assert_eq!(list.entries(), ["hero.webp", "logo.svg", "meow.jpg"]);
    assert!(path.exists());
}

/// An existing list is loaded verbatim, even entries that match no pattern
#[test]
fn test_existing_list_loaded_verbatim() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("ignore.json");
    std::fs::write(&path, r#"["zeta.png", "alpha.png"]"#).unwrap();

    let (list, bootstrapped) = IgnoreList::load_or_bootstrap(&path, ["bg.png"]).unwrap();
    assert!(!bootstrapped);
    assert_eq!(list.entries(), ["zeta.png", "alpha.png"]);
    assert!(!list.contains("bg.png"));
}

/// Empty listing still creates the file
#[test]
fn test_bootstrap_empty_listing() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("ignore.json");

    let (list, _) = IgnoreList::load_or_bootstrap(&path, Vec::<&str>::new()).unwrap();
    assert!(list.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "[]");
}

/// Additions are persisted immediately and never duplicated
#[test]
fn test_add_persists_and_dedups() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("ignore.json");
    let (mut list, _) = IgnoreList::load_or_bootstrap(&path, ["meow.jpg"]).unwrap();

    assert!(list.add("divider.png").unwrap());
    assert!(!list.add("divider.png").unwrap());
    assert!(!list.add("meow.jpg").unwrap());

    let reloaded = IgnoreList::load(&path).unwrap();
    assert_eq!(reloaded.entries(), ["meow.jpg", "divider.png"]);
}
