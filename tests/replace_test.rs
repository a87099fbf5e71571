//! Mode B (record image replacement) integration tests

use portfolio_sync::config::Config;
use portfolio_sync::prompt::ScriptedPrompter;
use portfolio_sync::session::{Flush, Session};
use portfolio_sync::workflow::{self, run_replace, Mode, ReplaceOutcome};
use portfolio_sync_common::{extract_records, Collection};
use std::fs;
use tempfile::{tempdir, TempDir};

const CERTIFICATES: &str = r##"// Legacy list, kept for reference
// export const certificatesData = [
//   { id: 3, gambar: "legacy.png", judul: "Old" },
// ];

export const certificatesData = [
  {
    id: 1,
    gambar: oldpic.jpg,
    judul: "Dicoding Web",
    link: "https://www.dicoding.com/",
  },
  {
    id: 2,
    gambar: 'aws.png',
    judul: "AWS Cloud Practitioner",
    link: "#",
  },
];

export const projectsData = [];
"##;

fn setup(source: &str, images: &[&str]) -> (TempDir, Config) {
    let dir = tempdir().expect("Failed to create temp dir");
    let image_dir = dir.path().join("images");
    fs::create_dir_all(&image_dir).unwrap();
    for name in images {
        fs::write(image_dir.join(name), b"img").unwrap();
    }
    let data_file = dir.path().join("data.js");
    fs::write(&data_file, source).unwrap();

    let config = Config {
        image_dir,
        data_file,
        ignore_file: dir.path().join("ignore.json"),
        ..Default::default()
    };
    (dir, config)
}

/// Unknown id: "ID not found", nothing written
#[test]
fn test_unknown_id_scenario() {
    let (_dir, config) = setup(CERTIFICATES, &["newpic.png"]);
    let session = Session::open(config.clone()).unwrap();

    // menu: replace, collection: certificates, id 3 (only in the commented block)
    let mut prompter = ScriptedPrompter::new(["1", "0", "3"]);
    let flush = workflow::run(session, &mut prompter, None).unwrap();

    assert_eq!(flush, Flush::Unchanged);
    assert_eq!(prompter.remaining(), 0);
    assert_eq!(fs::read_to_string(&config.data_file).unwrap(), CERTIFICATES);
}

/// Unquoted image value gains double quotes; file written once
#[test]
fn test_replace_unquoted_scenario() {
    let (_dir, config) = setup(CERTIFICATES, &["newpic.png"]);
    let session = Session::open(config.clone()).unwrap();

    let mut prompter = ScriptedPrompter::new(["1", "1"]);
    let flush = workflow::run(session, &mut prompter, Some(Mode::Replace(Some(Collection::Certificates)))).unwrap();
    assert_eq!(flush, Flush::Written);

    let written = fs::read_to_string(&config.data_file).unwrap();
    assert_eq!(
        written,
        CERTIFICATES.replace("gambar: oldpic.jpg,", "gambar: \"newpic.png\",")
    );
}

/// Quoted value keeps its quote style; other records are byte-identical
#[test]
fn test_replace_keeps_quote_style() {
    let (_dir, config) = setup(CERTIFICATES, &["newpic.png"]);
    let mut session = Session::open(config.clone()).unwrap();

    let mut prompter = ScriptedPrompter::new(["2", "1"]);
    let outcome = run_replace(&mut session, &mut prompter, Some(Collection::Certificates)).unwrap();
    assert_eq!(
        outcome,
        ReplaceOutcome::Replaced {
            collection: Collection::Certificates,
            id: 2,
            file_name: "newpic.png".to_string(),
        }
    );

    assert_eq!(session.source(), CERTIFICATES.replace("'aws.png'", "'newpic.png'"));

    let records = extract_records(session.source(), "certificatesData").unwrap();
    assert_eq!(records[0].gambar.as_deref(), Some("oldpic.jpg"));
    assert_eq!(records[1].gambar.as_deref(), Some("newpic.png"));
}

/// Index outside the listed images aborts the branch
#[test]
fn test_invalid_image_index() {
    let (_dir, config) = setup(CERTIFICATES, &["newpic.png", "other.png"]);
    let mut session = Session::open(config.clone()).unwrap();

    for answer in ["0", "3", "two"] {
        let mut prompter = ScriptedPrompter::new(["1", answer]);
        let outcome = run_replace(&mut session, &mut prompter, Some(Collection::Certificates)).unwrap();
        assert!(matches!(outcome, ReplaceOutcome::Aborted(ref m) if m.starts_with("Invalid selection")));
    }

    assert!(!session.is_mutated());
    assert_eq!(session.finish().unwrap(), Flush::Unchanged);
    assert_eq!(fs::read_to_string(&config.data_file).unwrap(), CERTIFICATES);
}

/// Ignored images are not listed as replacements
#[test]
fn test_ignored_images_not_selectable() {
    let (_dir, config) = setup(CERTIFICATES, &["bg-dots.png", "newpic.png"]);
    let mut session = Session::open(config).unwrap();
    assert!(session.ignore.contains("bg-dots.png"));

    // only newpic.png is listed, so 2 is out of range
    let mut prompter = ScriptedPrompter::new(["1", "2"]);
    let outcome = run_replace(&mut session, &mut prompter, Some(Collection::Certificates)).unwrap();
    assert!(matches!(outcome, ReplaceOutcome::Aborted(_)));

    let mut prompter = ScriptedPrompter::new(["1", "1"]);
    let outcome = run_replace(&mut session, &mut prompter, Some(Collection::Certificates)).unwrap();
    assert!(matches!(outcome, ReplaceOutcome::Replaced { ref file_name, .. } if file_name == "newpic.png"));
}

/// Empty collection aborts before asking for an id
#[test]
fn test_empty_collection_aborts() {
    let (_dir, config) = setup(CERTIFICATES, &["newpic.png"]);
    let mut session = Session::open(config).unwrap();

    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
    let outcome = run_replace(&mut session, &mut prompter, Some(Collection::Projects)).unwrap();
    assert_eq!(
        outcome,
        ReplaceOutcome::Aborted("no records found in collection `projectsData`".to_string())
    );
    assert!(prompter.asked.is_empty());
}

/// Missing collection block aborts with a diagnostic
#[test]
fn test_missing_collection_aborts() {
    let source = "export const certificatesData = [{ id: 1, gambar: \"a.png\" }];\n";
    let (_dir, config) = setup(source, &["a.png"]);
    let mut session = Session::open(config.clone()).unwrap();

    let mut prompter = ScriptedPrompter::new(Vec::<String>::new());
    let outcome = run_replace(&mut session, &mut prompter, Some(Collection::Projects)).unwrap();
    assert!(matches!(outcome, ReplaceOutcome::Aborted(ref m) if m.contains("not found")));
    assert_eq!(session.finish().unwrap(), Flush::Unchanged);
    assert_eq!(fs::read_to_string(&config.data_file).unwrap(), source);
}

/// Non-numeric id is treated as not found
#[test]
fn test_non_numeric_id() {
    let (_dir, config) = setup(CERTIFICATES, &["newpic.png"]);
    let mut session = Session::open(config).unwrap();

    let mut prompter = ScriptedPrompter::new(["abc"]);
    let outcome = run_replace(&mut session, &mut prompter, Some(Collection::Certificates)).unwrap();
    assert_eq!(outcome, ReplaceOutcome::Aborted("ID not found: abc".to_string()));
}
