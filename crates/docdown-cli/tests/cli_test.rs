//! Integration tests for the docdown CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_docdown"))
}

const MHTML_DOC: &str = "MIME-Version: 1.0\r\n\
Content-Type: multipart/related; boundary=\"BOUNDARY\"\r\n\
\r\n\
--BOUNDARY\r\n\
Content-Type: text/html; charset=\"iso-8859-1\"\r\n\
Content-Transfer-Encoding: quoted-printable\r\n\
\r\n\
<html><body><h1>Gr=FC=DFe</h1><p>Hello =\r\n\
world</p></body></html>\r\n\
--BOUNDARY--\r\n";

#[test]
fn test_directory_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("docIn");
    let output_dir = temp_dir.path().join("docOut");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("first.doc"), "<h1>First</h1><p>One</p>").unwrap();
    fs::write(input_dir.join("second.DOC"), MHTML_DOC).unwrap();
    fs::write(input_dir.join("ignored.txt"), "<p>no</p>").unwrap();

    cli()
        .arg(&input_dir)
        .arg("-o")
        .arg(&output_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted "))
        .stdout(predicate::str::contains("first.md"))
        .stdout(predicate::str::contains("second.md"));

    assert_eq!(
        fs::read_to_string(output_dir.join("first.md")).unwrap(),
        "# First\n\nOne\n"
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("second.md")).unwrap(),
        "# Grüße\n\nHello world\n"
    );
    assert!(!output_dir.join("ignored.md").exists());
}

#[test]
fn test_default_directories() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("docIn");
    fs::create_dir(&input_dir).unwrap();
    fs::write(input_dir.join("page.doc"), "<p>Default paths</p>").unwrap();

    cli()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("page.md"));

    assert_eq!(
        fs::read_to_string(temp_dir.path().join("docOut/page.md")).unwrap(),
        "Default paths\n"
    );
}

#[test]
fn test_single_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("notes.doc");
    fs::write(&input, "<ul><li>a</li><li>b</li></ul>").unwrap();
    let output_dir = temp_dir.path().join("out");

    cli()
        .arg(&input)
        .arg("--output")
        .arg(&output_dir)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(output_dir.join("notes.md")).unwrap(),
        "- a\n- b\n"
    );
}

#[test]
fn test_stdin_to_stdout() {
    cli()
        .arg("-")
        .write_stdin("<h1>Title</h1><p>Content</p>")
        .assert()
        .success()
        .stdout("# Title\n\nContent\n");
}

#[test]
fn test_metadata_frontmatter() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("release_notes.doc");
    fs::write(&input, "<p>No heading here</p>").unwrap();
    let output_dir = temp_dir.path().join("out");

    cli()
        .arg(&input)
        .arg("-o")
        .arg(&output_dir)
        .arg("--metadata")
        .assert()
        .success();

    let markdown = fs::read_to_string(output_dir.join("release_notes.md")).unwrap();
    assert!(markdown.starts_with("---\ntitle: \"Release Notes\"\nsource_file: \"release_notes.doc\"\n"));
    assert!(markdown.contains("format: \"markdown\"\n---\n\nNo heading here\n"));
}

#[test]
fn test_custom_extension() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("page.html"), "<p>html</p>").unwrap();
    let output_dir = temp_dir.path().join("out");

    cli()
        .arg(temp_dir.path())
        .arg("-o")
        .arg(&output_dir)
        .arg("--extension")
        .arg("html")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(output_dir.join("page.md")).unwrap(),
        "html\n"
    );
}

#[test]
fn test_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing");

    cli()
        .arg(&missing)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_no_matching_files() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.txt"), "x").unwrap();

    cli()
        .arg(temp_dir.path())
        .arg("-o")
        .arg(temp_dir.path().join("out"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No .doc files found to convert"));
}

#[test]
fn test_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--metadata"));
}
