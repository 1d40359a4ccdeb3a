//! Integration tests for the `desk` CLI.
//!
//! Each test creates a temp content directory, runs `desk` as a subprocess,
//! and verifies stdout and/or exit status.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Get the path to the built `desk` binary.
fn desk_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("desk");
    path
}

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(desk_bin())
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .expect("failed to run desk")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Create a small content tree in the given directory.
fn create_test_content(root: &Path) {
    fs::create_dir_all(root.join("posts/rust")).unwrap();
    fs::create_dir_all(root.join("notes")).unwrap();

    fs::write(
        root.join("desk.toml"),
        "[site]\nname = \"test-desk\"\n\n[start]\nopen = \"welcome.md\"\nrecent_limit = 2\n",
    )
    .unwrap();

    fs::write(
        root.join("welcome.md"),
        "---\ntitle: Welcome\ndate: 2024-03-01\n---\n# Welcome\n\nhi\n",
    )
    .unwrap();

    fs::write(
        root.join("posts/rust/borrowck.md"),
        "\
---
title: \"Fighting the Borrow Checker\"
date: 2024-01-20
tags:
  - rust
  - compilers
---
# Intro

## Setup

## Intro

```
# not a heading
```
",
    )
    .unwrap();

    fs::write(
        root.join("posts/rust/lifetimes.md"),
        "---\ntitle: Lifetimes\ndate: 2024-02-10\ntags:\n  - rust\n---\nbody\n",
    )
    .unwrap();

    fs::write(root.join("notes/scratch.md"), "no front matter at all\n").unwrap();
}

// --- tree ---

#[test]
fn test_tree_text_output() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["tree"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("test-desk"));
    assert!(text.contains("├─ notes/"));
    assert!(text.contains("borrowck.md"));
    assert!(text.contains("└─ welcome.md"));
}

#[test]
fn test_tree_with_tag_filter() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["tree", "--tag", "rust"]);
    let text = stdout(&out);
    assert!(text.contains("posts/"));
    assert!(text.contains("lifetimes.md"));
    // non-matching files and their folders are pruned
    assert!(!text.contains("welcome.md"));
    assert!(!text.contains("notes/"));
}

#[test]
fn test_tree_json() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["tree", "--json", "--tag", "compilers"]);
    let rows: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let rows = rows.as_array().unwrap();
    let paths: Vec<&str> = rows.iter().map(|r| r["path"].as_str().unwrap()).collect();
    assert_eq!(
        paths,
        vec!["posts", "posts/rust", "posts/rust/borrowck.md"]
    );
    let file_row = &rows[2];
    assert_eq!(file_row["matched"], true);
    assert_eq!(file_row["kind"], "file");
}

// --- show / toc ---

#[test]
fn test_show_text() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["show", "posts/rust/lifetimes.md"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Lifetimes"));
    assert!(text.contains("date: 2024-02-10"));
    assert!(text.contains("tags: rust"));
    assert!(text.contains("body"));
}

#[test]
fn test_show_missing_file_fails() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["show", "nope.md"]);
    assert!(!out.status.success());
    let err = String::from_utf8_lossy(&out.stderr).into_owned();
    assert!(err.contains("no such file"));
}

#[test]
fn test_toc_slugs_and_fences() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["toc", "--json", "posts/rust/borrowck.md"]);
    let toc: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let slugs: Vec<&str> = toc
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["slug"].as_str().unwrap())
        .collect();
    // duplicate "Intro" headings disambiguate; the fenced line is ignored
    assert_eq!(slugs, vec!["intro", "setup", "intro-1"]);
}

// --- search / tags / palette ---

#[test]
fn test_search_by_tag() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["search", "compilers"]);
    let text = stdout(&out);
    assert!(text.contains("posts/rust/borrowck.md"));
    assert!(!text.contains("lifetimes.md"));
}

#[test]
fn test_tags_sorted() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["tags"]);
    assert_eq!(stdout(&out), "compilers\nrust\n");
}

#[test]
fn test_palette_fuzzy_and_tag_mode() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["palette", "borrow"]);
    let text = stdout(&out);
    assert!(text.contains("Fighting the Borrow Checker"));

    let out = run(tmp.path(), &["palette", "#comp"]);
    assert_eq!(stdout(&out), "#compilers\n");
}

// --- recent ---

#[test]
fn test_recent_uses_config_limit_and_date_order() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    // recent_limit = 2 in desk.toml
    let out = run(tmp.path(), &["recent", "--json"]);
    let feed: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    let titles: Vec<&str> = feed
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Welcome", "Lifetimes"]);
}

#[test]
fn test_recent_with_limit_and_tag() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["recent", "--limit", "10", "--tag", "rust"]);
    let text = stdout(&out);
    assert!(text.contains("Lifetimes"));
    assert!(text.contains("Fighting the Borrow Checker"));
    assert!(!text.contains("Welcome"));
}

// --- check ---

#[test]
fn test_check_valid_tree() {
    let tmp = TempDir::new().unwrap();
    create_test_content(tmp.path());

    let out = run(tmp.path(), &["check", "--json"]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(report["valid"], true);
    assert!(report["errors"].as_array().unwrap().is_empty());
    // notes/scratch.md has no date
    let warnings = report["warnings"].as_array().unwrap();
    assert!(
        warnings
            .iter()
            .any(|w| w["type"] == "undated_file" && w["id"] == "notes/scratch.md")
    );
}

// --- init ---

#[test]
fn test_init_then_tree() {
    let tmp = TempDir::new().unwrap();

    let out = run(tmp.path(), &["init", "--name", "fresh-desk"]);
    assert!(out.status.success());

    let out = run(tmp.path(), &["tree"]);
    let text = stdout(&out);
    assert!(text.contains("fresh-desk"));
    assert!(text.contains("welcome.md"));
    assert!(text.contains("hello-world.md"));

    // scaffolded content parses cleanly
    let out = run(tmp.path(), &["toc", "posts/hello-world.md"]);
    let text = stdout(&out);
    assert!(text.contains("#hello-world"));
    assert!(text.contains("#what-lives-here"));
}

// --- partial availability ---

#[test]
fn test_empty_directory_still_runs() {
    let tmp = TempDir::new().unwrap();

    let out = run(tmp.path(), &["tree"]);
    assert!(out.status.success());

    let out = run(tmp.path(), &["tags"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out), "");

    let out = run(tmp.path(), &["check"]);
    assert!(out.status.success());
}
