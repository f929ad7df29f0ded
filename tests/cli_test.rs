use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Every test gets its own registry file so runs cannot see each
/// other's state or the developer's real registry.
fn registry_path(temp: &TempDir) -> PathBuf {
    temp.path().join("registry.json")
}

fn node_project(temp: &TempDir) -> PathBuf {
    let root = temp.path().join("webshop");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(
        root.join("package.json"),
        r#"{ "dependencies": { "express": "^4.18.0" }, "devDependencies": { "mocha": "10" } }"#,
    )
    .unwrap();
    fs::write(
        root.join("src/server.js"),
        "const express = require('express');\nconst app = express();\n",
    )
    .unwrap();
    root
}

#[test]
fn help_lists_subcommands() {
    let mut cmd = cargo_bin_cmd!("heft");
    let output = cmd.arg("--help").assert().success().get_output().stdout.clone();
    let text = String::from_utf8_lossy(&output);
    for sub in ["list", "analyze", "add", "remove", "completions"] {
        assert!(text.contains(sub), "help missing '{sub}' subcommand");
    }
}

#[test]
fn list_reports_empty_registry() {
    let temp = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("heft");
    cmd.env("HEFT_REGISTRY", registry_path(&temp))
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No directories registered"));
}

#[test]
fn add_then_list_round_trip() {
    let temp = TempDir::new().unwrap();
    let registry = registry_path(&temp);
    let project = node_project(&temp);

    let mut add = cargo_bin_cmd!("heft");
    add.env("HEFT_REGISTRY", &registry)
        .current_dir(temp.path())
        .arg("add")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered"));

    let mut list = cargo_bin_cmd!("heft");
    list.env("HEFT_REGISTRY", &registry)
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered directories (1)"))
        .stdout(predicate::str::contains("webshop"));

    // Re-adding the same path is a no-op, not an error.
    let mut again = cargo_bin_cmd!("heft");
    again
        .env("HEFT_REGISTRY", &registry)
        .current_dir(temp.path())
        .arg("add")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("already registered"));
}

#[test]
fn add_rejects_plain_files() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("notes.txt");
    fs::write(&file, "not a project").unwrap();

    let mut cmd = cargo_bin_cmd!("heft");
    cmd.env("HEFT_REGISTRY", registry_path(&temp))
        .current_dir(temp.path())
        .arg("add")
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn remove_unregisters_a_directory() {
    let temp = TempDir::new().unwrap();
    let registry = registry_path(&temp);
    let project = node_project(&temp);

    cargo_bin_cmd!("heft")
        .env("HEFT_REGISTRY", &registry)
        .current_dir(temp.path())
        .arg("add")
        .arg(&project)
        .assert()
        .success();

    cargo_bin_cmd!("heft")
        .env("HEFT_REGISTRY", &registry)
        .current_dir(temp.path())
        .arg("remove")
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));

    cargo_bin_cmd!("heft")
        .env("HEFT_REGISTRY", &registry)
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No directories registered"));
}

#[test]
fn analyze_without_registry_prints_hint() {
    let temp = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("heft");
    cmd.env("HEFT_REGISTRY", registry_path(&temp))
        .current_dir(temp.path())
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to analyze"));
}

#[test]
fn analyze_emits_parseable_json() {
    let temp = TempDir::new().unwrap();
    let project = node_project(&temp);

    let mut cmd = cargo_bin_cmd!("heft");
    let output = cmd
        .env("HEFT_REGISTRY", registry_path(&temp))
        .current_dir(temp.path())
        .arg("analyze")
        .arg("--format")
        .arg("json")
        .arg("--path")
        .arg(&project)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("stdout is JSON");
    let projects = report["projects"].as_array().expect("projects array");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["used"][0]["name"], "express");
    assert_eq!(projects[0]["unused"][0]["name"], "mocha");
    assert_eq!(report["dependencies"][0]["name"], "express");
}

#[test]
fn analyze_rejects_unknown_engine() {
    let temp = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("heft");
    cmd.env("HEFT_REGISTRY", registry_path(&temp))
        .current_dir(temp.path())
        .arg("analyze")
        .arg("--engine")
        .arg("psychic")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn completions_cover_the_binary_name() {
    let mut cmd = cargo_bin_cmd!("heft");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("heft"));
}
