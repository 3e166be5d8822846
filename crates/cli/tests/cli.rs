use assert_cmd::prelude::*;
use serde_json::Value;
use std::{fs, path::Path, process::Command};
use tempfile::tempdir;

fn folio(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env_remove("FOLIO__STORAGE__BACKEND")
        .args(["--log-level", "warn", "--backend", "local", "--root"])
        .arg(root);
    cmd
}

fn stdout_json(cmd: &mut Command) -> Value {
    let out = cmd.output().unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn init_seeds_local_repo_once() {
    let tmp = tempdir().unwrap();
    let first = stdout_json(folio(tmp.path()).arg("init"));
    assert_eq!(first["projects"].as_array().unwrap().len(), 6);
    assert!(tmp.path().join("blobs/portfolioprojects.json").exists());

    let second = stdout_json(folio(tmp.path()).arg("init"));
    assert_eq!(first, second);
}

#[test]
fn create_update_get_delete_roundtrip() {
    let tmp = tempdir().unwrap();
    let created = stdout_json(folio(tmp.path()).args([
        "create",
        "--title",
        "Poster",
        "--description",
        "Gig poster series",
        "--category",
        "Print",
        "--image-url",
        "https://example.com/poster.jpg",
        "--tag",
        "Print",
    ]));
    assert_eq!(created["id"], 1);

    let updated = stdout_json(folio(tmp.path()).args(["update", "1", "--title", "Posters"]));
    assert_eq!(updated["title"], "Posters");
    assert_eq!(updated["category"], "Print");

    let got = stdout_json(folio(tmp.path()).args(["get", "1"]));
    assert_eq!(got, updated);

    folio(tmp.path()).args(["delete", "1"]).assert().success();
    folio(tmp.path()).args(["get", "1"]).assert().failure();
    folio(tmp.path()).args(["delete", "1"]).assert().failure();
}

#[test]
fn create_without_required_field_fails_without_writing() {
    let tmp = tempdir().unwrap();
    folio(tmp.path())
        .args(["create", "--title", "Only a title"])
        .assert()
        .failure();
    let listed = stdout_json(folio(tmp.path()).arg("list"));
    assert_eq!(listed["projects"], Value::Array(Vec::new()));
}

#[test]
fn config_file_supplies_storage_name() {
    let tmp = tempdir().unwrap();
    let cfg = tmp.path().join("folio.toml");
    fs::write(&cfg, "[storage]\nlogical_name = \"client work\"\n").unwrap();
    let out = stdout_json(folio(tmp.path()).arg("--config").arg(&cfg).arg("init"));
    assert_eq!(out["projects"].as_array().unwrap().len(), 6);
    assert!(tmp.path().join("blobs/clientwork.json").exists());
}
