use crate::{fixture_path, servicefile};
use predicates::prelude::*;

#[test]
fn graph_text_summary() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["graph", "-r", "--quiet", "--format", "text"])
        .arg(fixture_path("go/implicit"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Services: 1  Relationships: 2"))
        .stdout(predicate::str::contains("UserService [identity]"))
        .stdout(predicate::str::contains("uses PostgreSQL (postgresql, tcp)"));
}

#[test]
fn graph_dot_output() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["graph", "--quiet", "--format", "dot"])
        .arg(fixture_path("go/explicit"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph services {"))
        .stdout(predicate::str::contains("\"Orders\" [shape=box"))
        .stdout(predicate::str::contains("\"PostgreSQL\" [shape=ellipse];"))
        .stdout(predicate::str::contains(
            "\"Billing\" -> \"Orders\" [label=\"requests (grpc)\"];",
        ));
}

#[test]
fn graph_json_is_an_array_sorted_by_name() {
    let tmp = tempfile::tempdir().unwrap();

    let output = servicefile(tmp.path())
        .args(["graph", "--quiet", "--format", "json"])
        .arg(fixture_path("go/explicit"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let docs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let names: Vec<&str> = docs
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["info"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Audit", "Billing", "Orders"]);
}

#[test]
fn graph_uses_project_config_format() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir(&project).unwrap();
    std::fs::copy(
        fixture_path("go/ambiguous/main.go"),
        project.join("main.go"),
    )
    .unwrap();
    std::fs::write(
        project.join(".servicefile.toml"),
        "[defaults]\nformat = \"text\"\n\n[parser]\ndefault_service = \"Billing\"\n",
    )
    .unwrap();

    servicefile(tmp.path())
        .args(["graph", "--quiet"])
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Service Topology"))
        .stdout(predicate::str::contains("uses Redis (redis)"));
}

#[test]
fn graph_honors_ignore_file() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("project");
    std::fs::create_dir_all(project.join("vendor")).unwrap();
    std::fs::write(
        project.join("main.go"),
        "package main\n\n// service:name Api\ntype Api struct{}\n",
    )
    .unwrap();
    std::fs::write(
        project.join("vendor/lib.go"),
        "package lib\n\n// service:name Vendored\ntype V struct{}\n",
    )
    .unwrap();
    std::fs::write(project.join(".servicefileignore"), "# third party\nvendor/**\n").unwrap();

    servicefile(tmp.path())
        .args(["graph", "-r", "--quiet", "--format", "yaml"])
        .arg(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Api"))
        .stdout(predicate::str::contains("Vendored").not());
}
