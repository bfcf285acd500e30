use crate::{fixture_path, servicefile};
use predicates::prelude::*;
use std::fs;

#[test]
fn generate_implicit_recursive_yaml() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("out");

    servicefile(tmp.path())
        .args(["generate", "-r", "--quiet", "-o"])
        .arg(&out)
        .arg(fixture_path("go/implicit"))
        .assert()
        .success();

    let content = fs::read_to_string(out.join("servicefile.yaml")).unwrap();
    let doc: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
    assert_eq!(doc["specVersion"], "1.0");
    assert_eq!(doc["info"]["name"], "UserService");
    assert_eq!(doc["info"]["system"], "identity");

    let relationships = doc["relationships"].as_sequence().unwrap();
    assert_eq!(relationships.len(), 2);
    assert_eq!(relationships[0]["action"], "requests");
    assert_eq!(relationships[0]["name"], "NotificationService");
    assert_eq!(relationships[1]["action"], "uses");
    assert_eq!(relationships[1]["name"], "PostgreSQL");
    assert_eq!(relationships[1]["proto"], "tcp");
}

#[test]
fn generate_non_recursive_stays_in_root() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet", "--format", "json", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/implicit"))
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("servicefile.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["relationships"].as_array().unwrap().len(), 1);
    assert!(!content.contains("PostgreSQL"));
}

#[test]
fn generate_explicit_writes_one_file_per_service() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/explicit"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Found 3 services (3 relationships) in 1 files",
        ));

    for name in ["audit", "billing", "orders"] {
        assert!(
            tmp.path().join(format!("{name}.servicefile.yaml")).is_file(),
            "missing {name}"
        );
    }

    let audit = fs::read_to_string(tmp.path().join("audit.servicefile.yaml")).unwrap();
    assert!(audit.contains("name: Audit"));
    assert!(audit.contains("name: AuditLog"));
    assert!(!audit.contains("description"));
}

#[test]
fn generate_rejects_mixed_addressing() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/mixed"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Mixed relationship definition patterns"));

    assert!(!tmp.path().join("servicefile.yaml").exists());
}

#[test]
fn generate_without_annotations_fails() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/empty"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No services found"));
}

#[test]
fn generate_ambiguous_owner_needs_default_service() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/ambiguous"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot infer the owning service"));

    servicefile(tmp.path())
        .args(["generate", "--quiet", "--default-service", "Orders", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/ambiguous"))
        .assert()
        .success();

    let orders = fs::read_to_string(tmp.path().join("orders.servicefile.yaml")).unwrap();
    assert!(orders.contains("name: Redis"));
    let billing = fs::read_to_string(tmp.path().join("billing.servicefile.yaml")).unwrap();
    assert!(!billing.contains("Redis"));
}

#[test]
fn generate_rejects_text_format() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet", "--format", "dot"])
        .arg(fixture_path("go/implicit"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("generate writes yaml or json"));
}

#[test]
fn generate_missing_path_fails() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet"])
        .arg(tmp.path().join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Path does not exist"));
}

#[test]
fn generate_rust_sources() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet", "--lang", "rust", "--format", "json", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("rust/annotated"))
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("servicefile.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["info"]["name"], "Inventory");
    assert_eq!(doc["info"]["system"], "warehouse");
    let names: Vec<&str> = doc["relationships"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Pricing", "Redis"]);
}

#[test]
fn strict_mode_fails_on_malformed_annotation() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(
        src.join("main.go"),
        "package main\n\n// service:name A\ntype A struct{}\n\n// service:\n// technology:redis\nfunc f() {}\n",
    )
    .unwrap();

    servicefile(tmp.path())
        .args(["generate", "-o"])
        .arg(tmp.path())
        .arg(&src)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning:"))
        .stderr(predicate::str::contains("relationship without an action"));

    servicefile(tmp.path())
        .args(["generate", "--quiet", "--strict", "-o"])
        .arg(tmp.path())
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict mode"));
}

#[test]
fn generate_accepts_a_single_file() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["generate", "--quiet", "--format", "json", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/implicit/storage/postgres.go"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No service name found"));

    servicefile(tmp.path())
        .args(["generate", "--quiet", "--format", "json", "-o"])
        .arg(tmp.path())
        .arg(fixture_path("go/implicit/main.go"))
        .assert()
        .success();

    let content = fs::read_to_string(tmp.path().join("servicefile.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(doc["info"]["name"], "UserService");
    assert_eq!(doc["relationships"].as_array().unwrap().len(), 1);
}
