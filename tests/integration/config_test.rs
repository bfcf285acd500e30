use crate::servicefile;
use predicates::prelude::*;

#[test]
fn config_show_defaults() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Loaded config files: (none)"))
        .stdout(predicate::str::contains("Resolved settings:"))
        .stdout(predicate::str::contains("defaults.lang: go <- default"))
        .stdout(predicate::str::contains("defaults.format: yaml <- default"))
        .stdout(predicate::str::contains("parser.tag_matching: substring <- default"))
        .stdout(predicate::str::contains("parser.default_service: (infer) <- default"));
}

#[test]
fn config_show_with_project_config() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(
        tmp.path().join(".servicefile.toml"),
        r#"
[defaults]
format = "json"
recursive = true

[parser]
tag_matching = "line-start"
"#,
    )
    .unwrap();

    servicefile(tmp.path())
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".servicefile.toml"))
        .stdout(predicate::str::contains("defaults.format: json <- project config"))
        .stdout(predicate::str::contains("defaults.recursive: true <- project config"))
        .stdout(predicate::str::contains(
            "parser.tag_matching: line-start <- project config",
        ));
}

#[test]
fn config_show_env_override() {
    let tmp = tempfile::tempdir().unwrap();

    servicefile(tmp.path())
        .env("SERVICEFILE_STRICT", "true")
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "parser.strict: true <- env var (SERVICEFILE_STRICT)",
        ));
}

#[test]
fn config_show_rejects_unknown_keys() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join(".servicefile.toml"), "[rules]\nfoo = 1\n").unwrap();

    servicefile(tmp.path())
        .args(["config", "show", "--path"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid project config"));
}
