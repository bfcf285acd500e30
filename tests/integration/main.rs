mod config_test;
mod generate_test;
mod graph_test;

use assert_cmd::Command;
use std::path::{Path, PathBuf};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// The binary with user config and `SERVICEFILE_*` variables isolated.
pub fn servicefile(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("servicefile").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home)
        .env("HOME", config_home)
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("SERVICEFILE_") {
            cmd.env_remove(key);
        }
    }
    cmd
}
