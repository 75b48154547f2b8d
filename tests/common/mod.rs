#![allow(dead_code)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::ffi::OsStr;
use tempfile::TempDir;

const PAGENAV_VARS: [&str; 6] = [
    "PAGENAV_CONFIG",
    "PAGENAV_PROFILE",
    "PAGENAV_URL_PREFIX",
    "PAGENAV_PER_PAGE",
    "PAGENAV_WINDOW_SIZE",
    "PAGENAV_JSON_PRETTY",
];

/// A `pagenav` command isolated from the caller's config files and env.
pub fn pagenav(workdir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("pagenav");
    cmd.current_dir(workdir.path())
        .env("XDG_CONFIG_HOME", workdir.path().join("xdg"))
        .env("HOME", workdir.path())
        .env_remove("RUST_LOG");
    for var in PAGENAV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

pub fn run_json<I, S>(workdir: &TempDir, args: I) -> Value
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = pagenav(workdir);
    cmd.args(args).arg("--json");
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("json")
}
