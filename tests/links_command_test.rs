mod common;

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn links_json_lists_window() {
    let temp_dir = TempDir::new().unwrap();
    let argv = [
        "links", "--total", "95", "--page", "10", "--prefix", "books",
    ];
    let value = common::run_json(&temp_dir, argv);
    let links = value["links"].as_array().expect("links");
    let pages = links
        .iter()
        .map(|link| link["page"].as_u64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(pages, vec![4, 5, 6, 7, 8, 9, 10]);
    let active = links.iter().filter(|link| link["active"] == true);
    assert_eq!(active.count(), 1);
}

#[test]
fn links_markdown_table() {
    let temp_dir = TempDir::new().unwrap();
    let mut cmd = common::pagenav(&temp_dir);
    cmd.args(["links", "--markdown", "--total", "25", "--prefix", "books"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("/books/?page=3"))
        .stdout(predicate::str::contains("Pages 1-3 of 3"));
}

#[test]
fn links_written_to_csv() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("links.csv");

    let mut cmd = common::pagenav(&temp_dir);
    cmd.args(["links", "--total", "95", "--page", "5", "--prefix", "books"]);
    cmd.arg("--csv").arg(&csv_path);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote 7 links"));

    let content = fs::read_to_string(&csv_path).expect("read csv");
    let lines = content.lines().collect::<Vec<_>>();
    assert_eq!(lines[0], "page,href,active");
    assert_eq!(lines[1], "2,/books/?page=2,false");
    assert_eq!(lines[4], "5,/books/?page=5,true");
}

#[test]
fn csv_write_failure_is_an_output_error() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("missing-dir").join("links.csv");

    let mut cmd = common::pagenav(&temp_dir);
    cmd.args(["links", "--json", "--total", "5", "--prefix", "books"]);
    cmd.arg("--csv").arg(&csv_path);

    let output = cmd.assert().failure().get_output().stderr.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).expect("json");
    assert_eq!(value["error"]["kind"], "Output");
}
