//! E2E tests for `cg`: single-file analysis, single stages, batch mode, and
//! the no-subcommand default run.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

const DIAMOND: &str = r#"// diamond with a heavier lower branch
{
  "directed": true,
  "n": 4,
  "source": 0,
  "weight_model": "edge",
  "edges": [
    {"u": 0, "v": 1, "w": 5},
    {"u": 0, "v": 2, "w": 3},
    {"u": 1, "v": 3, "w": 2},
    {"u": 2, "v": 3, "w": 6}
  ]
}
"#;

/// {0,1,2} cycle feeding {3,4} cycle, then the tail 5 -> 6 -> 7.
const LINKED_CYCLES: &str = r#"{
  "directed": true,
  "n": 8,
  "source": 1,
  "edges": [
    {"u": 0, "v": 1, "w": 1}, {"u": 1, "v": 2, "w": 1}, {"u": 2, "v": 0, "w": 1},
    {"u": 2, "v": 3, "w": 2}, {"u": 3, "v": 4, "w": 1}, {"u": 4, "v": 3, "w": 1},
    {"u": 4, "v": 5, "w": 3}, {"u": 5, "v": 6, "w": 1}, {"u": 6, "v": 7, "w": 1}
  ]
}
"#;

fn cg_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("cg"));
    cmd.current_dir(dir);
    cmd.env("CITYGRAPH_LOG", "error");
    cmd.env_remove("FORMAT");
    cmd
}

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("mkdir");
    }
    std::fs::write(path, content).expect("write fixture");
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.output().expect("cg should not crash");
    assert!(
        output.status.success(),
        "cg failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

// ── analyze ─────────────────────────────────────────────────────────────────

#[test]
fn analyze_dag_solves_on_original_graph() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "diamond.json", DIAMOND);

    let json = json_stdout(cg_cmd(dir.path()).args(["analyze", "diamond.json", "--format", "json"]));

    assert_eq!(json["stats"]["vertex_count"], 4);
    assert_eq!(json["scc"]["components"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["paths"]["target"], "original");
    assert_eq!(
        json["paths"]["shortest"]["distances"],
        serde_json::json!([0, 5, 3, 7])
    );
    assert_eq!(json["paths"]["longest"]["distances"][3], 9);
    assert_eq!(json["paths"]["critical"]["length"], 9);
    assert_eq!(json["paths"]["critical"]["path"], serde_json::json!([0, 2, 3]));
    assert!(json.get("timings").is_none());
}

#[test]
fn analyze_cyclic_graph_falls_back_to_condensation() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycles.json", LINKED_CYCLES);

    let json = json_stdout(cg_cmd(dir.path()).args(["--json", "analyze", "cycles.json"]));

    assert_eq!(json["scc"]["components"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["topo"]["has_cycle"], false);
    assert_eq!(json["topo"]["order"], serde_json::json!([4, 3, 2, 1, 0]));
    assert_eq!(json["paths"]["target"], "condensation");
    assert_eq!(json["paths"]["source"], 4);
    assert_eq!(json["paths"]["critical"]["length"], 7);
}

#[test]
fn analyze_text_output_is_line_oriented() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycles.json", LINKED_CYCLES);

    cg_cmd(dir.path())
        .args(["analyze", "cycles.json", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("components 5\n"))
        .stdout(predicate::str::contains("task_group 4 [2, 1, 0]\n"))
        .stdout(predicate::str::contains("path_target condensation\n"));
}

#[test]
fn analyze_pretty_output_has_sections() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "diamond.json", DIAMOND);

    cg_cmd(dir.path())
        .env("FORMAT", "pretty")
        .args(["analyze", "diamond.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Processing: diamond.json"))
        .stdout(predicate::str::contains("Original task order (by SCC)"))
        .stdout(predicate::str::contains("Critical path"))
        .stdout(predicate::str::contains("0 -> 2 -> 3"));
}

#[test]
fn analyze_timing_reports_every_stage() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "diamond.json", DIAMOND);

    let json = json_stdout(cg_cmd(dir.path()).args([
        "analyze",
        "diamond.json",
        "--format",
        "json",
        "--timing",
    ]));

    let stages: Vec<&str> = json["timings"]
        .as_array()
        .expect("timings array")
        .iter()
        .filter_map(|t| t["stage"].as_str())
        .collect();
    assert_eq!(
        stages,
        vec![
            "scc",
            "condensation",
            "topological_sort",
            "shortest_paths",
            "longest_paths",
            "critical_path"
        ]
    );
    assert_eq!(json["timings"][0]["metrics"]["counters"]["dfs_visits"], 4);
}

#[test]
fn analyze_missing_file_fails_with_structured_error() {
    let dir = TempDir::new().expect("tempdir");

    let output = cg_cmd(dir.path())
        .args(["analyze", "absent.json", "--format", "json"])
        .output()
        .expect("cg should not crash");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let start = stderr.find('{').expect("json error on stderr");
    let end = stderr.rfind('}').expect("json error on stderr");
    let json: Value = serde_json::from_str(&stderr[start..=end]).expect("valid JSON");
    assert_eq!(json["error"]["error_code"], "input_unreadable");
}

#[test]
fn analyze_undirected_graph_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "undirected.json",
        r#"{"n": 2, "edges": [{"u": 0, "v": 1, "w": 1}]}"#,
    );

    cg_cmd(dir.path())
        .args(["analyze", "undirected.json", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a directed graph"));
}

#[test]
fn analyze_uses_config_defaults() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "graphs/main.json", DIAMOND);
    write(
        dir.path(),
        "citygraph.toml",
        "[input]\ndefault_file = \"graphs/main.json\"\n\n[output]\nformat = \"json\"\n",
    );

    let json = json_stdout(cg_cmd(dir.path()).arg("analyze"));
    assert_eq!(json["weight_model"], "edge");
    assert_eq!(json["paths"]["critical"]["length"], 9);
}

// ── single stages ───────────────────────────────────────────────────────────

#[test]
fn scc_lists_components() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycles.json", LINKED_CYCLES);

    let json = json_stdout(cg_cmd(dir.path()).args(["scc", "cycles.json", "--format", "json"]));
    assert_eq!(
        json["scc"]["components"],
        serde_json::json!([[7], [6], [5], [4, 3], [2, 1, 0]])
    );
    assert_eq!(json["stats"]["cyclic_component_count"], 2);
}

#[test]
fn topo_reports_cycle_without_failing() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycles.json", LINKED_CYCLES);

    cg_cmd(dir.path())
        .args(["topo", "cycles.json", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("has_cycle true\n"))
        .stdout(predicate::str::contains("order []\n"));
}

#[test]
fn paths_source_override() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "diamond.json", DIAMOND);

    let json = json_stdout(cg_cmd(dir.path()).args([
        "paths",
        "diamond.json",
        "--source",
        "2",
        "--format",
        "json",
    ]));
    assert_eq!(json["paths"]["source"], 2);
    assert_eq!(
        json["paths"]["shortest"]["distances"],
        serde_json::json!([null, null, 0, 6])
    );
}

#[test]
fn paths_on_cyclic_graph_fails_with_cycle_code() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "cycles.json", LINKED_CYCLES);

    cg_cmd(dir.path())
        .args(["paths", "cycles.json", "--format", "json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error_code\": \"G2002\""));
}

#[test]
fn paths_source_out_of_range_fails() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "diamond.json", DIAMOND);

    cg_cmd(dir.path())
        .args(["paths", "diamond.json", "--source", "9", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

// ── batch ───────────────────────────────────────────────────────────────────

#[test]
fn batch_continues_past_failures() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "data/a_diamond.json", DIAMOND);
    write(dir.path(), "data/b_broken.json", "{ not json");
    write(dir.path(), "data/c_cycles.json", LINKED_CYCLES);
    write(dir.path(), "data/readme.txt", "ignored");

    cg_cmd(dir.path())
        .args(["batch", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("error data/b_broken.json"))
        .stdout(predicate::str::ends_with("processed 3 failed 1\n"));
}

#[test]
fn batch_json_keeps_file_order() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "graphs/z.json", DIAMOND);
    write(dir.path(), "graphs/m.json", LINKED_CYCLES);

    let json = json_stdout(cg_cmd(dir.path()).args(["batch", "graphs", "--format", "json"]));
    assert_eq!(json["processed"], 2);
    assert_eq!(json["failed"], 0);

    let files: Vec<&str> = json["results"]
        .as_array()
        .expect("results")
        .iter()
        .filter_map(|r| r["file"].as_str())
        .collect();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("m.json"));
    assert!(files[1].ends_with("z.json"));
}

#[test]
fn batch_missing_directory_fails() {
    let dir = TempDir::new().expect("tempdir");

    cg_cmd(dir.path())
        .args(["batch", "nowhere", "--format", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("data directory not found"));
}

// ── default run ─────────────────────────────────────────────────────────────

#[test]
fn default_run_analyzes_tasks_then_batches_data() {
    let dir = TempDir::new().expect("tempdir");
    write(dir.path(), "tasks.json", DIAMOND);
    write(dir.path(), "data/one.json", LINKED_CYCLES);

    cg_cmd(dir.path())
        .env("FORMAT", "text")
        .assert()
        .success()
        .stdout(predicate::str::contains("input tasks.json\n"))
        .stdout(predicate::str::contains("processed 1 failed 0\n"));
}

#[test]
fn default_run_batches_data_even_when_tasks_file_fails() {
    let dir = TempDir::new().expect("tempdir");
    write(
        dir.path(),
        "tasks.json",
        r#"{"n": 2, "edges": [{"u": 0, "v": 1, "w": 1}]}"#,
    );
    write(dir.path(), "data/one.json", LINKED_CYCLES);

    cg_cmd(dir.path())
        .env("FORMAT", "text")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a directed graph"))
        .stdout(predicate::str::contains("processed 1 failed 0\n"));
}

#[test]
fn default_run_skips_missing_inputs() {
    let dir = TempDir::new().expect("tempdir");

    cg_cmd(dir.path())
        .env("FORMAT", "text")
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping single-file analysis"))
        .stderr(predicate::str::contains("Skipping batch processing"));
}
