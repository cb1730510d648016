use std::path::Path;
use std::process::{Command, Output};

fn globe(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_globe"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run globe")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn compact_prints_tab_indented_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "raw.json",
        r#"{"lines": [["s1", "s2"]], "line": {"s1": [0, 0, "Name1"], "s2": [1.57, 3.14, "Name2"]}}"#,
    );

    let out = globe(&["compact", "--input", &input]);
    assert!(out.status.success());

    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("\n\t\"lines\": [\n\t\t[\n\t\t\t0,\n\t\t\t1\n\t\t]\n\t]"));
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["stars"], serde_json::json!([[0, 0], [1.57, 3.14]]));
    assert!(stdout.starts_with("{\n\t\"stars\": [\n\t\t[\n\t\t\t0,\n\t\t\t0\n\t\t],"));
}

#[test]
fn compact_is_byte_identical_across_runs() {
    let input = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/heavens-above.json");
    let first = globe(&["compact", "--input", input]);
    let second = globe(&["compact", "--input", input]);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn compact_unknown_reference_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "raw.json", r#"{"lines": [["s1", "s404"]], "line": {"s1": [0, 0]}}"#);

    let out = globe(&["compact", "--input", &input]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid reference \"s404\""));
}

#[test]
fn scene_builds_from_compacted_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "stars.json", r#"{"stars": [[0, 0], [0.5, 1.0]], "lines": [[0, 1]]}"#);

    let out = globe(&["scene", &catalog, "--theme", "dark", "--seed", "3"]);
    assert!(out.status.success());

    let scene: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(scene["background"], 0x000000);
    let nodes = scene["nodes"].as_array().unwrap();
    // 5 bands + 2 stars + 1 line
    assert_eq!(nodes.len(), 8);
}

#[test]
fn validate_rejects_bad_index() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "stars.json", r#"{"stars": [[0, 0]], "lines": [[0, 2]]}"#);

    let out = globe(&["validate", &catalog]);
    assert!(!out.status.success());
}

#[test]
fn preview_stops_after_requested_frames() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "stars.json", r#"{"stars": [[0, 0]], "lines": []}"#);

    let out = globe(&["preview", &catalog, "--frames", "10", "--stop-after", "3"]);
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["frames_rendered"], 3);
}

#[test]
fn preview_rejects_zero_frame_counts() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = write(dir.path(), "stars.json", r#"{"stars": [[0, 0]], "lines": []}"#);

    for flag in ["--stop-after", "--frames"] {
        let out = globe(&["preview", &catalog, flag, "0"]);
        assert!(!out.status.success(), "{flag} 0 should be rejected");
        assert!(out.stdout.is_empty());
        assert!(String::from_utf8_lossy(&out.stderr).contains(flag));
    }
}
