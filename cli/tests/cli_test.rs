use assert_cmd::Command;
use predicates::prelude::*;

fn dsbench() -> Command {
    Command::cargo_bin("dsbench").expect("dsbench binary")
}

#[test]
fn test_list_shows_catalogue() {
    dsbench()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("refill_full"))
        .stdout(predicate::str::contains("microservice"))
        .stdout(predicate::str::contains("shared container across sweep"))
        .stdout(predicate::str::contains("linked_list"));
}

#[test]
fn test_trace_prints_operation_counts() {
    dsbench()
        .args(["trace", "-w", "stable", "-c", "vec", "-n", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("stable on vec at N=10"))
        .stdout(predicate::str::contains("10 adds, 10 removes (0 empty), 0 empty checks -> 10000 values"));
}

#[test]
fn test_trace_rejects_excluded_point() {
    dsbench()
        .args(["trace", "-w", "refill", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not run N=0"));
}

#[test]
fn test_run_writes_reports() {
    let dir = tempfile::tempdir().expect("temp dir");
    let out = dir.path().join("report");
    dsbench()
        .args([
            "run",
            "-w",
            "fill",
            "-w",
            "stable",
            "-c",
            "vec-deque",
            "--max-count",
            "10",
            "--max-iterations",
            "2",
            "--target-ms",
            "0",
            "--format",
            "csv",
            "--notes",
            "ci smoke",
        ])
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("workload,container,payload,scale"))
        .stdout(predicate::str::contains("stable,vec_deque,inline,10,1,"));

    let json = std::fs::read_to_string(out.join("latest.json")).expect("latest.json");
    let record: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(record["notes"], "ci smoke");
    assert_eq!(record["allocations_counted"], true);
    // fill: 0, 1, 10; stable: 1, 10
    assert_eq!(record["measurements"].as_array().map(Vec::len), Some(5));
    assert!(out.join("latest.csv").exists());
}

#[test]
fn test_run_rejects_unknown_container() {
    dsbench()
        .args(["run", "-c", "skiplist", "--max-count", "1"])
        .assert()
        .failure();
}
