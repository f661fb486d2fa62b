use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs, path::Path};
use tempfile::TempDir;

const TABLE: &str = "\
# col\trow\tn\tlabel
0\t0\t0\tY(425)
1\t0\t1\tB(426)
2\t0\t2\tR(427)
3\t0\t3\tD(1)
";

const EVENTS: &str = "\
# centre crossing, then a dummy cell
3 0 0 0 1 0 2
1 0 3
";

fn workdir(events: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("table.tab"), TABLE).expect("write table");
    fs::write(dir.path().join("events.txt"), events).expect("write events");
    dir
}

fn picmic(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("picmic").expect("picmic binary");
    cmd.current_dir(dir).arg("--table").arg("table.tab");
    cmd
}

fn separator(number: usize) -> String {
    let dashes = "-".repeat(38);
    format!("{dashes} {number} {dashes}")
}

#[test]
fn text_output_lists_clusters_per_event() {
    let dir = workdir(EVENTS);
    picmic(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(separator(1)))
        .stdout(predicate::str::contains(separator(2)))
        .stdout(predicate::str::contains("((424, 424), (424, 424))], type=7)])"))
        .stdout(predicate::str::contains("EventClusters([\n])"))
        .stderr(predicate::str::contains("dummy cell"));
}

#[test]
fn optional_sections_are_printed_on_request() {
    let dir = workdir(EVENTS);
    picmic(dir.path())
        .args(["--show-lines", "--show-fat-lines", "--log-level", "error"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ylines=[424]"))
        .stdout(predicate::str::contains(
            "fat_rlines=[(vmin=0, vmax=0, density=1.00, free=false)]",
        ))
        .stderr(predicate::str::contains("dummy cell").not());
}

#[test]
fn json_output_is_one_report_per_line() {
    let dir = workdir(EVENTS);
    let output = picmic(dir.path())
        .args(["events.txt", "--format", "json"])
        .output()
        .expect("run picmic");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8");
    let reports: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["event"], 1);
    assert_eq!(reports[0]["declared_hits"], 3);
    assert_eq!(reports[0]["clusters"]["clusters"][0]["kind"], 7);
    assert_eq!(reports[1]["dummy_hits"], 1);
    assert_eq!(reports[1]["overflows"], serde_json::json!([]));
}

#[test]
fn config_overrides_the_table_shape() {
    let dir = workdir(EVENTS);
    fs::write(
        dir.path().join("config.json"),
        r#"{"table": {"rows": 1, "cols": 3}}"#,
    )
    .expect("write config");
    picmic(dir.path())
        .args(["--config", "config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "address table: line 5: cell (0, 3) is outside the 1x3 table",
        ));
}

#[test]
fn unknown_cell_fails_the_run_but_not_the_other_events() {
    let dir = workdir("1 5 5\n3 0 0 0 1 0 2\n");
    picmic(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("error: no address-table entry for cell (5, 5)"))
        .stdout(predicate::str::contains("type=7"))
        .stderr(predicate::str::contains("1 event(s) could not be analysed"));
}

#[test]
fn unknown_cell_keeps_one_json_record_per_event() {
    let dir = workdir("1 5 5\n3 0 0 0 1 0 2\n");
    let output = picmic(dir.path())
        .args(["--format", "json"])
        .output()
        .expect("run picmic");
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8");
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["event"], 1);
    assert_eq!(records[0]["line"], 1);
    assert_eq!(
        records[0]["error"],
        "no address-table entry for cell (5, 5)"
    );
    assert_eq!(records[1]["event"], 2);
    assert!(records[1].get("error").is_none());
    assert_eq!(records[1]["clusters"]["clusters"][0]["kind"], 7);
}

#[test]
fn malformed_event_is_an_error() {
    let dir = workdir("3 0 0 0 1 0 2\n2 0 x\n");
    picmic(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2: invalid token \"x\""));
}

#[test]
fn missing_table_is_an_error() {
    let dir = workdir(EVENTS);
    Command::cargo_bin("picmic")
        .expect("picmic binary")
        .current_dir(dir.path())
        .args(["--table", "missing.tab"])
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("picmic: address table:"));
}
