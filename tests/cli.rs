use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

use qslfactory::persist::sqlite::SqliteContactSink;

const LOG: &str = "<ADIF_VER:5>3.1.4<EOH>\n\
                   <CALL:4>W1AW<QSO_DATE:8>20231025<EOR>\n\
                   <BAND:3>20M<EOR>\n\
                   <CALL:5>K1ABC<MODE:2>CW<EOR>\n";

fn write_log(dir: &TempDir, name: &str, contents: &[u8]) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write log");
    path
}

#[test]
fn prints_json_array_with_trailing_newline() {
    let tmp = TempDir::new().expect("tmp");
    let log = write_log(&tmp, "log.adi", LOG.as_bytes());

    cargo_bin_cmd!("qslfactory")
        .arg(&log)
        .assert()
        .success()
        .stdout(
            "[{\"callsign\":\"W1AW\",\"date\":\"2023-10-25\"},{\"callsign\":\"K1ABC\",\"mode\":\"CW\"}]\n",
        );
}

#[test]
fn reads_stdin_as_json_lines() {
    cargo_bin_cmd!("qslfactory")
        .args(["-", "--format", "jsonl"])
        .write_stdin(LOG)
        .assert()
        .success()
        .stdout("{\"callsign\":\"W1AW\",\"date\":\"2023-10-25\"}\n{\"callsign\":\"K1ABC\",\"mode\":\"CW\"}\n");
}

#[test]
fn cards_carry_placeholders() {
    cargo_bin_cmd!("qslfactory")
        .args(["-", "--cards", "--pretty"])
        .write_stdin("<CALL:4>W1AW<TIME_ON:4>1432<EOR>")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"toCall\": \"W1AW\"")
                .and(predicate::str::contains("\"time\": \"14:32 UTC\""))
                .and(predicate::str::contains("\"band\": \"----\"")),
        );
}

#[test]
fn invalid_utf8_still_imports() {
    let tmp = TempDir::new().expect("tmp");
    let log = write_log(&tmp, "latin1.adi", b"<CALL:4>W1AW<COMMENT:4>Jos\xe9<EOR>");

    cargo_bin_cmd!("qslfactory")
        .arg(&log)
        .assert()
        .success()
        .stdout("[{\"callsign\":\"W1AW\"}]\n");
}

#[test]
fn db_append_continues_ids_across_runs() {
    let tmp = TempDir::new().expect("tmp");
    let db = tmp.path().join("contacts.db");
    let first = write_log(&tmp, "first.adi", LOG.as_bytes());
    let second = write_log(&tmp, "second.adi", b"<CALL:6>VK2ABC<EOR>");

    cargo_bin_cmd!("qslfactory")
        .arg(&first)
        .arg("--db")
        .arg(&db)
        .assert()
        .success();
    cargo_bin_cmd!("qslfactory")
        .arg(&second)
        .arg("--db")
        .arg(&db)
        .assert()
        .success()
        .stdout("[{\"callsign\":\"VK2ABC\"}]\n");

    let sink = SqliteContactSink::open(&db).expect("open sqlite");
    let stored = sink.load_after(0).expect("load");
    let ids: Vec<_> = stored.iter().map(|s| s.id).collect();
    let calls: Vec<_> = stored.iter().map(|s| s.contact.callsign.as_str()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(calls, vec!["W1AW", "K1ABC", "VK2ABC"]);
}

#[test]
fn missing_input_fails() {
    let tmp = TempDir::new().expect("tmp");

    cargo_bin_cmd!("qslfactory")
        .arg(tmp.path().join("absent.adi"))
        .assert()
        .failure()
        .stdout("");
}
