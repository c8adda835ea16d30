mod common;
use common::{fl, setup_test_db, temp_out, write_site_file};
use std::fs;

/// Initialize a ledger and record one full day for mgr-a.
fn init_db_with_data(db_path: &str) {
    fl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    fl().args([
        "--db",
        db_path,
        "clock-in",
        "mgr-a",
        "--at",
        "2025-06-02 09:05",
    ])
    .assert()
    .success();

    fl().args([
        "--db",
        db_path,
        "clock-out",
        "mgr-a",
        "--at",
        "2025-06-02 17:40",
    ])
    .assert()
    .success();
}

#[test]
fn test_export_sessions_csv() {
    let db_path = setup_test_db("export_sessions_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_sessions_csv", "csv");

    fl().args([
        "--db",
        &db_path,
        "export",
        "--format",
        "csv",
        "--out",
        &out,
        "--sessions",
        "--manager",
        "mgr-a",
        "--month",
        "2025-06",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("manager_id,date,clock_in"));
    assert!(content.contains("mgr-a"));
    assert!(content.contains("2025-06-02"));
    assert!(content.contains("8.58"));
}

#[test]
fn test_export_sessions_json() {
    let db_path = setup_test_db("export_sessions_json");
    init_db_with_data(&db_path);

    let out = temp_out("export_sessions_json", "json");

    fl().args([
        "--db",
        &db_path,
        "export",
        "--format",
        "json",
        "--out",
        &out,
        "--sessions",
        "--manager",
        "mgr-a",
        "--month",
        "2025-06",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    assert!(content.contains("\"manager_id\": \"mgr-a\""));
    assert!(content.contains("\"total_hours\": 8.58"));
}

#[test]
fn test_export_summaries_csv_covers_all_managers() {
    let db_path = setup_test_db("export_summaries_csv");
    let site = write_site_file("export_summaries_csv");
    init_db_with_data(&db_path);

    let out = temp_out("export_summaries_csv", "csv");

    fl().args([
        "--db",
        &db_path,
        "--site",
        &site,
        "export",
        "--format",
        "csv",
        "--out",
        &out,
        "--summaries",
        "--month",
        "2025-06",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported csv");
    assert!(content.contains("manager_id,month,present_days"));
    assert!(content.contains("mgr-a,2025-06,1"));
    assert!(content.contains("mgr-b,2025-06,0"));
    assert!(content.contains("mgr-c,2025-06,0"));
}

#[test]
fn test_export_sessions_requires_a_manager() {
    let db_path = setup_test_db("export_needs_manager");
    init_db_with_data(&db_path);

    let out = temp_out("export_needs_manager", "csv");

    fl().args([
        "--db",
        &db_path,
        "export",
        "--format",
        "csv",
        "--out",
        &out,
        "--sessions",
        "--month",
        "2025-06",
    ])
    .assert()
    .failure();
}

#[test]
fn test_export_without_a_target_fails() {
    let db_path = setup_test_db("export_no_target");
    init_db_with_data(&db_path);

    let out = temp_out("export_no_target", "csv");

    fl().args([
        "--db", &db_path, "export", "--format", "csv", "--out", &out,
    ])
    .assert()
    .failure();
}
