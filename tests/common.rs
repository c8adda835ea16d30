#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use fieldledger::core::notify::BufferSink;
use fieldledger::db::pool::Ledger;
use fieldledger::engine::Engine;
use fieldledger::registry::SiteFile;

pub fn fl() -> Command {
    cargo_bin_cmd!("fieldledger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fieldledger.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Canned site registry: two fenced projects, two working managers and one
/// on leave. mgr-a and mgr-b are both eligible on alpha; beta is mgr-a only.
pub const SITE_YAML: &str = r#"
projects:
  - id: alpha
    name: Alpha Yard
    fence:
      shape: circle
      center: { lat: 45.0703, lon: 7.6869 }
      radius_m: 250
  - id: beta
    name: Beta Depot
    fence:
      shape: polygon
      vertices:
        - { lat: 45.000, lon: 7.000 }
        - { lat: 45.000, lon: 7.010 }
        - { lat: 45.010, lon: 7.010 }
        - { lat: 45.010, lon: 7.000 }
managers:
  - manager_id: mgr-a
    assigned_project_ids: [alpha, beta]
    is_active: true
  - manager_id: mgr-b
    assigned_project_ids: [alpha]
    is_active: true
  - manager_id: mgr-c
    assigned_project_ids: [alpha]
    is_active: true
    is_on_leave: true
"#;

/// Write the canned site file to a temp path and return it.
pub fn write_site_file(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_site.yaml", name));
    fs::write(&path, SITE_YAML).expect("write site file");
    path.to_string_lossy().to_string()
}

/// Engine over a fresh temp DB and the canned site, with a buffering
/// notification sink for assertions. UTC deployment zone.
pub fn test_engine(name: &str) -> (Engine, Arc<BufferSink>) {
    let db_path = setup_test_db(name);
    let site: SiteFile = serde_yaml::from_str(SITE_YAML).expect("parse site yaml");
    let site = Arc::new(site);
    let sink = Arc::new(BufferSink::new());

    let ledger = Ledger::open(&db_path).expect("open ledger");
    let engine = Engine::new(ledger, site.clone(), site, sink.clone(), 0).expect("build engine");
    (engine, sink)
}
