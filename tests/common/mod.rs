#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use race_report::{ReportSources, ReportStore};
use tempfile::TempDir;

pub fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

pub fn fixture_sources() -> ReportSources {
    ReportSources::in_dir(&fixture_dir())
}

pub fn built_store() -> ReportStore {
    let mut store = ReportStore::new();
    store.rebuild(&fixture_sources()).unwrap();
    store
}

/// a writable copy of the fixture files
pub fn fixture_copy() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in fs::read_dir(fixture_dir()).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}
