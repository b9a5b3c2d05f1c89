//! Shared test utilities for execute and output tests.
//!
//! The fixture database models a small climbing guidebook: summits and the routes up them.
//! One route has no summit, so LEFT JOINs produce nulls.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::db::{CompiledStatement, ConnectionBoundary};

/// Schema and rows for the climbing fixture.
pub const CLIMBING_SCHEMA: &[&str] = &[
    "CREATE TABLE summits (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        height REAL,
        first_ascent INTEGER
    )",
    "CREATE TABLE routes (
        id INTEGER PRIMARY KEY,
        summit_id INTEGER REFERENCES summits(id),
        route_name TEXT NOT NULL,
        grade INTEGER NOT NULL,
        bolted BOOLEAN
    )",
    "INSERT INTO summits VALUES
        (7, 'Matterhorn', 4478.0, 1865),
        (8, 'Eiger', 3967.0, 1858),
        (9, 'Unnamed Tower', NULL, NULL)",
    "INSERT INTO routes VALUES
        (1, 7, 'Hörnli Ridge', 3, 0),
        (2, 7, 'Zmutt Ridge', 4, 0),
        (3, 8, 'North Face', 6, 0),
        (4, 8, 'Mittellegi Ridge', 4, 1),
        (5, NULL, 'Boulder Traverse', 5, NULL)",
    "PRAGMA user_version = 2",
];

/// Run raw SQL through a connected boundary.
pub fn run_sql(db: &mut ConnectionBoundary, sql: &str) {
    let statement = CompiledStatement {
        sql: sql.to_string(),
        params: Vec::new(),
    };
    db.execute_compiled(&statement)
        .unwrap_or_else(|e| panic!("Fixture SQL failed: {}\n{}", e, sql));
}

/// Create the climbing fixture as a database file in a fresh temp directory.
///
/// The directory must be kept alive for as long as the file is used.
pub fn climbing_db_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("climbing.sqlite");

    let mut db = ConnectionBoundary::sqlite();
    db.connect(path_str(&path), false)
        .expect("Fixture database should open");
    for sql in CLIMBING_SCHEMA {
        run_sql(&mut db, sql);
    }
    db.disconnect();

    (dir, path)
}

/// Open the climbing fixture read-only and return the connected boundary.
pub fn climbing_db() -> (TempDir, ConnectionBoundary) {
    let (dir, path) = climbing_db_file();
    let mut db = ConnectionBoundary::sqlite();
    db.connect(path_str(&path), true)
        .expect("Fixture database should reopen read-only");
    (dir, db)
}

/// Write a JSON query document into `dir` and return its path.
pub fn write_query_file(dir: &Path, name: &str, json: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).expect("Failed to write query file");
    path
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("Temp paths are UTF-8")
}
