// tests/common/mod.rs

//! Shared helpers for the workflow integration tests.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch project: a temp dir holding a shell source file and a
/// staging directory path. Keep the TempDir alive to prevent cleanup.
pub struct Scratch {
    pub root: TempDir,
    pub source: PathBuf,
    pub dir: PathBuf,
}

/// Create a scratch project with the given source content.
pub fn scratch(source_name: &str, content: &str) -> Scratch {
    let root = tempfile::tempdir().unwrap();
    let source = root.path().join(source_name);
    fs::write(&source, content).unwrap();
    let dir = root.path().join("func");
    Scratch { root, source, dir }
}

/// Append a FUNC_INSERT marker line for `working` to `source`.
pub fn add_marker(source: &Path, working: &Path) {
    let mut text = fs::read_to_string(source).unwrap();
    text.push_str(&format!("{}\n", funcx::splice::marker_for(working)));
    fs::write(source, text).unwrap();
}

/// Replace the body of a working copy, keeping its header intact.
pub fn edit_working(working: &Path, new_body: &str) {
    let header = funcx::meta::read_header(working).unwrap();
    fs::write(working, format!("{}\n{}", header.encode(), new_body)).unwrap();
}
