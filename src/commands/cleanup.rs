// src/commands/cleanup.rs

//! Round-trip teardown: `done` removes a staged pair, `clean` archives
//! or deletes backups and the staging directory.

use anyhow::Result;
use funcx::{meta, workspace};
use std::fs;
use std::path::Path;
use tracing::info;

/// Delete the staged artifacts for `func`.
///
/// A reference copy names its paired working copy through the header's
/// `edit` field; both are removed together. A standalone extracted copy
/// is removed on its own.
pub fn cmd_done(func: &str, dir: &str) -> Result<()> {
    let reference = workspace::reference_path(dir, func);
    let extracted = workspace::extracted_path(dir, func);

    if reference.is_file() {
        let edit = meta::read_header(&reference).ok().map(|h| h.edit);

        fs::remove_file(&reference)?;
        println!("Removed: {}", reference.display());

        if let Some(edit) = edit {
            let working = workspace::working_path(dir, &edit);
            if working.is_file() {
                fs::remove_file(&working)?;
                println!("Removed: {}", working.display());
            }
        }
        return Ok(());
    }

    if extracted.is_file() {
        fs::remove_file(&extracted)?;
        println!("Removed: {}", extracted.display());
        return Ok(());
    }

    anyhow::bail!("no staged files found for '{}'", func)
}

/// Archive `*.orig*` backups into `./orig/`, or with `force` delete the
/// staging directory and all backups after confirmation.
pub fn cmd_clean(force: bool, dir: &str) -> Result<()> {
    if force {
        let prompt = format!("Permanently delete {dir}/ and all .orig backups?");
        if !super::confirm(&prompt)? {
            println!("Clean operation cancelled.");
            return Ok(());
        }

        if Path::new(dir).is_dir() {
            fs::remove_dir_all(dir)?;
            info!("removed staging directory '{}'", dir);
        }
        for entry in glob::glob("./*.orig*")? {
            let path = entry?;
            fs::remove_file(&path)?;
            info!("removed backup '{}'", path.display());
        }
        println!("All artifacts removed.");
        return Ok(());
    }

    let backups: Vec<_> = glob::glob("./*.orig*")?.collect::<std::result::Result<_, _>>()?;
    if backups.is_empty() {
        println!("No backup files found to archive.");
        return Ok(());
    }

    fs::create_dir_all("./orig")?;
    for path in backups {
        let Some(name) = path.file_name() else {
            continue;
        };
        let target = Path::new("./orig").join(name);
        fs::rename(&path, &target)?;
        info!("archived '{}' -> '{}'", path.display(), target.display());
    }
    println!("Archived backups to ./orig/");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const APP: &str = "#!/bin/bash\n\ngreet() { echo hi; }\n";

    fn setup() -> (tempfile::TempDir, PathBuf, PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let source = tmp.path().join("app.sh");
        fs::write(&source, APP).unwrap();
        let dir = tmp.path().join("func");
        (tmp, source, dir)
    }

    #[test]
    fn test_done_removes_both_halves_of_a_pair() {
        let (_tmp, source, dir) = setup();
        let pair = workspace::stage("greet", &source, None, false, &dir).unwrap();

        cmd_done("greet", dir.to_str().unwrap()).unwrap();

        assert!(!pair.reference.exists());
        assert!(!pair.working.exists());
    }

    #[test]
    fn test_done_removes_standalone_extracted_copy() {
        let (_tmp, source, dir) = setup();
        let target = workspace::extract_to_file("greet", &source, false, &dir).unwrap();

        cmd_done("greet", dir.to_str().unwrap()).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn test_done_errors_when_nothing_staged() {
        let (_tmp, _source, dir) = setup();
        fs::create_dir_all(&dir).unwrap();
        assert!(cmd_done("greet", dir.to_str().unwrap()).is_err());
    }
}
