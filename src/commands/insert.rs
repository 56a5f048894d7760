// src/commands/insert.rs

//! The `insert` command: safety-checked splice of a working copy back
//! into its source file.

use anyhow::Result;
use funcx::{splice, workspace, BackupMode, Error, InsertOptions};

/// Splice `<dir>/<func>.edit.sh` into `src` at its marker.
///
/// `yes` accepts a moved-but-unchanged source without prompting and
/// proceeds without a fresh backup when one already exists; `force`
/// rotates an existing backup chain instead.
pub fn cmd_insert(func: &str, src: &str, yes: bool, force: bool, dir: &str) -> Result<()> {
    let working = workspace::working_path(dir, func);

    let backup = if force {
        BackupMode::Rotate
    } else if yes {
        BackupMode::Skip
    } else {
        BackupMode::Abort
    };

    let options = InsertOptions {
        strict: true,
        accept_moved_source: yes,
        backup,
    };

    match splice::insert(&working, src, &options) {
        Ok(()) => {}
        Err(Error::SourceMoved { recorded, resolved }) => {
            // Path mismatch but identical content: ask before amending
            // the header and proceeding.
            let prompt = format!(
                "Source moved ('{}' -> '{}') but checksums match. Update metadata and continue?",
                recorded, resolved
            );
            if !super::confirm(&prompt)? {
                anyhow::bail!("aborted by user");
            }
            let accepted = InsertOptions {
                accept_moved_source: true,
                ..options
            };
            splice::insert(&working, src, &accepted)?;
        }
        Err(Error::BackupConflict(backup)) => {
            anyhow::bail!(
                "backup '{}' already exists; use --yes to proceed without a new backup, \
                 or --force to version the existing one",
                backup
            );
        }
        Err(err) => return Err(err.into()),
    }

    println!("Successfully inserted '{}' into '{}'.", func, src);
    Ok(())
}
