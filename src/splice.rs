// src/splice.rs

//! Safety guard and insertion engine.
//!
//! An insertion replaces a `# FUNC_INSERT <working-path>` marker line in a
//! source file with the body of the named working copy. Before mutating
//! anything the engine verifies that the source file is still the one the
//! edit was staged against, and snapshots the source into its backup
//! chain. A source that has diverged in both path and content is never
//! overwritten.
//!
//! All behavior toggles arrive through [`InsertOptions`]; there is no
//! process-wide state, so the outcome is a function of (artifact, source,
//! options) alone.

use crate::error::{Error, Result};
use crate::fsutil;
use crate::hash;
use crate::meta;
use crate::workspace;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Leading token of an insertion marker line
pub const MARKER_PREFIX: &str = "# FUNC_INSERT";

/// The marker line text for a working-copy path, matched as an exact
/// substring of a full source line
pub fn marker_for(working: impl AsRef<Path>) -> String {
    format!("{} {}", MARKER_PREFIX, working.as_ref().display())
}

/// Disposition for a pre-existing `<source>.orig` backup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupMode {
    /// Refuse to proceed while a backup already exists
    #[default]
    Abort,
    /// Keep the existing backup and proceed without a fresh snapshot
    Skip,
    /// Rotate the existing chain (`.orig` becomes `.orig.0`, numbered
    /// entries shift up) and take a fresh snapshot
    Rotate,
}

/// Per-call configuration for [`insert`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertOptions {
    /// Enforce the path/checksum consistency check (the default)
    pub strict: bool,
    /// Accept a source that moved but whose content still matches the
    /// staged checksum, amending the header's `src` in place
    pub accept_moved_source: bool,
    /// What to do when `<source>.orig` already exists
    pub backup: BackupMode,
}

impl Default for InsertOptions {
    fn default() -> Self {
        Self {
            strict: true,
            accept_moved_source: false,
            backup: BackupMode::Abort,
        }
    }
}

/// Primary backup path for a source file (`<source>.orig`)
pub fn backup_path(source: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(format!("{}.orig", source.as_ref().display()))
}

/// Numbered backup path (`<source>.orig.N`); higher N is strictly older
pub fn numbered_backup_path(source: impl AsRef<Path>, index: usize) -> PathBuf {
    PathBuf::from(format!("{}.orig.{}", source.as_ref().display(), index))
}

/// Snapshot `source` into its backup chain according to `mode`.
///
/// With no existing `<source>.orig` a fresh snapshot is always taken and
/// `mode` is irrelevant.
fn take_backup(source: &Path, mode: BackupMode) -> Result<()> {
    let primary = backup_path(source);

    if !primary.exists() {
        fs::copy(source, &primary)?;
        info!("created backup: '{}'", primary.display());
        return Ok(());
    }

    match mode {
        BackupMode::Abort => Err(Error::BackupConflict(primary.display().to_string())),
        BackupMode::Skip => {
            warn!(
                "proceeding without a fresh backup; '{}' is stale",
                primary.display()
            );
            Ok(())
        }
        BackupMode::Rotate => {
            // Shift numbered entries from the oldest down so indexes
            // stay strictly increasing with age.
            let mut count = 0;
            while numbered_backup_path(source, count).exists() {
                count += 1;
            }
            for index in (0..count).rev() {
                fs::rename(
                    numbered_backup_path(source, index),
                    numbered_backup_path(source, index + 1),
                )?;
            }
            fs::rename(&primary, numbered_backup_path(source, 0))?;
            fs::copy(source, &primary)?;
            info!("rotated backup chain; fresh '{}'", primary.display());
            Ok(())
        }
    }
}

/// Consistency check between a working copy's header and the current
/// source file
fn check_consistency(
    working: &Path,
    source: &Path,
    source_text: &str,
    options: &InsertOptions,
) -> Result<()> {
    if !options.strict {
        return Ok(());
    }

    let header = meta::read_header(working)?;

    let resolved = fsutil::resolve(source)?;
    if header.src == resolved {
        return Ok(());
    }

    // Path mismatch: the file may simply have been moved. Only identical
    // content is eligible to proceed, and only with explicit consent.
    if header.src_sum.matches(source_text.as_bytes()) {
        if !options.accept_moved_source {
            return Err(Error::SourceMoved {
                recorded: header.src,
                resolved,
            });
        }
        debug!(
            "amending src in '{}': '{}' -> '{}'",
            working.display(),
            header.src,
            resolved
        );
        meta::rewrite_field(working, "src", &resolved)?;
        return Ok(());
    }

    Err(Error::SafetyAbort {
        reason: format!(
            "source file path and checksum both mismatch for '{}'",
            working.display()
        ),
    })
}

/// Splice the working copy at `working` into `source`, replacing the
/// marker line `# FUNC_INSERT <working>`.
///
/// The metadata header is stripped from the working copy before
/// insertion; every other line of the source is preserved in order. The
/// staged artifacts themselves are untouched.
pub fn insert(working: impl AsRef<Path>, source: impl AsRef<Path>, options: &InsertOptions) -> Result<()> {
    let working = working.as_ref();
    let source = source.as_ref();

    if !working.exists() {
        return Err(Error::WorkingCopyNotFound(working.display().to_string()));
    }

    let marker = marker_for(working);
    let source_text = fs::read_to_string(source)?;

    if !source_text.lines().any(|line| line.contains(&marker)) {
        return Err(Error::MarkerNotFound {
            marker,
            path: source.display().to_string(),
        });
    }

    check_consistency(working, source, &source_text, options)?;

    take_backup(source, options.backup)?;

    let working_text = fs::read_to_string(working)?;
    let mut body = meta::strip_header(&working_text).to_string();
    if !body.ends_with('\n') {
        body.push('\n');
    }

    let mut out = String::with_capacity(source_text.len() + body.len());
    let mut spliced = false;
    for line in source_text.lines() {
        if !spliced && line.contains(&marker) {
            out.push_str(&body);
            spliced = true;
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }
    if !source_text.ends_with('\n') && out.ends_with('\n') {
        out.pop();
    }

    fsutil::write_atomic(source, &out)?;
    info!(
        "inserted '{}' into '{}'",
        working.display(),
        source.display()
    );
    Ok(())
}

/// Compare a reference copy against its paired working copy.
///
/// Returns `true` when the working body has changed. The working copy's
/// declaration line is normalized back to the original name first, so a
/// freshly staged pair reports unchanged.
pub fn verify(reference: impl AsRef<Path>, dir: impl AsRef<Path>) -> Result<bool> {
    let reference = reference.as_ref();

    if !reference.exists() {
        return Err(Error::ReferenceNotFound(reference.display().to_string()));
    }

    let reference_text = fs::read_to_string(reference)?;
    let header = meta::read_header(reference)?;

    let working = workspace::working_path(dir, &header.edit);
    if !working.exists() {
        return Err(Error::WorkingCopyNotFound(working.display().to_string()));
    }
    let working_text = fs::read_to_string(&working)?;

    let reference_body = meta::strip_header(&reference_text);
    let working_body = workspace::rename_declaration(
        meta::strip_header(&working_text),
        &header.edit,
        &header.orig,
    );

    let changed = hash::checksum(reference_body.as_bytes())
        != hash::checksum(working_body.as_bytes());
    Ok(changed)
}
