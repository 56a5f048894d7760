// src/workspace.rs

//! Workspace manager: owns the on-disk layout of staged artifacts and
//! decides their names.
//!
//! Layout, relative to the invocation directory (default `./func`):
//!
//! - `<name>.orig.sh`: immutable reference copy of the captured body
//! - `<working>.edit.sh`: working copy intended for external editing
//! - `<name>.extracted.sh`: standalone extracted copy, no pairing
//!
//! Reference and working copies are created together by [`stage`] and
//! carry identical provenance headers.

use crate::error::{Error, Result};
use crate::fsutil;
use crate::hash;
use crate::meta::MetaHeader;
use crate::scanner;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default staging directory
pub const DEFAULT_DIR: &str = "./func";

/// Paths produced by a staging operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPair {
    /// Reference copy (`<name>.orig.sh`)
    pub reference: PathBuf,
    /// Working copy (`<working>.edit.sh`)
    pub working: PathBuf,
    /// The working function name chosen for this staging
    pub working_name: String,
}

/// Reference copy path for a function name
pub fn reference_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{name}.orig.sh"))
}

/// Working copy path for a working name
pub fn working_path(dir: impl AsRef<Path>, working_name: &str) -> PathBuf {
    dir.as_ref().join(format!("{working_name}.edit.sh"))
}

/// Standalone extracted copy path for a function name
pub fn extracted_path(dir: impl AsRef<Path>, name: &str) -> PathBuf {
    dir.as_ref().join(format!("{name}.extracted.sh"))
}

/// Pick the working name for `name`: probe `<name>_v2`, `<name>_v3`, …
/// until a working-copy path that does not exist on disk is found.
fn next_working_name(dir: &Path, name: &str) -> String {
    let mut version = 2;
    loop {
        let candidate = format!("{name}_v{version}");
        if !working_path(dir, &candidate).exists() {
            return candidate;
        }
        version += 1;
    }
}

/// Substitute the working name into the declaration line only; the rest
/// of the body is left untouched.
pub(crate) fn rename_declaration(body_text: &str, orig: &str, working: &str) -> String {
    match body_text.split_once('\n') {
        Some((decl, rest)) => {
            format!("{}\n{}", decl.replacen(orig, working, 1), rest)
        }
        None => body_text.replacen(orig, working, 1),
    }
}

/// Stage the function `name` from `source`: write a reference copy and a
/// renamed working copy, both carrying an identical provenance header.
///
/// The working name is `alias` when supplied, otherwise the first free
/// `<name>_vN` starting at `_v2`. Existing target artifacts abort with
/// [`Error::Conflict`] unless `force` is set, in which case both are
/// overwritten.
pub fn stage(
    name: &str,
    source: impl AsRef<Path>,
    alias: Option<&str>,
    force: bool,
    dir: impl AsRef<Path>,
) -> Result<StagedPair> {
    let source = source.as_ref();
    let dir = dir.as_ref();

    let body = scanner::extract(name, source)?;

    fs::create_dir_all(dir)?;

    let working_name = match alias {
        Some(alias) => alias.to_string(),
        None => next_working_name(dir, name),
    };
    debug!("working name for '{}': '{}'", name, working_name);

    let reference = reference_path(dir, name);
    let working = working_path(dir, &working_name);

    if !force {
        for target in [&reference, &working] {
            if target.exists() {
                return Err(Error::Conflict(target.display().to_string()));
            }
        }
    }

    let body_text = body.text();
    let src_bytes = fs::read(source)?;

    let header = MetaHeader {
        src: fsutil::resolve(source)?,
        src_sum: hash::checksum(&src_bytes),
        orig: name.to_string(),
        edit: working_name.clone(),
        orig_sum: hash::checksum(body_text.as_bytes()),
    };
    let header_line = header.encode();

    // Reference copy keeps the captured body verbatim; the working copy
    // renames the declaration line only.
    fsutil::write_atomic(&reference, &format!("{header_line}\n{body_text}"))?;

    let renamed = rename_declaration(&body_text, name, &working_name);
    fsutil::write_atomic(&working, &format!("{header_line}\n{renamed}"))?;

    info!("created reference file: '{}'", reference.display());
    info!("created working file:   '{}'", working.display());

    Ok(StagedPair {
        reference,
        working,
        working_name,
    })
}

/// Write a standalone extracted copy of `name` with no reference pairing
/// and no header. Used purely for inspection and export.
pub fn extract_to_file(
    name: &str,
    source: impl AsRef<Path>,
    force: bool,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let body = scanner::extract(name, source)?;

    fs::create_dir_all(dir)?;

    let target = extracted_path(dir, name);
    if target.exists() && !force {
        return Err(Error::Conflict(target.display().to_string()));
    }

    fsutil::write_atomic(&target, &body.text())?;
    info!("extracted function to '{}'", target.display());
    Ok(target)
}
