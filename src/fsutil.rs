// src/fsutil.rs

//! Small filesystem helpers shared by the staging and splice modules.
//!
//! Every mutation of an artifact or source file goes through
//! [`write_atomic`] so a crash mid-write can never leave a half-written
//! file behind. Multi-file staging as a whole is still not transactional.

use crate::error::Result;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Write `contents` to `path` via a temporary file in the same directory,
/// then rename over the target.
///
/// If the target already exists its permission bits are carried over to
/// the replacement; otherwise the temporary file's default mode is kept.
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let perms = fs::metadata(path).ok().map(|m| m.permissions());

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.flush()?;

    if let Some(perms) = perms {
        fs::set_permissions(tmp.path(), perms)?;
    }

    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Resolve a path to its canonical (symlink-free, absolute) form,
/// rendered as a string for metadata comparison.
pub fn resolve(path: impl AsRef<Path>) -> Result<String> {
    Ok(fs::canonicalize(path)?.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_atomic_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");

        write_atomic(&target, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "hello\n");
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("out.txt");

        fs::write(&target, "old\n").unwrap();
        write_atomic(&target, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "new\n");
    }

    #[test]
    fn test_resolve_is_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("f.sh");
        fs::write(&target, "x\n").unwrap();

        let resolved = resolve(&target).unwrap();
        assert!(Path::new(&resolved).is_absolute());
    }
}
