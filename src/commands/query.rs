// src/commands/query.rs

//! Read-only inspection commands: `check`, `meta`, `point`, `where`,
//! `ls`, and `find`.

use anyhow::Result;
use funcx::{meta, scanner, splice, workspace};
use std::fs;
use std::path::Path;

/// Report whether the working copy staged under `func` differs from its
/// reference. Returns the "changed" flag so the caller can set the exit
/// code (the legacy tool exits 0 on changes, 1 on none).
pub fn cmd_check(func: &str, dir: &str) -> Result<bool> {
    let reference = workspace::reference_path(dir, func);
    let changed = splice::verify(&reference, dir)?;

    if changed {
        println!("Changes detected.");
    } else {
        println!("No changes detected.");
    }
    Ok(changed)
}

/// Print a staged artifact's header line, or a single field of it
pub fn cmd_meta(file: &str, field: Option<&str>, dir: &str) -> Result<()> {
    let path = Path::new(dir).join(file);
    if !path.is_file() {
        return Err(funcx::Error::ArtifactNotFound(path.display().to_string()).into());
    }

    let content = fs::read_to_string(&path)?;
    let Some(header_line) = content.lines().next().filter(|l| meta::is_header(l)) else {
        anyhow::bail!("no FUNC_META header in '{}'", path.display());
    };

    match field {
        Some(name) => match meta::field(header_line, name) {
            Some(value) => println!("{}", value),
            None => anyhow::bail!("field '{}' absent from '{}'", name, path.display()),
        },
        None => println!("{}", header_line),
    }
    Ok(())
}

/// Print the 1-based line number of the marker referencing `new`, or
/// an empty line when absent
pub fn cmd_point(new: &str, src: &str, dir: &str) -> Result<()> {
    let marker = splice::marker_for(workspace::working_path(dir, new));
    let content = fs::read_to_string(src)?;

    match content.lines().position(|line| line.contains(&marker)) {
        Some(idx) => println!("{}", idx + 1),
        None => println!(),
    }
    Ok(())
}

/// Print the declaration line number of `func`, or -1
pub fn cmd_where(func: &str, src: &str, bash: bool) -> Result<()> {
    super::require_shell_source(src, bash)?;

    match scanner::declaration_line(func, src)? {
        Some(line) => println!("{}", line),
        None => println!("-1"),
    }
    Ok(())
}

/// List the functions declared in `src`, one per line
pub fn cmd_ls(src: &str, bash: bool) -> Result<()> {
    super::require_shell_source(src, bash)?;

    for name in scanner::list_functions(src)? {
        println!("{}", name);
    }
    Ok(())
}

/// List functions whose name contains `pattern`
pub fn cmd_find(pattern: &str, src: &str, bash: bool) -> Result<()> {
    super::require_shell_source(src, bash)?;

    for name in scanner::list_functions(src)? {
        if name.contains(pattern) {
            println!("{}", name);
        }
    }
    Ok(())
}
