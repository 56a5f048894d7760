// src/commands/flag.rs

//! The `flag` command: place a FUNC_INSERT marker above an existing
//! function declaration.

use anyhow::Result;
use funcx::{fsutil, scanner, splice, workspace};
use std::fs;

/// Insert `# FUNC_INSERT <dir>/<new>.edit.sh` above the declaration of
/// `func` in `src`, separated from the preceding code by a blank line.
pub fn cmd_flag(func: &str, new: &str, src: &str, dir: &str) -> Result<()> {
    let Some(line) = scanner::declaration_line(func, src)? else {
        anyhow::bail!("function '{}' not found in '{}'", func, src);
    };

    let marker = splice::marker_for(workspace::working_path(dir, new));
    let content = fs::read_to_string(src)?;

    let mut out = String::with_capacity(content.len() + marker.len() + 2);
    for (idx, text) in content.lines().enumerate() {
        if idx + 1 == line {
            out.push('\n');
            out.push_str(&marker);
            out.push('\n');
        }
        out.push_str(text);
        out.push('\n');
    }
    if !content.ends_with('\n') && out.ends_with('\n') {
        out.pop();
    }

    fsutil::write_atomic(src, &out)?;
    println!("Flag for '{}' inserted.", new);
    Ok(())
}
