// src/commands/stage.rs

//! Staging commands: `copy`, `extract`, and `spy`.

use anyhow::Result;
use funcx::{scanner, workspace};
use tracing::info;

/// Stage a function as a reference/working pair
pub fn cmd_copy(
    func: &str,
    src: &str,
    alias: Option<&str>,
    force: bool,
    bash: bool,
    dir: &str,
) -> Result<()> {
    super::require_shell_source(src, bash)?;

    let pair = workspace::stage(func, src, alias, force, dir)?;

    println!("Created reference file: '{}'", pair.reference.display());
    println!("Created working file:   '{}'", pair.working.display());
    println!();
    println!(
        "Edit the working copy, place '# FUNC_INSERT {}' in the source, then run:",
        pair.working.display()
    );
    println!("  funcx insert {} {}", pair.working_name, src);
    Ok(())
}

/// Write a standalone extracted copy (no reference pairing)
pub fn cmd_extract(func: &str, src: &str, force: bool, dir: &str) -> Result<()> {
    let target = workspace::extract_to_file(func, src, force, dir)?;
    println!("Extracted function to '{}'", target.display());
    Ok(())
}

/// Print a function body to stdout
pub fn cmd_spy(func: &str, src: &str) -> Result<()> {
    let body = scanner::extract(func, src)?;
    info!("found '{}' ({} lines)", func, body.lines.len());
    print!("{}", body.text());
    Ok(())
}
