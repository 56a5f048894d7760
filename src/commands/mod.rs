// src/commands/mod.rs

//! Command handlers for the funcx CLI.
//!
//! Handlers are thin wrappers: argument validation, prompts, and
//! presentation live here; every real invariant is enforced by the
//! library modules they call into.

mod cleanup;
mod flag;
mod insert;
mod query;
mod stage;

pub use cleanup::{cmd_clean, cmd_done};
pub use flag::cmd_flag;
pub use insert::cmd_insert;
pub use query::{cmd_check, cmd_find, cmd_ls, cmd_meta, cmd_point, cmd_where};
pub use stage::{cmd_copy, cmd_extract, cmd_spy};

use anyhow::Result;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Extensions accepted as shell sources without further inspection
const SHELL_EXTENSIONS: &[&str] = &[".sh", ".bash", ".func", ".fx"];

/// Extensions rejected outright
const NON_SHELL_EXTENSIONS: &[&str] = &[".log", ".txt", ".md"];

/// Validate that `src` looks like a shell source file.
///
/// Extension allowlist first, then denylist, then a shebang sniff of the
/// first line. `bash_override` (the `--bash` flag) bypasses everything.
pub(crate) fn require_shell_source(src: &str, bash_override: bool) -> Result<()> {
    if bash_override {
        return Ok(());
    }

    let path = Path::new(src);
    if !path.is_file() {
        anyhow::bail!("source file not found: '{}'", src);
    }

    if SHELL_EXTENSIONS.iter().any(|ext| src.ends_with(ext)) {
        return Ok(());
    }
    if NON_SHELL_EXTENSIONS.iter().any(|ext| src.ends_with(ext)) {
        return Err(anyhow::Error::new(funcx::Error::NotShellSource(src.to_string()))
            .context("use --bash to override"));
    }

    let mut first_line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut first_line)?;
    if first_line.contains("bash") {
        return Ok(());
    }

    Err(anyhow::Error::new(funcx::Error::NotShellSource(src.to_string()))
        .context("use --bash to override"))
}

/// Plain stdin yes/no prompt; anything but an explicit yes declines
pub(crate) fn confirm(message: &str) -> Result<bool> {
    let mut stdout = io::stdout();
    write!(stdout, "{} [y/N]: ", message)?;
    stdout.flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
