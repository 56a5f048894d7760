// src/cli.rs

//! CLI definitions for funcx.
//!
//! This module contains the command-line interface definitions using
//! clap. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "funcx")]
#[command(version)]
#[command(
    about = "Safety-conscious shell function extraction, staging, and reinsertion",
    long_about = None
)]
pub struct Cli {
    /// Suppress informational output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stage a function: reference copy plus a renamed working copy
    Copy {
        /// Function name to extract
        func: String,

        /// Shell source file
        src: String,

        /// Custom working name instead of the probed <name>_vN
        #[arg(long)]
        alias: Option<String>,

        /// Overwrite existing staged artifacts
        #[arg(short, long)]
        force: bool,

        /// Treat the source as a shell script, bypassing validation
        #[arg(long)]
        bash: bool,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Splice an edited working copy back into its source at the marker
    Insert {
        /// Working function name (its .edit.sh must exist)
        func: String,

        /// Shell source file containing the FUNC_INSERT marker
        src: String,

        /// Answer yes to prompts; proceed without a fresh backup
        #[arg(short, long)]
        yes: bool,

        /// Rotate an existing backup instead of refusing
        #[arg(short, long)]
        force: bool,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Delete the staged artifacts for a finished round-trip
    Done {
        /// Function name the artifacts were staged under
        func: String,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Archive backup files, or with --force delete all artifacts
    Clean {
        /// Permanently delete the staging directory and backups
        #[arg(short, long)]
        force: bool,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Print a function body to stdout
    Spy {
        /// Function name
        func: String,

        /// Shell source file
        src: String,
    },

    /// Write a standalone extracted copy with no pairing
    Extract {
        /// Function name
        func: String,

        /// Shell source file
        src: String,

        /// Overwrite an existing extracted copy
        #[arg(short, long)]
        force: bool,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Report whether a staged working copy differs from its reference
    Check {
        /// Function name the pair was staged under
        func: String,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Print a staged artifact's metadata header, or one field of it
    Meta {
        /// Artifact file name inside the staging directory
        file: String,

        /// Field to extract (src, src_sum, orig, edit, orig_sum, ...)
        field: Option<String>,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Place a FUNC_INSERT marker above a function's declaration
    Flag {
        /// Existing function the marker goes above
        func: String,

        /// Working name the marker should reference
        new: String,

        /// Shell source file
        src: String,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Print the line number of a working copy's marker
    Point {
        /// Working name referenced by the marker
        new: String,

        /// Shell source file
        src: String,

        /// Staging directory
        #[arg(long, default_value = "./func")]
        dir: String,
    },

    /// Print the declaration line number of a function, or -1
    Where {
        /// Function name
        func: String,

        /// Shell source file
        src: String,

        /// Treat the source as a shell script, bypassing validation
        #[arg(long)]
        bash: bool,
    },

    /// List the functions declared in a source file
    Ls {
        /// Shell source file
        src: String,

        /// Treat the source as a shell script, bypassing validation
        #[arg(long)]
        bash: bool,
    },

    /// List functions whose name contains a pattern
    Find {
        /// Substring to match against function names
        pattern: String,

        /// Shell source file
        src: String,

        /// Treat the source as a shell script, bypassing validation
        #[arg(long)]
        bash: bool,
    },
}
