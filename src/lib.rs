// src/lib.rs

//! Funcx: shell function extraction, staging, and safe reinsertion.
//!
//! The core is a linear pipeline with a feedback loop: a function body is
//! extracted from a shell source file, staged as an independently
//! editable artifact with an embedded provenance header, edited
//! externally, and later spliced back into the source at a
//! `# FUNC_INSERT` marker. The splice never silently overwrites a source
//! file that has diverged from what the edit was staged against.
//!
//! # Architecture
//!
//! - Scanner: brace-depth capture of a function body (purely textual)
//! - Hash: checksums for staging integrity, algorithm-tagged
//! - Meta: pipe-delimited provenance header codec
//! - Workspace: staged-artifact naming and on-disk layout
//! - Splice: consistency gate, backup chain, marker-based insertion

mod error;
pub mod fsutil;
pub mod hash;
pub mod meta;
pub mod scanner;
pub mod splice;
pub mod workspace;

pub use error::{Error, Result};
pub use hash::{Digest, HashAlgorithm};
pub use meta::MetaHeader;
pub use scanner::FunctionBody;
pub use splice::{BackupMode, InsertOptions};
pub use workspace::StagedPair;
