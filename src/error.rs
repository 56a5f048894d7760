// src/error.rs

//! Error types for funcx operations.
//!
//! The taxonomy mirrors the failure contract of the staging pipeline:
//! not-found conditions are recoverable by the caller, safety aborts are
//! always fatal, conflicts are fatal unless an explicit override was
//! supplied, and I/O failures are fatal with no retry.

use thiserror::Error;

/// Result type for funcx operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while staging or splicing shell functions
#[derive(Error, Debug)]
pub enum Error {
    /// No declaration line for the requested function was found
    #[error("function '{name}' not found in '{path}'")]
    FunctionNotFound { name: String, path: String },

    /// A declaration was found but its brace depth never returned to zero
    #[error("function '{name}' in '{path}' has an unterminated body")]
    UnterminatedFunction { name: String, path: String },

    /// A staged artifact is missing from the workspace
    #[error("staged artifact not found: '{0}'")]
    ArtifactNotFound(String),

    /// The working copy named by an insertion is missing
    #[error("working copy not found: '{0}'")]
    WorkingCopyNotFound(String),

    /// The reference copy for a verification is missing
    #[error("reference copy not found: '{0}'")]
    ReferenceNotFound(String),

    /// No line of the source file contains the insertion marker
    #[error("marker '{marker}' not found in '{path}'")]
    MarkerNotFound { marker: String, path: String },

    /// The artifact's first line is not a FUNC_META header
    #[error("no FUNC_META header in '{0}'")]
    MissingHeader(String),

    /// A FUNC_META header is present but a required field is absent or bad
    #[error("malformed FUNC_META header: {0}")]
    MalformedHeader(String),

    /// The source file moved but its content still matches the staged
    /// checksum; proceeding requires explicit confirmation
    #[error(
        "source moved: metadata records '{recorded}' but the file resolves to '{resolved}' \
         (content unchanged)"
    )]
    SourceMoved { recorded: String, resolved: String },

    /// Consistency check failed; the source has diverged since staging
    #[error("safety abort: {reason}")]
    SafetyAbort { reason: String },

    /// A target artifact already exists and no override was granted
    #[error("target already exists: '{0}'")]
    Conflict(String),

    /// A backup snapshot already exists and no disposition was chosen
    #[error("backup '{0}' already exists; skip it or rotate it to proceed")]
    BackupConflict(String),

    /// The file does not look like a shell source file
    #[error("'{0}' does not appear to be a shell source file")]
    NotShellSource(String),

    /// Unknown digest algorithm name
    #[error("unknown hash algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Digest value failed validation (length or hex characters)
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Declaration pattern failed to compile
    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
