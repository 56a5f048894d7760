// src/meta.rs

//! Provenance header codec for staged artifacts.
//!
//! Every staged artifact carries a single pipe-delimited comment line as
//! its first line:
//!
//! ```text
//! # FUNC_META | src:/abs/path.sh | src_sum:sha256:<hex> | orig:greet | edit:greet_v2 | orig_sum:sha256:<hex>
//! ```
//!
//! Fields are looked up by name, never by position, so headers decode
//! regardless of field order and unknown fields are carried through
//! untouched. `src` and `src_sum` may be amended in place after staging
//! (see the splice module's moved-source path); `orig`, `edit` and
//! `orig_sum` are immutable once written.

use crate::error::{Error, Result};
use crate::fsutil;
use crate::hash::Digest;
use std::fs;
use std::path::Path;

/// Leading token of a metadata header line
pub const META_PREFIX: &str = "# FUNC_META";

/// Decoded provenance header of a staged artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaHeader {
    /// Absolute (symlink-resolved) path of the origin source file
    pub src: String,
    /// Checksum of the entire origin file at extraction time
    pub src_sum: Digest,
    /// Original function name
    pub orig: String,
    /// Working function name
    pub edit: String,
    /// Checksum of the original function's body text
    pub orig_sum: Digest,
}

impl MetaHeader {
    /// Render the header as its single-line wire form
    pub fn encode(&self) -> String {
        format!(
            "{} | src:{} | src_sum:{} | orig:{} | edit:{} | orig_sum:{}",
            META_PREFIX,
            self.src,
            self.src_sum.to_prefixed_string(),
            self.orig,
            self.edit,
            self.orig_sum.to_prefixed_string(),
        )
    }

    /// Decode a header line, tolerant of field order, surrounding
    /// whitespace, and extra fields
    pub fn decode(line: &str) -> Result<Self> {
        let require = |name: &str| {
            field(line, name).ok_or_else(|| Error::MalformedHeader(format!("missing '{name}'")))
        };

        Ok(Self {
            src: require("src")?,
            src_sum: Digest::parse_prefixed(&require("src_sum")?)?,
            orig: require("orig")?,
            edit: require("edit")?,
            orig_sum: Digest::parse_prefixed(&require("orig_sum")?)?,
        })
    }
}

/// Look up one field's value by name in a header line.
///
/// Returns `None` when the line is not a FUNC_META header or the field is
/// absent. Values keep everything after the first colon, so digest tags
/// and paths containing colons survive.
pub fn field(line: &str, name: &str) -> Option<String> {
    if !line.trim_start().starts_with(META_PREFIX) {
        return None;
    }

    for segment in line.split('|').skip(1) {
        if let Some((key, value)) = segment.trim().split_once(':') {
            if key.trim() == name {
                return Some(value.trim().to_string());
            }
        }
    }
    None
}

/// True when a line is a metadata header
pub fn is_header(line: &str) -> bool {
    line.trim_start().starts_with(META_PREFIX)
}

/// Insert `header` as the new first line of `path`, shifting existing
/// content down
pub fn prepend(header: &MetaHeader, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    fsutil::write_atomic(path, &format!("{}\n{}", header.encode(), content))
}

/// Read and decode the header of a staged artifact
pub fn read_header(path: impl AsRef<Path>) -> Result<MetaHeader> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    match content.lines().next() {
        Some(first) if is_header(first) => MetaHeader::decode(first),
        _ => Err(Error::MissingHeader(path.display().to_string())),
    }
}

/// Body of an artifact with its leading metadata header removed.
///
/// Text without a header is returned unchanged.
pub fn strip_header(text: &str) -> &str {
    match text.split_once('\n') {
        Some((first, rest)) if is_header(first) => rest,
        _ => text,
    }
}

/// Rewrite one field of the header line of `path` in place, preserving
/// the order of all other fields and any unknown fields.
///
/// Only `src` and `src_sum` are legitimate targets; the caller enforces
/// that policy.
pub fn rewrite_field(path: impl AsRef<Path>, name: &str, value: &str) -> Result<()> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;

    let (first, rest) = content
        .split_once('\n')
        .ok_or_else(|| Error::MissingHeader(path.display().to_string()))?;
    if !is_header(first) {
        return Err(Error::MissingHeader(path.display().to_string()));
    }

    let mut found = false;
    let mut segments: Vec<String> = vec![META_PREFIX.to_string()];
    for segment in first.split('|').skip(1) {
        let trimmed = segment.trim();
        match trimmed.split_once(':') {
            Some((key, _)) if key.trim() == name => {
                segments.push(format!("{name}:{value}"));
                found = true;
            }
            _ => segments.push(trimmed.to_string()),
        }
    }

    if !found {
        return Err(Error::MalformedHeader(format!("missing '{name}'")));
    }

    fsutil::write_atomic(path, &format!("{}\n{}", segments.join(" | "), rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash;

    fn sample_header() -> MetaHeader {
        MetaHeader {
            src: "/home/op/app.sh".to_string(),
            src_sum: hash::checksum(b"source content\n"),
            orig: "greet".to_string(),
            edit: "greet_v2".to_string(),
            orig_sum: hash::checksum(b"greet() { echo hi; }\n"),
        }
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let header = sample_header();
        let decoded = MetaHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_decode_is_order_independent() {
        let header = sample_header();
        let line = format!(
            "{} | edit:{} | orig_sum:{} | src:{} | orig:{} | src_sum:{}",
            META_PREFIX,
            header.edit,
            header.orig_sum.to_prefixed_string(),
            header.src,
            header.orig,
            header.src_sum.to_prefixed_string(),
        );
        assert_eq!(MetaHeader::decode(&line).unwrap(), header);
    }

    #[test]
    fn test_decode_tolerates_extra_fields() {
        let line = format!("{} | note:manual-edit", sample_header().encode());
        assert_eq!(MetaHeader::decode(&line).unwrap(), sample_header());
    }

    #[test]
    fn test_decode_missing_field() {
        let line = format!("{} | src:/tmp/a.sh | orig:greet", META_PREFIX);
        assert!(matches!(
            MetaHeader::decode(&line),
            Err(Error::MalformedHeader(_))
        ));
    }

    #[test]
    fn test_field_lookup() {
        let line = sample_header().encode();
        assert_eq!(field(&line, "orig").as_deref(), Some("greet"));
        assert_eq!(field(&line, "edit").as_deref(), Some("greet_v2"));
        assert_eq!(field(&line, "absent"), None);
        assert_eq!(field("echo hi", "orig"), None);
    }

    #[test]
    fn test_field_value_keeps_colons() {
        let line = sample_header().encode();
        let sum = field(&line, "src_sum").unwrap();
        assert!(sum.starts_with("sha256:"));
    }

    #[test]
    fn test_decode_untagged_legacy_digests() {
        // Headers written by the legacy tool carried bare hex digests.
        let sum = hash::checksum(b"x");
        let line = format!(
            "{} | src:/tmp/a.sh | src_sum:{} | orig:greet | edit:greet_v2 | orig_sum:{}",
            META_PREFIX, sum.value, sum.value,
        );
        let header = MetaHeader::decode(&line).unwrap();
        assert_eq!(header.src_sum, sum);
    }

    #[test]
    fn test_prepend_shifts_content_down() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greet.orig.sh");
        std::fs::write(&path, "greet() { echo hi; }\n").unwrap();

        let header = sample_header();
        prepend(&header, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), header.encode());
        assert_eq!(lines.next().unwrap(), "greet() { echo hi; }");
    }

    #[test]
    fn test_read_header_requires_header_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.sh");
        std::fs::write(&path, "greet() { echo hi; }\n").unwrap();

        assert!(matches!(
            read_header(&path),
            Err(Error::MissingHeader(_))
        ));
    }

    #[test]
    fn test_strip_header() {
        let text = format!("{}\ngreet() {{ echo hi; }}\n", sample_header().encode());
        assert_eq!(strip_header(&text), "greet() { echo hi; }\n");
        assert_eq!(strip_header("no header\n"), "no header\n");
    }

    #[test]
    fn test_rewrite_field_preserves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greet_v2.edit.sh");
        let header = sample_header();
        std::fs::write(
            &path,
            format!("{}\ngreet_v2() {{ echo hi; }}\n", header.encode()),
        )
        .unwrap();

        rewrite_field(&path, "src", "/elsewhere/app.sh").unwrap();

        let updated = read_header(&path).unwrap();
        assert_eq!(updated.src, "/elsewhere/app.sh");
        assert_eq!(updated.orig, header.orig);
        assert_eq!(updated.edit, header.edit);
        assert_eq!(updated.orig_sum, header.orig_sum);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.ends_with("greet_v2() { echo hi; }\n"));
    }

    #[test]
    fn test_rewrite_field_unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("greet_v2.edit.sh");
        std::fs::write(&path, format!("{}\nbody\n", sample_header().encode())).unwrap();

        assert!(matches!(
            rewrite_field(&path, "nope", "x"),
            Err(Error::MalformedHeader(_))
        ));
    }
}
