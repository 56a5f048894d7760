// src/scanner.rs

//! Source scanner: locates a shell function declaration and captures its
//! body by brace-depth counting.
//!
//! The scanner is purely textual. It counts literal `{` and `}` characters
//! with no awareness of quoting, heredocs, or comments, so a brace inside a
//! string literal will skew the depth count. This matches the legacy tool
//! and is a documented limitation, not a bug to paper over with a shell
//! tokenizer.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// The captured text of a function definition, from its declaration line
/// through the line where brace depth returns to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionBody {
    /// Function identifier as it appears in the declaration
    pub name: String,
    /// Ordered lines of the definition, declaration and closing brace
    /// included
    pub lines: Vec<String>,
}

impl FunctionBody {
    /// Body text: lines joined by newlines, with a trailing newline.
    ///
    /// This is the canonical form used both when writing artifacts and
    /// when computing `orig_sum`, so the two always agree.
    pub fn text(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }

    /// The declaration line, if any lines were captured
    pub fn declaration(&self) -> Option<&str> {
        self.lines.first().map(String::as_str)
    }
}

/// Build the declaration pattern for a function name: optional leading
/// whitespace, the name, `()`, and an opening brace, each separated by
/// optional whitespace. Anything may follow the brace on the same line.
fn declaration_regex(name: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(
        r"^\s*{}\s*\(\s*\)\s*\{{",
        regex::escape(name)
    ))?)
}

/// Net brace depth change contributed by one line
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    for ch in line.chars() {
        match ch {
            '{' => delta += 1,
            '}' => delta -= 1,
            _ => {}
        }
    }
    delta
}

/// Extract the body of `name` from `source`.
///
/// Scans lines in order for the declaration pattern, then captures until
/// the running brace count returns to zero; that line (inclusive) ends the
/// body. A single-line definition like `greet() { echo hi; }` is captured
/// as one line.
///
/// Fails with [`Error::FunctionNotFound`] when no declaration matches
/// before end of file, and [`Error::UnterminatedFunction`] when a
/// declaration is found but the depth never returns to zero.
pub fn extract(name: &str, source: impl AsRef<Path>) -> Result<FunctionBody> {
    let source = source.as_ref();
    let content = fs::read_to_string(source)?;
    let decl = declaration_regex(name)?;

    let mut lines: Vec<String> = Vec::new();
    let mut depth: i32 = 0;
    let mut in_func = false;

    for line in content.lines() {
        if !in_func {
            if !decl.is_match(line) {
                continue;
            }
            in_func = true;
        }

        depth += brace_delta(line);
        lines.push(line.to_string());

        if depth == 0 {
            return Ok(FunctionBody {
                name: name.to_string(),
                lines,
            });
        }
    }

    if in_func {
        Err(Error::UnterminatedFunction {
            name: name.to_string(),
            path: source.display().to_string(),
        })
    } else {
        Err(Error::FunctionNotFound {
            name: name.to_string(),
            path: source.display().to_string(),
        })
    }
}

/// 1-based line number of the declaration of `name` in `source`, if any
pub fn declaration_line(name: &str, source: impl AsRef<Path>) -> Result<Option<usize>> {
    let content = fs::read_to_string(source.as_ref())?;
    let decl = declaration_regex(name)?;

    Ok(content
        .lines()
        .position(|line| decl.is_match(line))
        .map(|idx| idx + 1))
}

/// List the names of all functions declared in `source`, in file order
pub fn list_functions(source: impl AsRef<Path>) -> Result<Vec<String>> {
    let content = fs::read_to_string(source.as_ref())?;
    let pattern = Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*\(\s*\)\s*\{")?;

    Ok(content
        .lines()
        .filter_map(|line| {
            pattern
                .captures(line)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().to_string())
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn script(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".sh").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_extract_multi_line_body() {
        let src = script(
            "#!/bin/bash\n\
             greet() {\n  echo hello\n  echo world\n}\n\
             other() {\n  true\n}\n",
        );

        let body = extract("greet", src.path()).unwrap();
        assert_eq!(body.name, "greet");
        assert_eq!(
            body.lines,
            vec!["greet() {", "  echo hello", "  echo world", "}"]
        );
        assert_eq!(body.text(), "greet() {\n  echo hello\n  echo world\n}\n");
    }

    #[test]
    fn test_extract_single_line_body() {
        let src = script("greet() { echo hi; }\n");

        let body = extract("greet", src.path()).unwrap();
        assert_eq!(body.lines, vec!["greet() { echo hi; }"]);
    }

    #[test]
    fn test_extract_nested_braces() {
        let src = script(
            "outer() {\n  if true; then\n    var=${HOME}\n  fi\n  inner() {\n    true\n  }\n}\n",
        );

        let body = extract("outer", src.path()).unwrap();
        assert_eq!(body.lines.len(), 8);
        assert_eq!(body.lines.last().unwrap(), "}");
    }

    #[test]
    fn test_extract_indented_declaration() {
        let src = script("  greet () {\n    echo hi\n  }\n");

        let body = extract("greet", src.path()).unwrap();
        assert_eq!(body.lines.first().unwrap(), "  greet () {");
    }

    #[test]
    fn test_extract_does_not_match_prefix_names() {
        let src = script("greet_all() {\n  true\n}\n");

        assert!(matches!(
            extract("greet", src.path()),
            Err(Error::FunctionNotFound { .. })
        ));
    }

    #[test]
    fn test_extract_not_found() {
        let src = script("other() {\n  true\n}\n");

        let err = extract("greet", src.path()).unwrap_err();
        assert!(matches!(err, Error::FunctionNotFound { .. }));
    }

    #[test]
    fn test_extract_unterminated_is_distinct() {
        let src = script("greet() {\n  echo hi\n");

        let err = extract("greet", src.path()).unwrap_err();
        assert!(matches!(err, Error::UnterminatedFunction { .. }));
    }

    #[test]
    fn test_extract_stops_at_matching_close() {
        // The line after the closing brace must not be captured.
        let src = script("greet() {\n  echo hi\n}\ntrailing_line\n");

        let body = extract("greet", src.path()).unwrap();
        assert_eq!(body.lines.len(), 3);
    }

    #[test]
    fn test_declaration_line_numbers() {
        let src = script("#!/bin/bash\n\ngreet() {\n  true\n}\n");

        assert_eq!(declaration_line("greet", src.path()).unwrap(), Some(3));
        assert_eq!(declaration_line("missing", src.path()).unwrap(), None);
    }

    #[test]
    fn test_list_functions_in_order() {
        let src = script(
            "#!/bin/bash\n\
             alpha() {\n  true\n}\n\
             not_a_function=1\n\
             beta () {\n  true\n}\n",
        );

        assert_eq!(list_functions(src.path()).unwrap(), vec!["alpha", "beta"]);
    }
}
