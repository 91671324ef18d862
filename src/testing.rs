//! Testing utilities
//!
//!     Helpers shared by the unit and integration tests. Pre-lexer tests compare whole line
//!     sequences, so the helpers work on slices of lines rather than on source strings with
//!     embedded newlines, which keeps trailing whitespace visible in assertions.
//!
//!     Longer inputs live as sample files under `tests/fixtures/`, loaded with [`sample`].
//!     Prefer adding a sample there over writing multi-line string literals in tests.

use crate::error::PreLexError;
use crate::prelexing::{process_with, source_lines, PreLexerOptions};
use std::path::PathBuf;

/// Split source text the way the pre-lexer does.
pub fn split_lines(source: &str) -> Vec<String> {
    source_lines(source).map(str::to_string).collect()
}

/// Pre-lex `lines` with default options, panicking on error.
pub fn prelex_lines(lines: &[&str]) -> Vec<String> {
    prelex_lines_with(lines, PreLexerOptions::default())
}

pub fn prelex_lines_with(lines: &[&str], options: PreLexerOptions) -> Vec<String> {
    process_with(lines, options)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|err| panic!("pre-lexing failed: {err}\ninput: {lines:#?}"))
}

/// Pre-lex `lines` with default options, expecting the sequence to end in an error.
pub fn prelex_error(lines: &[&str]) -> PreLexError {
    prelex_error_with(lines, PreLexerOptions::default())
}

pub fn prelex_error_with(lines: &[&str], options: PreLexerOptions) -> PreLexError {
    match process_with(lines, options).collect::<Result<Vec<_>, _>>() {
        Ok(output) => panic!("expected an error, got {output:#?}"),
        Err(err) => err,
    }
}

/// Path of a sample file under `tests/fixtures/`.
pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a sample file, split into lines.
pub fn sample(name: &str) -> Vec<String> {
    let path = sample_path(name);
    let source = std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read sample {}: {err}", path.display()));
    split_lines(&source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_helpers_round_out_the_pipeline() {
        assert_eq!(prelex_lines(&["a", "b"]), vec!["a;", "b"]);
        assert_eq!(prelex_error(&["  a"]).kind, ErrorKind::WrongIndent);
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }
}
