//! Character classes seen by the scanner
//!
//!     The logos lexer only splits a line into the pieces that matter for string and comment
//!     boundaries. Comment markers are two characters long but their halves are emitted as
//!     separate tokens: whether `/` followed by `*` opens a comment, closes one (`*/`), or is
//!     plain text depends on the scanner state and on escapes, so pairing is left to the
//!     scanner automaton. Every character of a line falls into exactly one token, so the
//!     concatenated slices always reproduce the line.
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    #[token("\"")]
    Quote,

    // Escapes the first character of the following token
    #[token("\\")]
    Backslash,

    #[token("/")]
    Slash,
    #[token("*")]
    Star,

    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    #[regex(r"[ \t]+")]
    Whitespace,

    // Everything else
    #[regex(r#"[^"\\/*{} \t]+"#)]
    Text,
}

/// Split a line into `(token, slice)` pairs.
///
/// Logos cannot fail on this token set since `Text` covers every other character, but an
/// error would still be surfaced as plain text rather than dropped.
pub fn tokenize(line: &str) -> Vec<(Token, &str)> {
    let mut lexer = Token::lexer(line);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        tokens.push((result.unwrap_or(Token::Text), lexer.slice()));
    }
    tokens
}
