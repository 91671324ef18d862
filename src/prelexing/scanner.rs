//! Scanner
//!
//!     Classifies every character of a line as code, string literal, line comment or block
//!     comment content, carrying the classification state from one line to the next. Only an
//!     open block comment may survive a line boundary: a string still open at the end of a
//!     line is an error, and a line comment always ends with its line.
//!
//! Blanking
//!
//!     Comments never reach the output. A line comment is cut off together with the rest of
//!     its line, since nothing can follow it. Block comment characters are replaced by one
//!     space each so that code after the closing marker keeps its column, which downstream
//!     error positions rely on. The only exception is a trailing run of blanks belonging to a
//!     comment that crosses a line boundary (the opening line's tail, whole inner lines, a
//!     closing line with nothing after the marker): with [`BlockCommentTail::Trim`] that run
//!     is dropped, with [`BlockCommentTail::Pad`] it is kept as spaces. A comment opened and
//!     closed on the same line is always padded.
//!
//! Escapes
//!
//!     A backslash escapes the first character of whatever follows it. Inside a string this
//!     keeps an escaped quote from terminating the literal. In code it keeps the escaped
//!     character from acting as a bracket, a quote or half of a comment marker.
use super::brackets::BracketDepth;
use super::tokens::{tokenize, Token};
use crate::error::{PreLexError, Result};
use serde::{Deserialize, Serialize};

/// Character classification carried between lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanState {
    #[default]
    Code,
    InString,
    InLineComment,
    InBlockComment,
}

/// What happens to blanked block comment text left trailing at the end of a line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockCommentTail {
    /// Drop the trailing blanks of comments crossing a line boundary
    #[default]
    Trim,
    /// Keep every blanked character as a space
    Pad,
}

/// One raw source line and its 1-based position in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> InputLine<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }
}

/// A line after comment stripping, plus what the indentation tracker needs to know about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine {
    pub number: usize,
    /// Line text with comments removed or blanked
    pub text: String,
    /// Explicit bracket depth before the first character of the line
    pub depth_at_start: usize,
    /// Leading whitespace width of `text`, in characters
    pub width: usize,
    /// Nothing but whitespace left after stripping comments
    pub blank: bool,
    /// The first non-whitespace token is a comment opener
    pub led_by_comment: bool,
    /// A block comment carried in from an earlier line closed here and code follows it
    pub code_after_carried_close: bool,
}

/// Accumulates the emitted text of a single line.
struct LineBuilder {
    text: String,
    // Byte length up to the last character that is not trailing comment blank space
    code_end: usize,
    // The trailing blank run belongs to a comment that crosses a line boundary
    tail_spans_lines: bool,
    in_carried_comment: bool,
    after_carried_close: bool,
    code_after_carried_close: bool,
    first_is_comment: Option<bool>,
}

impl LineBuilder {
    fn new(capacity: usize, continues_comment: bool) -> Self {
        Self {
            text: String::with_capacity(capacity),
            code_end: 0,
            tail_spans_lines: continues_comment,
            in_carried_comment: continues_comment,
            after_carried_close: false,
            code_after_carried_close: false,
            first_is_comment: None,
        }
    }

    fn code(&mut self, slice: &str) {
        self.text.push_str(slice);
        self.code_end = self.text.len();
        self.tail_spans_lines = false;
        self.first_is_comment.get_or_insert(false);
        if self.after_carried_close {
            self.code_after_carried_close = true;
        }
    }

    fn whitespace(&mut self, slice: &str) {
        self.text.push_str(slice);
        // Whitespace after a line-crossing comment joins its trailing run
        if !self.tail_spans_lines {
            self.code_end = self.text.len();
        }
    }

    fn comment_opened(&mut self) {
        self.first_is_comment.get_or_insert(true);
    }

    fn blank(&mut self, slice: &str) {
        self.text.extend(slice.chars().map(|_| ' '));
        if self.in_carried_comment {
            self.tail_spans_lines = true;
        }
    }

    fn comment_closed(&mut self) {
        if self.in_carried_comment {
            self.in_carried_comment = false;
            self.after_carried_close = true;
        }
    }

    fn finish(mut self, tail: BlockCommentTail, open_comment: bool) -> (String, bool, bool) {
        if open_comment {
            self.tail_spans_lines = true;
        }
        if tail == BlockCommentTail::Trim && self.tail_spans_lines {
            self.text.truncate(self.code_end);
        }
        (
            self.text,
            self.first_is_comment.unwrap_or(false),
            self.code_after_carried_close,
        )
    }
}

/// The character-level automaton. Holds the only state that crosses line boundaries at this
/// level: the scan state and where the currently open block comment started.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    state: ScanState,
    comment_opened_at: Option<usize>,
    tail: BlockCommentTail,
}

impl Scanner {
    pub fn new(tail: BlockCommentTail) -> Self {
        Self {
            tail,
            ..Self::default()
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Line on which the still-open block comment started, if any
    pub fn open_comment_line(&self) -> Option<usize> {
        self.comment_opened_at
    }

    /// Scan one line, updating `brackets` with every explicit bracket found in code.
    pub fn scan(
        &mut self,
        line: &InputLine<'_>,
        brackets: &mut BracketDepth,
    ) -> Result<ScannedLine> {
        let depth_at_start = brackets.depth();
        let continues_comment = self.state == ScanState::InBlockComment;
        let mut builder = LineBuilder::new(line.text.len(), continues_comment);
        let tokens = tokenize(line.text);
        let mut escaped = false;
        let mut i = 0;

        while i < tokens.len() {
            let (token, slice) = tokens[i];
            let next = tokens.get(i + 1).map(|(t, _)| *t);
            i += 1;

            match self.state {
                ScanState::Code if escaped => {
                    escaped = false;
                    builder.code(slice);
                }
                ScanState::Code => match (token, next) {
                    (Token::Slash, Some(Token::Slash)) => {
                        builder.comment_opened();
                        self.state = ScanState::InLineComment;
                        break;
                    }
                    (Token::Slash, Some(Token::Star)) => {
                        builder.comment_opened();
                        builder.blank("/*");
                        self.state = ScanState::InBlockComment;
                        self.comment_opened_at = Some(line.number);
                        i += 1;
                    }
                    (Token::Quote, _) => {
                        self.state = ScanState::InString;
                        builder.code(slice);
                    }
                    (Token::Backslash, _) => {
                        escaped = true;
                        builder.code(slice);
                    }
                    (Token::OpenBrace, _) => {
                        brackets.open();
                        builder.code(slice);
                    }
                    (Token::CloseBrace, _) => {
                        brackets.close(line.number)?;
                        builder.code(slice);
                    }
                    (Token::Whitespace, _) => builder.whitespace(slice),
                    _ => builder.code(slice),
                },
                ScanState::InString => {
                    if escaped {
                        escaped = false;
                    } else if token == Token::Quote {
                        self.state = ScanState::Code;
                    } else if token == Token::Backslash {
                        escaped = true;
                    }
                    builder.code(slice);
                }
                ScanState::InBlockComment => match (token, next) {
                    (Token::Star, Some(Token::Slash)) => {
                        builder.blank("*/");
                        builder.comment_closed();
                        self.state = ScanState::Code;
                        self.comment_opened_at = None;
                        i += 1;
                    }
                    _ => builder.blank(slice),
                },
                ScanState::InLineComment => break,
            }
        }

        match self.state {
            ScanState::InString => {
                return Err(PreLexError::syntax(
                    line.number,
                    "unterminated string literal",
                ))
            }
            ScanState::InLineComment => self.state = ScanState::Code,
            ScanState::Code | ScanState::InBlockComment => {}
        }

        let open_comment = self.state == ScanState::InBlockComment;
        let (text, led_by_comment, code_after_carried_close) =
            builder.finish(self.tail, open_comment);
        let width = text.chars().take_while(|c| c.is_whitespace()).count();
        let blank = text.trim().is_empty();

        Ok(ScannedLine {
            number: line.number,
            text,
            depth_at_start,
            width,
            blank,
            led_by_comment,
            code_after_carried_close,
        })
    }
}
