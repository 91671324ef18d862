//! The per-invocation automaton
//!
//!     Scan state, bracket depth and the indentation stack are threaded together through one
//!     value that advances a line at a time. Nothing here is shared: every pre-lexing run owns
//!     a fresh automaton, which makes it possible to drive (and test) the whole state machine
//!     one line at a time.
use super::brackets::BracketDepth;
use super::emitter::LineEvent;
use super::indentation::IndentationStack;
use super::scanner::{InputLine, ScanState, Scanner};
use super::PreLexerOptions;
use crate::error::{PreLexError, Result};
use tracing::{debug, trace};

#[derive(Debug, Clone, Default)]
pub struct Automaton {
    scanner: Scanner,
    brackets: BracketDepth,
    indentation: IndentationStack,
    options: PreLexerOptions,
    last_line: usize,
}

impl Automaton {
    pub fn new(options: PreLexerOptions) -> Self {
        Self {
            scanner: Scanner::new(options.block_comment_tail),
            options,
            ..Self::default()
        }
    }

    pub fn scan_state(&self) -> ScanState {
        self.scanner.state()
    }

    pub fn bracket_depth(&self) -> usize {
        self.brackets.depth()
    }

    pub fn indentation_levels(&self) -> usize {
        self.indentation.depth()
    }

    /// Advance over one input line and classify its role in the output.
    pub fn step(&mut self, line: &InputLine<'_>) -> Result<LineEvent> {
        self.last_line = line.number;
        let scanned = self.scanner.scan(line, &mut self.brackets)?;
        trace!(
            line = scanned.number,
            depth = scanned.depth_at_start,
            width = scanned.width,
            blank = scanned.blank,
            "scanned"
        );

        if scanned.blank {
            return Ok(LineEvent::Blank(scanned.text));
        }
        if scanned.depth_at_start > 0 {
            return Ok(LineEvent::Nested(scanned.text));
        }

        if self.options.strict_comment_placement {
            if scanned.led_by_comment {
                return Err(PreLexError::syntax(
                    scanned.number,
                    "a comment cannot lead a line whose indentation is significant",
                ));
            }
            if scanned.code_after_carried_close {
                return Err(PreLexError::syntax(
                    scanned.number,
                    "a multi-line block comment may only be followed by code on its last line inside brackets",
                ));
            }
        }

        let transition = self.indentation.observe(scanned.width, scanned.number)?;
        Ok(LineEvent::Content {
            text: scanned.text,
            transition,
        })
    }

    /// End of input: returns the number of indentation levels left to close.
    pub fn finish(&mut self) -> Result<usize> {
        if self.scanner.state() == ScanState::InBlockComment {
            let opened = self.scanner.open_comment_line().unwrap_or(self.last_line);
            return Err(PreLexError::syntax(
                self.last_line,
                format!("unterminated block comment opened at line {opened}"),
            ));
        }
        let open = self.indentation.drain();
        debug!(closed = open, depth = self.brackets.depth(), "end of input");
        Ok(open)
    }
}
