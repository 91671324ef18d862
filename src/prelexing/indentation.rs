//! Indentation tracking
//!
//!     Turns the leading whitespace width of each indentation-significant line into a block
//!     transition, the same way a brace would in a c-style syntax. The tracker keeps a stack
//!     of the widths that opened blocks, strictly increasing from bottom to top; an empty
//!     stack is the base level, width 0.
//!
//! Algorithm
//!
//!     1. The first content line establishes the baseline and must not be indented.
//!     2. Same width as the top of the stack: a sibling statement.
//!     3. Wider: a new block opens and its width is pushed.
//!     4. Narrower: blocks are popped until the top matches the width exactly. A width that
//!        falls between two levels matches nothing and is an error.
//!     5. At end of input every level still open is closed.
//!
//!     Widths are compared as raw character counts: a tab and a space both count as one.
use crate::error::{PreLexError, Result};
use tracing::debug;

/// How a content line relates to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// First content line of the input
    Baseline,
    /// Same level as the previous content line
    Same,
    /// One level deeper
    Indent,
    /// The given number of levels closed, landing on an enclosing level
    Dedent(usize),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum TrackerState {
    #[default]
    AwaitingBaseline,
    Tracking,
}

#[derive(Debug, Default, Clone)]
pub struct IndentationStack {
    widths: Vec<usize>,
    state: TrackerState,
}

impl IndentationStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of the innermost open level (0 at the base level)
    pub fn top(&self) -> usize {
        self.widths.last().copied().unwrap_or(0)
    }

    /// Number of open levels
    pub fn depth(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Compare a content line's width against the open levels and update them.
    pub fn observe(&mut self, width: usize, line: usize) -> Result<Transition> {
        if self.state == TrackerState::AwaitingBaseline {
            if width != 0 {
                return Err(PreLexError::wrong_indent(
                    line,
                    format!("first line must not be indented, found width {width}"),
                ));
            }
            self.state = TrackerState::Tracking;
            return Ok(Transition::Baseline);
        }

        let top = self.top();
        match width.cmp(&top) {
            std::cmp::Ordering::Equal => Ok(Transition::Same),
            std::cmp::Ordering::Greater => {
                self.widths.push(width);
                debug!(line, width, levels = self.depth(), "indent");
                Ok(Transition::Indent)
            }
            std::cmp::Ordering::Less => {
                let mut popped = 0;
                while self.top() > width {
                    self.widths.pop();
                    popped += 1;
                }
                if self.top() != width {
                    return Err(PreLexError::wrong_indent(
                        line,
                        format!(
                            "width {width} does not match any enclosing indentation level"
                        ),
                    ));
                }
                debug!(line, width, closed = popped, levels = self.depth(), "dedent");
                Ok(Transition::Dedent(popped))
            }
        }
    }

    /// Close every open level, returning how many there were.
    pub fn drain(&mut self) -> usize {
        let open = self.widths.len();
        self.widths.clear();
        open
    }
}
