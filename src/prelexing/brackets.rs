//! Explicit bracket tracking
//!
//!     Counts the `{` an author wrote in code (never inside strings or comments, never when
//!     escaped). While the count is above zero, indentation carries no meaning: the author
//!     delimited the block explicitly and the lines inside it are passed through untouched.
use crate::error::{PreLexError, Result};

/// Number of unmatched explicit `{` seen so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BracketDepth(usize);

impl BracketDepth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.0
    }

    /// Indentation rules only apply at the top level
    pub fn is_top_level(&self) -> bool {
        self.0 == 0
    }

    pub fn open(&mut self) {
        self.0 += 1;
    }

    /// Match a `}` against the innermost open bracket.
    pub fn close(&mut self, line: usize) -> Result<()> {
        match self.0.checked_sub(1) {
            Some(depth) => {
                self.0 = depth;
                Ok(())
            }
            None => Err(PreLexError::syntax(
                line,
                "closing bracket without a matching opening bracket",
            )),
        }
    }
}
