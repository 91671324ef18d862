//! Pre-lexing
//!
//!     Platform descriptions are written with Python-like indentation, but the grammar parser
//!     downstream is a conventional brace-based one. This module bridges the two: it rewrites
//!     indentation-structured lines into a delimiter-structured stream where statements end
//!     with `;` and nested blocks are wrapped in `{` / `}`.
//!
//!         cpu: CPU.CortexM @ sysbus          cpu: CPU.CortexM @ sysbus{
//!             cpuType: "cortex-m4"     =>        cpuType: "cortex-m4";
//!             nvic: nvic                         nvic: nvic};
//!         uart: UART.PL011 @ sysbus          uart: UART.PL011 @ sysbus
//!
//!     Output lines map one to one onto input lines and keep their original leading
//!     whitespace, so line and column positions reported downstream still point into the
//!     author's source.
//!
//! The Pipeline
//!
//!     Each input line goes through the same stages, in a single pass:
//!         1. Scanning. See [scanner]. Strings, escapes and comments are recognised on top of
//!            the logos tokens from [tokens]; comments are cut or blanked.
//!         2. Bracket tracking. See [brackets]. Explicit `{` written by the author switch
//!            indentation handling off until they are closed.
//!         3. Indentation tracking. See [indentation]. The width of every non-blank line at
//!            bracket depth 0 is turned into a block transition.
//!         4. Emission. See [emitter]. The transition's delimiter is appended to the previous
//!            content line, which is then released.
//!
//!     Stages 1 to 3 share one [`Automaton`](automaton::Automaton); [`PreLexer`] drives it
//!     lazily and hands the emitted lines out as an iterator.
//!
//! Legality Rules
//!
//!     Two placements of comments are rejected at bracket depth 0, for compatibility with the
//!     reference toolchain: a comment leading a content line, and a multi-line block comment
//!     closing with code after it. Both can be switched off with
//!     [`PreLexerOptions::strict_comment_placement`].

pub mod automaton;
pub mod brackets;
pub mod emitter;
pub mod indentation;
pub mod scanner;
pub mod stream;
pub mod tokens;

pub use scanner::{BlockCommentTail, InputLine, ScanState};
pub use stream::PreLexer;

/// Behavior switches for a pre-lexing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreLexerOptions {
    pub block_comment_tail: BlockCommentTail,
    /// Reject comments leading indentation-significant lines and multi-line block comments
    /// closing before code outside brackets
    pub strict_comment_placement: bool,
}

impl Default for PreLexerOptions {
    fn default() -> Self {
        Self {
            block_comment_tail: BlockCommentTail::Trim,
            strict_comment_placement: true,
        }
    }
}

/// Pre-lex a sequence of lines with the default options.
pub fn process<L, S>(lines: L) -> PreLexer<L::IntoIter>
where
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    PreLexer::new(lines)
}

pub fn process_with<L, S>(lines: L, options: PreLexerOptions) -> PreLexer<L::IntoIter>
where
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    PreLexer::with_options(lines, options)
}

/// Split source text into lines: on `\n`, dropping a `\r` left before it.
///
/// A trailing newline yields a final empty line.
pub fn source_lines(source: &str) -> impl Iterator<Item = &str> + '_ {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Pre-lex whole source text.
pub fn process_str(
    source: &str,
    options: PreLexerOptions,
) -> PreLexer<impl Iterator<Item = &str> + '_> {
    PreLexer::with_options(source_lines(source), options)
}
