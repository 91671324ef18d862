//! Lazy output sequence
//!
//!     [`PreLexer`] is a pull-based iterator: each call to `next` reads only as many input
//!     lines as it takes to settle one output line. Building it does no work and cannot fail.
//!     An error is produced exactly once, when production reaches the offending line, and the
//!     sequence ends right after it. A consumer that stops early never sees errors located
//!     past the point where it stopped reading.
use super::automaton::Automaton;
use super::emitter::LineEmitter;
use super::scanner::InputLine;
use super::PreLexerOptions;
use crate::error::PreLexError;
use std::iter::FusedIterator;
use tracing::debug;

pub struct PreLexer<I> {
    lines: I,
    line_number: usize,
    automaton: Automaton,
    emitter: LineEmitter,
    done: bool,
}

impl<I, S> PreLexer<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new<L>(lines: L) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self::with_options(lines, PreLexerOptions::default())
    }

    pub fn with_options<L>(lines: L, options: PreLexerOptions) -> Self
    where
        L: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            line_number: 0,
            automaton: Automaton::new(options),
            emitter: LineEmitter::new(),
            done: false,
        }
    }

    fn fail(&mut self, err: PreLexError) -> Option<Result<String, PreLexError>> {
        debug!(line = err.line, kind = %err.kind, "{}", err.message);
        self.done = true;
        self.emitter.clear();
        Some(Err(err))
    }
}

impl<I, S> Iterator for PreLexer<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<String, PreLexError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(line) = self.emitter.next_ready() {
                return Some(Ok(line));
            }
            if self.done {
                return None;
            }

            match self.lines.next() {
                Some(raw) => {
                    self.line_number += 1;
                    let input = InputLine::new(self.line_number, raw.as_ref());
                    match self.automaton.step(&input) {
                        Ok(event) => self.emitter.accept(event),
                        Err(err) => return self.fail(err),
                    }
                }
                None => {
                    self.done = true;
                    match self.automaton.finish() {
                        Ok(open_levels) => self.emitter.finish(open_levels),
                        Err(err) => return self.fail(err),
                    }
                }
            }
        }
    }
}

impl<I, S> FusedIterator for PreLexer<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
}
