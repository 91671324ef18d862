//! Line emitter
//!
//!     Delimiters always land on the *previous* content line: whether a statement ends with
//!     `;`, opens a block with `{` or closes blocks with `}` is only known once the next
//!     content line's width (or the end of input) has been seen. The emitter therefore holds
//!     back the last content line, together with the blank lines that follow it, until that
//!     decision is made. Everything before it is ready to be handed out.
use super::indentation::Transition;
use std::collections::VecDeque;

/// What a scanned line contributes to the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Nothing but whitespace after comment stripping
    Blank(String),
    /// Content inside explicit brackets, where indentation carries no meaning
    Nested(String),
    /// Indentation-significant content
    Content { text: String, transition: Transition },
}

/// Text appended to the previous content line for a transition
fn delimiter(transition: Transition) -> String {
    match transition {
        Transition::Baseline => String::new(),
        Transition::Same => ";".to_string(),
        Transition::Indent => "{".to_string(),
        Transition::Dedent(closed) => format!("{};", "}".repeat(closed)),
    }
}

#[derive(Debug, Default)]
pub struct LineEmitter {
    pending: Option<String>,
    trailing: Vec<String>,
    ready: VecDeque<String>,
}

impl LineEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept(&mut self, event: LineEvent) {
        match event {
            LineEvent::Blank(text) => {
                if self.pending.is_some() {
                    self.trailing.push(text);
                } else {
                    self.ready.push_back(text);
                }
            }
            LineEvent::Nested(text) => self.replace_pending(text, ""),
            LineEvent::Content { text, transition } => {
                self.replace_pending(text, &delimiter(transition))
            }
        }
    }

    /// Close the remaining open levels on the terminal content line and release everything.
    pub fn finish(&mut self, open_levels: usize) {
        if let Some(mut last) = self.pending.take() {
            last.push_str(&"}".repeat(open_levels));
            self.ready.push_back(last);
        }
        self.ready.extend(self.trailing.drain(..));
    }

    pub fn next_ready(&mut self) -> Option<String> {
        self.ready.pop_front()
    }

    /// Drop everything not yet handed out
    pub fn clear(&mut self) {
        self.pending = None;
        self.trailing.clear();
        self.ready.clear();
    }

    fn replace_pending(&mut self, text: String, delimiter: &str) {
        if let Some(mut previous) = self.pending.replace(text) {
            previous.push_str(delimiter);
            self.ready.push_back(previous);
        }
        self.ready.extend(self.trailing.drain(..));
    }
}
