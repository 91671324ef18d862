//! # prelex
//!
//! Pre-lexer for indentation-structured platform descriptions.
//!
//! Descriptions are authored with significant indentation; the grammar parser that consumes
//! them expects explicit delimiters. This crate performs the purely lexical rewrite between
//! the two, lazily and line by line, without any knowledge of the description language
//! beyond strings, comments and brackets. See the [prelexing] module for the algorithm.
//!
//! ```rust,ignore
//! let output: Vec<String> = prelex::process(["a", "  b", "c"]).collect::<Result<_, _>>()?;
//! assert_eq!(output, ["a{", "  b};", "c"]);
//! ```
//!
//! Layout
//!
//!     src/prelexing      The pre-lexer: scanner, trackers, emitter and the lazy stream
//!     src/config.rs      Layered configuration (embedded defaults + user files)
//!     src/error.rs       Classified, line-located errors
//!     src/testing.rs     Helpers for tests
//!     src/bin/prelex.rs  Command-line front end

pub mod config;
pub mod error;
pub mod prelexing;
pub mod testing;

pub use error::{ErrorKind, PreLexError};
pub use prelexing::{
    process, process_str, process_with, BlockCommentTail, PreLexer, PreLexerOptions,
};
