//! Configuration loading
//!
//! `defaults/prelex.default.toml` is embedded into the crate so that documented defaults and
//! runtime behavior stay in sync. Applications layer user-specific files on top of those
//! defaults via [`Loader`] before deserializing into [`PrelexConfig`].

use crate::prelexing::{BlockCommentTail, PreLexerOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/prelex.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PrelexConfig {
    pub comments: CommentsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentsConfig {
    pub block_tail: BlockCommentTail,
    pub strict_placement: bool,
}

/// Controls how the command-line tool renders results.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl From<&PrelexConfig> for PreLexerOptions {
    fn from(config: &PrelexConfig) -> Self {
        Self {
            block_comment_tail: config.comments.block_tail,
            strict_comment_placement: config.comments.strict_placement,
        }
    }
}

/// Builds a [`PrelexConfig`] from the embedded defaults plus any number of layers.
///
/// Later layers win. CLI flags are applied last through [`Loader::set_override`].
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists, such as a per-directory `prelex.toml`.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Override one dotted key, e.g. `comments.block_tail`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<PrelexConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PrelexConfig, ConfigError> {
    Loader::new().build()
}
