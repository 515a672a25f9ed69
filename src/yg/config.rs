//! Configuration for the `yg` binary
//!
//! Values are resolved in layers, later layers winning:
//!
//! 1. `defaults/yg.default.toml`, compiled in with `include_str!`
//! 2. files added with [`Loader::with_file`] or [`Loader::with_optional_file`]
//! 3. `YG_`-prefixed environment variables, nested keys joined by `__`
//!    (`YG_PARSE__MAX_ERRORS=5`)
//! 4. single-key overrides, which is how CLI flags arrive
//!
//! The library parser never reads any of this. Callers hand the resolved
//! [`ParseOptions`] to [`crate::parse_with_options`].

use crate::yg::parsing::ParseOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/yg.default.toml");

/// Environment variable prefix, e.g. `YG_OUTPUT__COLOR=never`
pub const ENV_PREFIX: &str = "YG";

/// Everything the binary needs after layering.
#[derive(Debug, Clone, Deserialize)]
pub struct YgConfig {
    /// `[parse]`: recovery and the error limit
    pub parse: ParseOptions,
    /// `[output]`: how `parse` prints and how diagnostics are colored
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color: ColorMode,
}

/// Tree rendering selected by `output.format` or `--format`.
///
/// Each variant names a formatter in
/// [`FormatRegistry::with_defaults`](crate::yg::formats::FormatRegistry::with_defaults).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Sexp,
    Treeviz,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Registry key of the formatter
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Sexp => "sexp",
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

/// Coloring of rendered diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Color when stderr is a terminal
    Auto,
    Always,
    Never,
}

impl From<ColorMode> for codespan_reporting::term::termcolor::ColorChoice {
    fn from(mode: ColorMode) -> Self {
        use codespan_reporting::term::termcolor::ColorChoice;
        match mode {
            ColorMode::Auto => ColorChoice::Auto,
            ColorMode::Always => ColorChoice::Always,
            ColorMode::Never => ColorChoice::Never,
        }
    }
}

/// Builder over the four configuration layers.
///
/// Layers are applied in call order, so call `with_env` after the files and
/// before `set_override`.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Only the embedded defaults
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a TOML file; `build` fails if it does not exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.file(path.as_ref(), true)
    }

    /// Add a TOML file that may be absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.file(path.as_ref(), false)
    }

    /// Add the process environment under [`ENV_PREFIX`].
    pub fn with_env(self) -> Self {
        self.with_env_source(None)
    }

    fn with_env_source(mut self, vars: Option<config::Map<String, String>>) -> Self {
        let env = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(vars);
        self.builder = self.builder.add_source(env);
        self
    }

    fn file(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Set one dotted key, e.g. `("parse.recover", false)`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Merge the layers and deserialize. Unknown enum values such as
    /// `output.format = "xml"` are reported here.
    pub fn build(self) -> Result<YgConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<YgConfig, ConfigError> {
    Loader::new().build()
}
