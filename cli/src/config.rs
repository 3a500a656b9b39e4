//! Configuration loading.
//!
//! `defaults/isc.default.toml` is embedded into the binary. User files are
//! layered on top via [`Loader`] before deserializing into [`IscConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use isc_transpiler::TranspileOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_TOML: &str = include_str!("../defaults/isc.default.toml");

/// Project-local configuration file picked up from the working directory.
pub const LOCAL_CONFIG: &str = "isc.toml";

/// Top-level configuration consumed by the CLI.
#[derive(Debug, Clone, Deserialize)]
pub struct IscConfig {
    pub transpile: TranspileOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Fact-base header prepended to compiled output.
    pub header: Option<PathBuf>,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file, ignored if absent.
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    pub fn build(self) -> Result<IscConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Defaults, then `./isc.toml` if present, then `explicit` if given.
pub fn load(explicit: Option<&Path>) -> Result<IscConfig, ConfigError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = explicit {
        loader = loader.with_file(path);
    }

    let config = loader.build()?;
    tracing::debug!(
        structure_tags = ?config.transpile.structure_tags,
        header = ?config.output.header,
        "loaded configuration"
    );
    Ok(config)
}
