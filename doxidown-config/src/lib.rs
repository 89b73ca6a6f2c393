//! Shared configuration loader for the doxidown toolchain.
//!
//! `defaults/doxidown.default.toml` is embedded into every binary so that
//! docs and runtime behavior stay in sync. Applications layer user-specific
//! files on top of those defaults via [`Loader`] before deserializing into
//! [`DoxidownConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/doxidown.default.toml");

/// Top-level configuration consumed by doxidown applications.
#[derive(Debug, Clone, Deserialize)]
pub struct DoxidownConfig {
    pub project: ProjectConfig,
    pub convert: ConvertConfig,
}

/// Site-level branding and linking.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Display name; an empty string defers to Doxyfile.xml's PROJECT_NAME
    pub name: String,
    pub base_url: String,
}

/// Conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub flavor: OutputFlavor,
    pub suggest_todos: bool,
    pub extension: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum OutputFlavor {
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "html")]
    Html,
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

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<DoxidownConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<DoxidownConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.project.base_url, "/api/");
        assert_eq!(config.convert.flavor, OutputFlavor::Markdown);
        assert!(!config.convert.suggest_todos);
        assert_eq!(config.convert.extension, "md");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("convert.flavor", "html")
            .expect("override to apply")
            .set_override("convert.suggest_todos", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.convert.flavor, OutputFlavor::Html);
        assert!(config.convert.suggest_todos);
    }
}
