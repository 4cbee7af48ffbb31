//! Configuration source loading and composition

use crate::validation::Validate;
use crate::{ConfigError, ConfigResult, Settings};
use std::path::{Path, PathBuf};

/// Trait for loading configuration from different sources
pub trait ConfigurationSource {
    /// Load configuration from this source
    ///
    /// # Errors
    /// Returns configuration loading errors
    fn load(&self) -> ConfigResult<Settings>;

    /// Get the name of this configuration source
    fn name(&self) -> &str;

    /// Get the priority of this source (higher number = higher priority)
    fn priority(&self) -> u8;
}

/// Load configuration from environment variables
pub struct EnvironmentSource;

impl ConfigurationSource for EnvironmentSource {
    fn load(&self) -> ConfigResult<Settings> {
        Ok(Settings::from_env())
    }

    fn name(&self) -> &'static str {
        "environment"
    }

    fn priority(&self) -> u8 {
        100 // Environment variables override everything
    }
}

/// Serialization format of a configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Yaml,
}

impl FileFormat {
    /// Detect the format from a file extension
    ///
    /// # Errors
    /// Returns `ConfigError::UnsupportedFormat` for anything but
    /// `.toml`, `.yaml` and `.yml`
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Load configuration from a TOML or YAML file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ConfigurationSource for FileSource {
    fn load(&self) -> ConfigResult<Settings> {
        let format = FileFormat::from_path(&self.path)?;
        let content = std::fs::read_to_string(&self.path)?;

        let settings = match format {
            FileFormat::Toml => toml::from_str(&content)?,
            FileFormat::Yaml => serde_yaml::from_str(&content)?,
        };
        Ok(settings)
    }

    fn name(&self) -> &'static str {
        "file"
    }

    fn priority(&self) -> u8 {
        50 // Below env vars, above defaults
    }
}

/// Type alias for configuration sources
type ConfigSources = Vec<Box<dyn ConfigurationSource>>;

/// Configuration loader that combines multiple sources
pub struct ConfigurationLoader {
    sources: ConfigSources,
}

impl ConfigurationLoader {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn add_source(mut self, source: Box<dyn ConfigurationSource>) -> Self {
        self.sources.push(source);
        self
    }

    /// Load configuration from all sources with priority ordering
    ///
    /// Starts from [`Settings::from_env`]. Every source returns a whole bundle
    /// that replaces the current one, applied lowest priority first, so the
    /// highest priority source that loads wins and lower ones are discarded.
    /// Sources that fail to load are skipped with a warning; the winning
    /// bundle must still validate.
    ///
    /// # Errors
    /// Returns validation errors for the final bundle
    pub fn load(&self) -> ConfigResult<Settings> {
        let mut settings = Settings::from_env();

        // Lowest priority first, so the highest priority source lands last
        let mut sorted_sources = self.sources.iter().collect::<Vec<_>>();
        sorted_sources.sort_by_key(|source| source.priority());

        for source in sorted_sources {
            match source.load() {
                Ok(source_settings) => {
                    tracing::debug!(source = source.name(), "Loaded configuration");
                    settings = source_settings;
                }
                Err(e) => {
                    tracing::warn!(source = source.name(), error = %e, "Failed to load configuration");
                }
            }
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Default for ConfigurationLoader {
    fn default() -> Self {
        Self::new()
    }
}
