//! Configuration file and environment handling

use std::path::{Path, PathBuf};

use super::{parser, ConfigSource};
use crate::error::{ModgraphError, Result};
use crate::models::config::PartialSettings;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = ".modgraph.toml";

/// Prefix of the environment variables read by [`EnvConfig`]
pub const ENV_PREFIX: &str = "MODGRAPH";

/// Configuration file source
pub struct FileConfig {
    path: PathBuf,
    name: String,
}

impl FileConfig {
    /// Create a new file configuration source with the default path
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CONFIG_FILE),
            name: "default config file".to_string(),
        }
    }

    /// Create a new file configuration source with a custom path
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            name: format!("config file ({})", path.as_ref().display()),
        }
    }

    /// Get the path of this configuration file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create a default configuration file at this location
    pub fn create_default(&self) -> Result<()> {
        parser::create_default_config(&self.path)
    }
}

impl ConfigSource for FileConfig {
    fn load(&self) -> Result<PartialSettings> {
        if !self.is_available() {
            return Err(ModgraphError::ConfigNotFound {
                path: self.path.clone(),
            });
        }

        parser::parse_config_file(&self.path)
    }

    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Environment variable configuration source
///
/// Reads `<PREFIX>_ROOT`, `_MODULE`, `_TARGET`, `_FORMAT`, `_EXCLUDE`
/// (comma separated), `_ENGINE` and `_MATCH_MODE`.
pub struct EnvConfig {
    prefix: String,
    name: String,
}

const ENV_KEYS: [&str; 7] = [
    "ROOT",
    "MODULE",
    "TARGET",
    "FORMAT",
    "EXCLUDE",
    "ENGINE",
    "MATCH_MODE",
];

impl EnvConfig {
    /// Create a new environment variable configuration source
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            name: format!("{} environment variables", &prefix),
            prefix,
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}_{}", self.prefix, key))
            .ok()
            .filter(|value| !value.is_empty())
    }
}

impl ConfigSource for EnvConfig {
    fn load(&self) -> Result<PartialSettings> {
        let mut settings = PartialSettings::default();

        if let Some(root) = self.var("ROOT") {
            settings.scan_path = Some(PathBuf::from(root));
        }

        if let Some(module) = self.var("MODULE") {
            settings.base_module = Some(module);
        }

        if let Some(target) = self.var("TARGET") {
            settings.output_file = Some(PathBuf::from(target));
        }

        if let Some(format) = self.var("FORMAT") {
            let output_format = format
                .parse()
                .map_err(|_| ModgraphError::InvalidOutputFormat { format })?;
            settings.output_format = Some(output_format);
        }

        if let Some(exclude) = self.var("EXCLUDE") {
            settings.exclude_patterns = Some(
                exclude
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            );
        }

        if let Some(engine) = self.var("ENGINE") {
            settings.layout_engine = Some(engine);
        }

        if let Some(mode) = self.var("MATCH_MODE") {
            let match_mode = mode
                .parse()
                .map_err(|message: String| ModgraphError::config_error(message))?;
            settings.match_mode = Some(match_mode);
        }

        Ok(settings)
    }

    fn is_available(&self) -> bool {
        ENV_KEYS.iter().any(|key| self.var(key).is_some())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
