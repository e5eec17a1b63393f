//! Configuration file parsing utilities

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::file::DEFAULT_CONFIG_FILE;
use crate::error::{ModgraphError, Result};
use crate::models::config::PartialSettings;

/// Parse a TOML configuration file into PartialSettings
pub fn parse_config_file<P: AsRef<Path>>(path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ModgraphError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ModgraphError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_config_content(&content, path)
}

/// Parse TOML configuration content into PartialSettings
pub fn parse_config_content<P: AsRef<Path>>(content: &str, path: P) -> Result<PartialSettings> {
    let path = path.as_ref();

    let settings: PartialSettings = toml::from_str(content).map_err(|e| ModgraphError::ConfigParse {
        path: path.to_path_buf(),
        source: e,
    })?;

    validate_partial_settings(&settings, path)?;

    Ok(settings)
}

/// Validate partial settings for obvious errors
pub fn validate_partial_settings<P: AsRef<Path>>(settings: &PartialSettings, path: P) -> Result<()> {
    let path = path.as_ref();
    let invalid = |what: String| ModgraphError::Config {
        message: format!("{} in config file: {}", what, path.display()),
    };

    if let Some(scan_path) = &settings.scan_path {
        if scan_path.as_os_str().is_empty() {
            return Err(invalid("Invalid empty scan_path".to_string()));
        }
    }

    if let Some(base_module) = &settings.base_module {
        if base_module.trim().is_empty() {
            return Err(invalid("Invalid empty base_module".to_string()));
        }
    }

    if let Some(patterns) = &settings.exclude_patterns {
        for pattern in patterns {
            if pattern.is_empty() {
                return Err(invalid("Empty exclude pattern".to_string()));
            }

            glob::Pattern::new(pattern)
                .map_err(|e| invalid(format!("Invalid exclude pattern '{}' ({})", pattern, e)))?;
        }
    }

    if settings.max_depth == Some(0) {
        return Err(invalid("Invalid max_depth 0 (must be at least 1)".to_string()));
    }

    if let Some(output_file) = &settings.output_file {
        if output_file.as_os_str().is_empty() {
            return Err(invalid("Invalid empty output_file".to_string()));
        }
    }

    if let Some(engine) = &settings.layout_engine {
        if engine.trim().is_empty() {
            return Err(invalid("Invalid empty layout_engine".to_string()));
        }
    }

    Ok(())
}

/// Candidate locations for the default configuration file, in lookup order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(DEFAULT_CONFIG_FILE));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("modgraph").join("config.toml"));
    }

    paths
}

/// Find and load configuration from the first default location that exists
pub fn find_default_config() -> Result<Option<PartialSettings>> {
    for path in default_config_paths() {
        if path.is_file() {
            debug!(path = %path.display(), "using default configuration file");
            return parse_config_file(&path).map(Some);
        }
    }

    Ok(None)
}

/// Create a default configuration file at the specified path
pub fn create_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(ModgraphError::io_error)?;
        }
    }

    let default_config = include_str!("default_config.toml");

    fs::write(path, default_config).map_err(|e| ModgraphError::OutputWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
