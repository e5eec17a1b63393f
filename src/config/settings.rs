//! Validation of fully merged settings

use std::path::Path;

use crate::error::{ModgraphError, Result, ResultExt};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if settings.base_module.trim().is_empty() {
            return Err(ModgraphError::config_error(
                "No base module given. Pass --module, set MODGRAPH_MODULE or add base_module to the config file",
            ));
        }

        if !settings.scan_path.exists() {
            return Err(ModgraphError::InvalidPath {
                path: settings.scan_path.clone(),
            });
        }

        for pattern in &settings.exclude_patterns {
            glob::Pattern::new(pattern)
                .with_context(|| format!("Invalid exclude pattern: {}", pattern))?;
        }

        if settings.max_depth == Some(0) {
            return Err(ModgraphError::config_error("Max depth must be at least 1"));
        }

        if settings.layout_engine.trim().is_empty() {
            return Err(ModgraphError::config_error("Layout engine must not be empty"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that the target's directory exists
    fn validate_output_path(path: &Path) -> Result<()> {
        if path.is_dir() {
            return Err(ModgraphError::config_error(format!(
                "Target {} is a directory",
                path.display()
            )));
        }

        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
                Err(ModgraphError::OutputDirectoryNotFound {
                    path: parent.to_path_buf(),
                })
            }
            _ => Ok(()),
        }
    }
}
