use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::StateFile;

/// Errors that can occur when loading a state file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read state file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse state file '{path}': {source}")]
    TomlError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse state file '{path}': {source}")]
    JsonError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported state file '{path}': expected a .toml or .json extension")]
    UnsupportedFormat { path: PathBuf },

    #[error("State file validation failed: {message}")]
    ValidationError { message: String },
}

/// Syntax of a state file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(FileFormat::Toml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

impl StateFile {
    /// Loads and validates the state file at `path`.
    ///
    /// - The format is chosen by extension (`.toml` or `.json`).
    /// - Returns an error if reading, parsing, or validation fails.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = FileFormat::from_path(path)?;

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file = Self::parse(&content, format, path)?;
        tracing::debug!(path = %path.display(), slices = file.state.len(), "loaded state file");
        Ok(file)
    }

    /// Parses and validates `content`; `path` is only used in errors.
    pub fn parse(content: &str, format: FileFormat, path: &Path) -> Result<Self, ConfigError> {
        let file: StateFile = match format {
            FileFormat::Toml => toml::from_str(content).map_err(|e| ConfigError::TomlError {
                path: path.to_path_buf(),
                source: e,
            })?,
            FileFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::JsonError {
                    path: path.to_path_buf(),
                    source: e,
                })?
            }
        };

        file.validate()?;
        Ok(file)
    }

    /// Validates the state file.
    ///
    /// Checks:
    /// - At least one slice is declared
    /// - Every excluded slice is declared in `state`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.state.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one slice must be declared in [state]".to_string(),
            });
        }

        if let Some(missing) = self
            .exclude
            .iter()
            .find(|name| !self.state.contains_key(name.as_str()))
        {
            return Err(ConfigError::ValidationError {
                message: format!("Excluded slice '{}' is not declared in [state]", missing),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.toml")).unwrap(), FileFormat::Toml);
        assert_eq!(FileFormat::from_path(Path::new("a.JSON")).unwrap(), FileFormat::Json);
        assert!(matches!(
            FileFormat::from_path(Path::new("a.yaml")),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn toml_keeps_file_order() {
        let content = "[state]\nzebra = 1\napple = 2\nmango = 3\n";
        let file = StateFile::parse(content, FileFormat::Toml, Path::new("s.toml")).unwrap();
        let keys: Vec<_> = file.state.keys().cloned().collect();
        assert_eq!(keys, vec!["zebra", "apple", "mango"]);
    }
}
