//! Configuration file loading

use super::schema::ConfigSchema;
use crate::error::{Error, ErrorCode, Result};
use std::path::Path;

/// Files searched, in order, when no path is given
const CANDIDATES: [&str; 3] = [".aerocoord.toml", "aerocoord.toml", ".config/aerocoord.toml"];

/// Configuration wrapper
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub schema: ConfigSchema,
    pub path: Option<String>,
}

impl Config {
    /// Load configuration from a file path or the standard locations,
    /// falling back to defaults when none exists.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !Path::new(p).exists() => return Err(Error::config_not_found(p)),
            Some(p) => Some(p.to_string()),
            None => find_config_file(),
        };

        let schema = match config_path {
            Some(ref p) => load_config_file(p)?,
            None => ConfigSchema::default(),
        };

        Ok(Self {
            schema,
            path: config_path,
        })
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<String> {
    CANDIDATES
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML configuration file
fn load_config_file(path: &str) -> Result<ConfigSchema> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::config(format!("Failed to read config file {}: {}", path, e)).with_source(e)
    })?;

    toml::from_str(&content).map_err(|e| {
        Error::new(
            ErrorCode::ConfigParseError,
            format!("Failed to parse config file {}: {}", path, e),
        )
        .with_source(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.path.is_none());
        assert_eq!(config.schema.output.decimal_places, 4);
    }

    #[test]
    fn test_config_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[circle]\nseed = 7\n[general]\nlog_level = \"debug\"").unwrap();

        let path = file.path().to_str().unwrap();
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.path.as_deref(), Some(path));
        assert_eq!(config.schema.circle.seed, Some(7));
        assert_eq!(config.schema.general.log_level, "debug");
    }

    #[test]
    fn test_config_load_missing_explicit_file() {
        let err = Config::load(Some("/definitely/not/here.toml")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigNotFound);
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ndecimal_places = \"four\"").unwrap();

        let err = Config::load(Some(file.path().to_str().unwrap())).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigParseError);
    }
}
