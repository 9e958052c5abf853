//! Configuration schema definitions
//!
//! Every field has a default, so an empty file (or no file) is valid.

use aerocoord_geo::{CircleConfig, EngineConfig, ExtractConfig};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub circle: CircleConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl ConfigSchema {
    /// Engine settings drawn from the `[extract]` and `[circle]` tables
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            extract: self.extract.clone(),
            circle: self.circle.clone(),
        }
    }
}

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Output rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Emit JSON instead of text
    #[serde(default)]
    pub json: bool,

    /// Decimal places for decimal degrees
    #[serde(default = "default_decimal_places")]
    pub decimal_places: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json: false,
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_decimal_places() -> usize {
    4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let schema: ConfigSchema = toml::from_str("").unwrap();
        assert_eq!(schema, ConfigSchema::default());
        assert_eq!(schema.general.log_level, "warn");
        assert_eq!(schema.output.decimal_places, 4);
        assert!(schema.extract.validate_ranges);
        assert!(schema.circle.seed.is_none());
    }

    #[test]
    fn test_partial_tables() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [extract]
            preserve_text_order = true

            [circle]
            seed = 42

            [output]
            json = true
            "#,
        )
        .unwrap();

        assert!(schema.extract.preserve_text_order);
        assert_eq!(schema.extract.noise, ExtractConfig::default().noise);
        assert_eq!(schema.circle.seed, Some(42));
        assert!(schema.output.json);
        assert_eq!(schema.output.decimal_places, 4);

        let engine = schema.engine_config();
        assert_eq!(engine.circle.seed, Some(42));
        assert!(engine.extract.preserve_text_order);
    }

    #[test]
    fn test_custom_noise_list() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [extract]
            noise = [" ", ":"]
            "#,
        )
        .unwrap();
        assert_eq!(schema.extract.noise, vec![" ", ":"]);
    }
}
