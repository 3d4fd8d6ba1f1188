//! Configuration file loading for the bot.
//!
//! A bot configuration is a small TOML file. Every key is optional; missing
//! keys fall back to the defaults below.
//!
//! ```toml
//! depth = 4
//!
//! [weights]
//! king = 12000
//! piece = 1000
//!
//! [rules]
//! king_slides = false
//! ```

use crate::eval::EvalWeights;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tafl_engine::RuleOptions;
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// The search depth must be at least one ply.
    #[error("Search depth must be at least 1")]
    ZeroDepth,
}

/// Search and evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BotConfig {
    /// Plies searched from the root. Defaults to 3.
    pub depth: u8,
    /// Evaluation weights.
    pub weights: EvalWeights,
    /// Variant refinements used for move generation and captures.
    pub rules: RuleOptions,
}

pub const DEFAULT_DEPTH: u8 = 3;

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            depth: DEFAULT_DEPTH,
            weights: EvalWeights::default(),
            rules: RuleOptions::default(),
        }
    }
}

impl BotConfig {
    /// Loads the configuration at `path`.
    ///
    /// Returns the default configuration if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parses a configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: BotConfig = toml::from_str(content)?;
        if config.depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(config)
    }

    /// Returns the default configuration path, `tafl-bot.toml` in the current
    /// working directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from("tafl-bot.toml")
    }

    /// Returns a copy searching `depth` plies.
    pub fn with_depth(self, depth: u8) -> Self {
        BotConfig { depth, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
depth = 4

[weights]
king = 8000
piece = 500
mobility = 2
king_mobility = 3

[rules]
king_slides = false
shield_wall = false
pass_through_throne = true
exit_fort = false
repetition_limit = 5
"#;
        let config = BotConfig::parse(toml_content).unwrap();
        assert_eq!(config.depth, 4);
        assert_eq!(config.weights.king, 8000);
        assert_eq!(config.weights.piece, 500);
        assert_eq!(config.weights.mobility, 2);
        assert_eq!(config.weights.king_mobility, 3);
        assert!(!config.rules.king_slides);
        assert!(!config.rules.shield_wall);
        assert!(config.rules.hostile_corners);
        assert!(config.rules.pass_through_throne);
        assert!(!config.rules.exit_fort);
        assert_eq!(config.rules.repetition_limit, 5);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = BotConfig::parse("").unwrap();
        assert_eq!(config, BotConfig::default());
        assert_eq!(config.depth, 3);
    }

    #[test]
    fn test_partial_weights() {
        let config = BotConfig::parse("[weights]\nmobility = 5\n").unwrap();
        assert_eq!(config.weights.mobility, 5);
        assert_eq!(config.weights.king, EvalWeights::default().king);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            BotConfig::parse("depth = \"deep\""),
            Err(ConfigError::ParseError(_))
        ));
        assert!(matches!(
            BotConfig::parse("depth = 0"),
            Err(ConfigError::ZeroDepth)
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = BotConfig::load(Path::new("/nonexistent/tafl-bot.toml")).unwrap();
        assert_eq!(config, BotConfig::default());
    }

    #[test]
    fn test_with_depth() {
        let config = BotConfig::default().with_depth(1);
        assert_eq!(config.depth, 1);
        assert_eq!(config.rules, RuleOptions::default());
    }
}
