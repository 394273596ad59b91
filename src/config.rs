use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

const MAX_PER_TABLE: u8 = 25;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_problems_per_table")]
    pub problems_per_table: u8,
}

fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_problems_per_table() -> u8 {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            problems_per_table: default_problems_per_table(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("factdr")
            .join("config.toml")
    }

    /// Clamp out-of-range values from hand-edited config files.
    pub fn validate(&mut self) {
        self.problems_per_table = self.problems_per_table.clamp(1, MAX_PER_TABLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.problems_per_table, 12);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("theme = \"sunburst\"").unwrap();
        assert_eq!(config.theme, "sunburst");
        assert_eq!(config.problems_per_table, 12);
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.theme, deserialized.theme);
        assert_eq!(config.problems_per_table, deserialized.problems_per_table);
    }

    #[test]
    fn test_validate_clamps_per_table() {
        let mut config = Config::default();
        config.problems_per_table = 0;
        config.validate();
        assert_eq!(config.problems_per_table, 1);

        config.problems_per_table = 200;
        config.validate();
        assert_eq!(config.problems_per_table, 25);
    }
}
