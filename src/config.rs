use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding records.json and profile.json
    pub data_dir: String,
    /// Rows per table page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,
    /// Message shown when a category has no records
    #[serde(default = "default_empty_message")]
    pub empty_message: String,
}

fn default_items_per_page() -> usize {
    10
}

fn default_empty_message() -> String {
    "No records found".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = Self::config_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string());
        Self {
            data_dir,
            items_per_page: default_items_per_page(),
            empty_message: default_empty_message(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".fims-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.items_per_page, 10);
        assert_eq!(config.empty_message, "No records found");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_dir": "/tmp/fims"}"#).unwrap();
        assert_eq!(config.data_dir, "/tmp/fims");
        assert_eq!(config.items_per_page, 10);
        assert_eq!(config.empty_message, "No records found");
    }
}
