//! File-backed config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::WeatherConfig;
use crate::domain::error::ConfigError;

/// XDG-compliant TOML config store
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    /// Create a config store at the default XDG location
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("weather-control");

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Create with a custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<WeatherConfig, ConfigError> {
        let config: WeatherConfig =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn to_toml(config: &WeatherConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn load(&self) -> Result<WeatherConfig, ConfigError> {
        if !self.exists() {
            return Ok(WeatherConfig::default());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &WeatherConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&WeatherConfig::default()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_is_xdg() {
        let store = FileConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("weather-control"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn custom_path() {
        let store = FileConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(store.path(), PathBuf::from("/custom/path/config.toml"));
    }

    #[test]
    fn parse_toml_flat_format() {
        let content = r#"
city_id = "2886242"
city = "Cologne"
api_token = "token"
update_interval = 30
auto_updating = true
current_override = 2
"#;

        let config = FileConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.city_id, "2886242");
        assert_eq!(config.update_interval, 30);
        assert!(config.auto_updating);
        assert_eq!(config.current_override, 2);
    }

    #[test]
    fn parse_rejects_zero_interval() {
        let content = r#"
city_id = "2886242"
update_interval = 0
"#;
        assert!(matches!(
            FileConfigStore::parse_toml(content),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn to_toml_round_trip() {
        let mut config = WeatherConfig {
            city_id: "2886242".to_string(),
            city: "Cologne".to_string(),
            api_token: "token".to_string(),
            update_interval: 15,
            ..Default::default()
        };
        config.favorites.assign(3, "Berlin", "2950159").unwrap();

        let text = FileConfigStore::to_toml(&config).unwrap();
        let parsed = FileConfigStore::parse_toml(&text).unwrap();

        assert_eq!(parsed.city_id, config.city_id);
        assert_eq!(parsed.update_interval, 15);
        assert_eq!(parsed.favorites, config.favorites);
    }
}
