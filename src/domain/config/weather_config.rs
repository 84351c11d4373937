//! Persisted configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::error::{ConfigError, InvalidSlotError};

/// Number of favorite location slots.
pub const FAVORITE_SLOTS: u8 = 4;

/// One saved (display name, city id) pair for quick recall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteSlot {
    pub name: String,
    pub city_id: String,
}

/// Fixed-size favorites store, addressed by 1-based slot index.
///
/// Slots persist as optional named tables so an unset slot simply stays
/// absent from the config document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Favorites {
    #[serde(skip_serializing_if = "Option::is_none")]
    fav01: Option<FavoriteSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fav02: Option<FavoriteSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fav03: Option<FavoriteSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fav04: Option<FavoriteSlot>,
}

impl Favorites {
    /// Get the favorite stored in `slot` (1..=4), if any.
    pub fn get(&self, slot: u8) -> Result<Option<&FavoriteSlot>, InvalidSlotError> {
        Ok(self.slot(slot)?.as_ref())
    }

    /// Overwrite `slot` with a new favorite.
    ///
    /// Returns `false` without touching the slot when it already holds
    /// `city_id`, so callers can skip redundant persistence.
    pub fn assign(
        &mut self,
        slot: u8,
        name: impl Into<String>,
        city_id: impl Into<String>,
    ) -> Result<bool, InvalidSlotError> {
        let city_id = city_id.into();
        let entry = self.slot_mut(slot)?;
        if entry.as_ref().is_some_and(|f| f.city_id == city_id) {
            return Ok(false);
        }
        *entry = Some(FavoriteSlot {
            name: name.into(),
            city_id,
        });
        Ok(true)
    }

    fn slot(&self, slot: u8) -> Result<&Option<FavoriteSlot>, InvalidSlotError> {
        match slot {
            1 => Ok(&self.fav01),
            2 => Ok(&self.fav02),
            3 => Ok(&self.fav03),
            4 => Ok(&self.fav04),
            _ => Err(InvalidSlotError { slot }),
        }
    }

    fn slot_mut(&mut self, slot: u8) -> Result<&mut Option<FavoriteSlot>, InvalidSlotError> {
        match slot {
            1 => Ok(&mut self.fav01),
            2 => Ok(&mut self.fav02),
            3 => Ok(&mut self.fav03),
            4 => Ok(&mut self.fav04),
            _ => Err(InvalidSlotError { slot }),
        }
    }
}

/// Application configuration, persisted as a flat TOML document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Provider city id of the active location
    pub city_id: String,
    /// Display name of the active location, confirmed by the last valid fetch
    pub city: String,
    /// Provider API token
    pub api_token: String,
    /// Poll interval in seconds, must be greater than zero
    pub update_interval: u64,
    /// Whether polling starts automatically at launch
    pub auto_updating: bool,
    /// Selected override preset id (1..=7)
    pub current_override: u8,
    /// Saved favorite locations
    pub favorites: Favorites,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            city_id: String::new(),
            city: String::new(),
            api_token: String::new(),
            update_interval: 10,
            auto_updating: false,
            current_override: 1,
            favorites: Favorites::default(),
        }
    }
}

impl WeatherConfig {
    /// Check the config invariants, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval == 0 {
            return Err(ConfigError::ValidationError {
                key: "update_interval".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if super::OverrideTable::builtin()
            .get(self.current_override)
            .is_none()
        {
            return Err(ConfigError::ValidationError {
                key: "current_override".to_string(),
                message: format!("unknown preset id {}", self.current_override),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = WeatherConfig::default();
        assert!(config.city_id.is_empty());
        assert_eq!(config.update_interval, 10);
        assert!(!config.auto_updating);
        assert_eq!(config.current_override, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_interval_fails_validation() {
        let config = WeatherConfig {
            update_interval: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn unknown_preset_fails_validation() {
        let config = WeatherConfig {
            current_override: 9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_favorites_read_as_none() {
        let favorites = Favorites::default();
        for slot in 1..=FAVORITE_SLOTS {
            assert!(favorites.get(slot).unwrap().is_none());
        }
    }

    #[test]
    fn assign_overwrites_slot() {
        let mut favorites = Favorites::default();
        assert!(favorites.assign(2, "Cologne", "2886242").unwrap());
        assert!(favorites.assign(2, "Berlin", "2950159").unwrap());

        let stored = favorites.get(2).unwrap().unwrap();
        assert_eq!(stored.name, "Berlin");
        assert_eq!(stored.city_id, "2950159");
    }

    #[test]
    fn assign_same_city_id_is_refused() {
        let mut favorites = Favorites::default();
        assert!(favorites.assign(1, "Cologne", "2886242").unwrap());
        assert!(!favorites.assign(1, "Cologne Renamed", "2886242").unwrap());

        // Name is untouched by the refused assignment
        assert_eq!(favorites.get(1).unwrap().unwrap().name, "Cologne");
    }

    #[test]
    fn slot_zero_is_rejected() {
        let mut favorites = Favorites::default();
        assert!(favorites.get(0).is_err());
        assert!(favorites.assign(0, "x", "1").is_err());
        assert!(favorites.get(5).is_err());
    }

    #[test]
    fn config_toml_round_trip() {
        let mut config = WeatherConfig {
            city_id: "2886242".to_string(),
            city: "Cologne".to_string(),
            api_token: "token".to_string(),
            update_interval: 30,
            auto_updating: true,
            current_override: 3,
            ..Default::default()
        };
        config.favorites.assign(1, "Berlin", "2950159").unwrap();
        config.favorites.assign(4, "Hamburg", "2911298").unwrap();

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: WeatherConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.city_id, config.city_id);
        assert_eq!(parsed.update_interval, 30);
        assert_eq!(parsed.favorites, config.favorites);
        assert_eq!(parsed.current_override, 3);
        // Unset slots stay absent from the document
        assert!(!text.contains("fav02"));
    }
}
