//! Configuration value objects

mod overrides;
mod weather_config;

pub use overrides::{OverridePreset, OverrideTable};
pub use weather_config::{FavoriteSlot, Favorites, WeatherConfig, FAVORITE_SLOTS};
