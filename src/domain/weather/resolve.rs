//! Override resolution

use crate::domain::config::OverrideTable;

use super::WeatherSnapshot;

/// The (weather condition id, cloud coverage) pair that reaches downstream
/// consumers after override resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveWeather {
    pub weather_id: i64,
    pub cloud_coverage: u8,
}

/// Resolve the effective weather values.
///
/// Pure function of its inputs: when `overridden` is set the selected preset
/// row wins, otherwise the snapshot values pass through unchanged. Callers
/// validate `selected` before storing it; an id missing from the table falls
/// back to the live values.
pub fn resolve_effective(
    overridden: bool,
    selected: u8,
    table: &OverrideTable,
    snapshot: &WeatherSnapshot,
) -> EffectiveWeather {
    if overridden {
        if let Some(preset) = table.get(selected) {
            return EffectiveWeather {
                weather_id: preset.weather_id,
                cloud_coverage: preset.cloud_coverage,
            };
        }
    }
    EffectiveWeather {
        weather_id: snapshot.weather_id,
        cloud_coverage: snapshot.cloud_coverage,
    }
}
