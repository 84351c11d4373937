//! Operator override presets

use crate::domain::error::InvalidPresetError;

/// One synthetic (weather condition id, cloud coverage) pair an operator can
/// substitute for live data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverridePreset {
    pub label: &'static str,
    /// Provider weather condition id
    pub weather_id: i64,
    /// Cloud coverage percent
    pub cloud_coverage: u8,
}

// Preset ids are 1-based; id 0 is never exposed.
const PRESETS: [OverridePreset; 7] = [
    OverridePreset {
        label: "Clear Sky",
        weather_id: 800,
        cloud_coverage: 0,
    },
    OverridePreset {
        label: "Few Clouds",
        weather_id: 801,
        cloud_coverage: 20,
    },
    OverridePreset {
        label: "Scattered Clouds",
        weather_id: 802,
        cloud_coverage: 45,
    },
    OverridePreset {
        label: "Overcast",
        weather_id: 804,
        cloud_coverage: 95,
    },
    OverridePreset {
        label: "Rain",
        weather_id: 501,
        cloud_coverage: 90,
    },
    OverridePreset {
        label: "Thunderstorm",
        weather_id: 211,
        cloud_coverage: 100,
    },
    OverridePreset {
        label: "Snow",
        weather_id: 601,
        cloud_coverage: 90,
    },
];

/// Ordered preset table, read-only at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideTable {
    presets: &'static [OverridePreset],
}

impl OverrideTable {
    /// The compiled-in preset table.
    pub fn builtin() -> Self {
        Self { presets: &PRESETS }
    }

    /// Look up a preset by its 1-based id.
    pub fn get(&self, id: u8) -> Option<&OverridePreset> {
        (id >= 1)
            .then(|| self.presets.get((id - 1) as usize))
            .flatten()
    }

    /// Validate a preset id without fetching the row.
    pub fn validate(&self, id: u8) -> Result<(), InvalidPresetError> {
        match self.get(id) {
            Some(_) => Ok(()),
            None => Err(InvalidPresetError { preset: id }),
        }
    }

    /// Ordered (id, label) pairs for client display.
    pub fn labels(&self) -> Vec<(u8, &'static str)> {
        self.presets
            .iter()
            .enumerate()
            .map(|(i, p)| (i as u8 + 1, p.label))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

impl Default for OverrideTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_seven_presets() {
        assert_eq!(OverrideTable::builtin().len(), 7);
    }

    #[test]
    fn lookup_is_one_based() {
        let table = OverrideTable::builtin();
        assert_eq!(table.get(1).unwrap().weather_id, 800);
        assert_eq!(table.get(7).unwrap().label, "Snow");
        assert!(table.get(0).is_none());
        assert!(table.get(8).is_none());
    }

    #[test]
    fn validate_matches_lookup() {
        let table = OverrideTable::builtin();
        for id in 1..=7u8 {
            assert!(table.validate(id).is_ok());
        }
        assert!(table.validate(0).is_err());
        assert!(table.validate(8).is_err());
    }

    #[test]
    fn labels_are_ordered() {
        let labels = OverrideTable::builtin().labels();
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], (1, "Clear Sky"));
        assert_eq!(labels[6].0, 7);
    }
}
