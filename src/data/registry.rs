//! Region registry - characteristic tables, borders and colors per region
//!
//! Regions are authored as one TOML file each:
//!
//! ```toml
//! name = "hub"
//! color = "#4a90d9"
//! borders = ["frontier"]
//!
//! [characteristics.population]
//! 0 = "Sparse"
//! 1 = "Scattered"
//! # ... through cost 4
//!
//! [characteristics.proximity]
//! 0 = [1, 0, 0, 0]
//! # ... through cost 4
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::ConfigError;
use crate::core::types::Rgb;

/// Reserved characteristic whose value drives tier expansion
pub const PROXIMITY: &str = "proximity";

/// Characteristics per table; the point distributions are built for this arity
pub const CHARACTERISTIC_COUNT: usize = 5;

/// Highest cost a distribution can assign
pub const MAX_COST: u8 = 4;

/// A rolled characteristic value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    /// Qualitative label such as "Dense" or "Theocracy"
    Label(String),
    /// Child-world counts per tier: very close, close, distant, far
    Counts([u32; 4]),
}

impl TraitValue {
    pub fn as_counts(&self) -> Option<[u32; 4]> {
        match self {
            TraitValue::Counts(counts) => Some(*counts),
            TraitValue::Label(_) => None,
        }
    }
}

impl std::fmt::Display for TraitValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraitValue::Label(label) => f.write_str(label),
            TraitValue::Counts([a, b, c, d]) => write!(f, "{a}/{b}/{c}/{d}"),
        }
    }
}

/// Characteristic name -> value per cost (index = cost)
///
/// Names iterate in sorted order so rolls are reproducible from a seed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicTable {
    entries: BTreeMap<String, Vec<TraitValue>>,
}

impl CharacteristicTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Characteristic names in stable order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Value a characteristic takes at the given cost
    pub fn value(&self, name: &str, cost: u8) -> Option<&TraitValue> {
        self.entries.get(name).and_then(|values| values.get(cost as usize))
    }

    /// Whether `value` is one of the values `name` can take
    pub fn contains(&self, name: &str, value: &TraitValue) -> bool {
        self.entries
            .get(name)
            .map_or(false, |values| values.contains(value))
    }
}

/// One configured region (world type)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionDef {
    pub name: String,
    pub color: Rgb,
    pub borders: Vec<String>,
    pub characteristics: CharacteristicTable,
}

#[derive(Deserialize)]
struct TomlRegion {
    name: String,
    color: String,
    #[serde(default)]
    borders: Vec<String>,
    characteristics: BTreeMap<String, BTreeMap<String, TraitValue>>,
}

impl TomlRegion {
    fn into_region(self) -> Result<RegionDef, ConfigError> {
        let region = self.name;

        let color = Rgb::from_hex(&self.color).ok_or_else(|| ConfigError::InvalidColor {
            region: region.clone(),
            color: self.color.clone(),
        })?;

        if self.characteristics.len() != CHARACTERISTIC_COUNT {
            return Err(ConfigError::CharacteristicArity {
                region,
                found: self.characteristics.len(),
                expected: CHARACTERISTIC_COUNT,
            });
        }
        if !self.characteristics.contains_key(PROXIMITY) {
            return Err(ConfigError::MissingProximity { region });
        }

        let mut entries = BTreeMap::new();
        for (characteristic, by_cost) in self.characteristics {
            let mut values: Vec<Option<TraitValue>> = vec![None; MAX_COST as usize + 1];

            for (key, value) in by_cost {
                let cost = key
                    .trim()
                    .parse::<u8>()
                    .ok()
                    .filter(|cost| *cost <= MAX_COST)
                    .ok_or_else(|| ConfigError::InvalidCost {
                        region: region.clone(),
                        characteristic: characteristic.clone(),
                        key: key.clone(),
                    })?;

                let is_proximity = characteristic == PROXIMITY;
                match (&value, is_proximity) {
                    (TraitValue::Counts(_), true) | (TraitValue::Label(_), false) => {}
                    (TraitValue::Label(_), true) => {
                        return Err(ConfigError::InvalidValue {
                            region: region.clone(),
                            characteristic: characteristic.clone(),
                            reason: format!("cost {cost} must be four tier counts"),
                        })
                    }
                    (TraitValue::Counts(_), false) => {
                        return Err(ConfigError::InvalidValue {
                            region: region.clone(),
                            characteristic: characteristic.clone(),
                            reason: format!("cost {cost} must be a label"),
                        })
                    }
                }
                values[cost as usize] = Some(value);
            }

            let values = values
                .into_iter()
                .enumerate()
                .map(|(cost, value)| {
                    value.ok_or_else(|| ConfigError::MissingCost {
                        region: region.clone(),
                        characteristic: characteristic.clone(),
                        cost: cost as u8,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            entries.insert(characteristic, values);
        }

        Ok(RegionDef {
            name: region,
            color,
            borders: self.borders,
            characteristics: CharacteristicTable { entries },
        })
    }
}

/// All configured regions, keyed by name
#[derive(Debug, Clone, Default)]
pub struct RegionRegistry {
    regions: BTreeMap<String, RegionDef>,
}

impl RegionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a region; names must be unique
    pub fn register(&mut self, region: RegionDef) -> Result<(), ConfigError> {
        if self.regions.contains_key(&region.name) {
            return Err(ConfigError::DuplicateRegion(region.name));
        }
        self.regions.insert(region.name.clone(), region);
        Ok(())
    }

    /// Parse a region from a TOML string
    pub fn parse_toml(content: &str) -> Result<RegionDef, ConfigError> {
        let raw: TomlRegion = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        raw.into_region()
    }

    /// Load a region from a TOML file
    pub fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let raw: TomlRegion = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.register(raw.into_region()?)
    }

    /// Load all .toml files from a directory recursively
    pub fn load_directory(&mut self, path: &Path) -> Result<(), ConfigError> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<Result<Vec<_>, _>>()?;
        // read_dir order is platform-dependent
        entries.sort();

        for entry_path in entries {
            if entry_path.is_dir() {
                self.load_directory(&entry_path)?;
            } else if entry_path.extension().map_or(false, |ext| ext == "toml") {
                self.load_file(&entry_path)?;
            }
        }
        Ok(())
    }

    /// Check cross-region references once everything is loaded
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.regions.is_empty() {
            return Err(ConfigError::NoRegions);
        }
        for region in self.regions.values() {
            for border in &region.borders {
                if !self.regions.contains_key(border) {
                    return Err(ConfigError::UnknownBorder {
                        region: region.name.clone(),
                        border: border.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&RegionDef> {
        self.regions.get(name)
    }

    /// Look up a region or fail with `UnknownRegion`
    pub fn require(&self, name: &str) -> Result<&RegionDef, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::UnknownRegion(name.to_string()))
    }

    /// Region names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const HUB_TOML: &str = r##"
        name = "hub"
        color = "#4a90d9"
        borders = ["frontier"]

        [characteristics.population]
        0 = "Sparse"
        1 = "Scattered"
        2 = "Settled"
        3 = "Dense"
        4 = "Teeming"

        [characteristics.technology]
        0 = "Primitive"
        1 = "Industrial"
        2 = "Spacefaring"
        3 = "Advanced"
        4 = "Transcendent"

        [characteristics.government]
        0 = "Anarchy"
        1 = "Tribal"
        2 = "Council"
        3 = "Bureaucracy"
        4 = "Empire"

        [characteristics.resources]
        0 = "Barren"
        1 = "Poor"
        2 = "Modest"
        3 = "Rich"
        4 = "Abundant"

        [characteristics.proximity]
        0 = [1, 0, 0, 0]
        1 = [1, 1, 0, 0]
        2 = [1, 1, 1, 0]
        3 = [2, 1, 1, 1]
        4 = [2, 2, 1, 1]
    "##;

    #[test]
    fn test_parse_region() {
        let region = RegionRegistry::parse_toml(HUB_TOML).unwrap();
        assert_eq!(region.name, "hub");
        assert_eq!(region.color, Rgb::new(0x4a, 0x90, 0xd9));
        assert_eq!(region.borders, vec!["frontier".to_string()]);
        assert_eq!(region.characteristics.len(), CHARACTERISTIC_COUNT);
        assert_eq!(
            region.characteristics.value("population", 3),
            Some(&TraitValue::Label("Dense".into()))
        );
        assert_eq!(
            region.characteristics.value(PROXIMITY, 4),
            Some(&TraitValue::Counts([2, 2, 1, 1]))
        );
        assert!(region.characteristics.value("population", 5).is_none());
    }

    #[test]
    fn test_names_are_sorted() {
        let region = RegionRegistry::parse_toml(HUB_TOML).unwrap();
        let names: Vec<&str> = region.characteristics.names().collect();
        assert_eq!(
            names,
            vec!["government", "population", "proximity", "resources", "technology"]
        );
    }

    #[test]
    fn test_missing_cost_rejected() {
        let toml_str = HUB_TOML.replace("4 = \"Teeming\"", "");
        let err = RegionRegistry::parse_toml(&toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCost { cost: 4, .. }));
    }

    #[test]
    fn test_out_of_range_cost_rejected() {
        let toml_str = HUB_TOML.replace("4 = \"Teeming\"", "5 = \"Teeming\"");
        let err = RegionRegistry::parse_toml(&toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCost { .. }));
    }

    #[test]
    fn test_label_proximity_rejected() {
        let toml_str = HUB_TOML.replace("4 = [2, 2, 1, 1]", "4 = \"Lots\"");
        let err = RegionRegistry::parse_toml(&toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_wrong_arity_rejected() {
        let toml_str = format!("{HUB_TOML}\n[characteristics.culture]\n0 = \"x\"\n");
        let err = RegionRegistry::parse_toml(&toml_str).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::CharacteristicArity { found: 6, expected: 5, .. }
        ));
    }

    #[test]
    fn test_bad_color_rejected() {
        let toml_str = HUB_TOML.replace("#4a90d9", "blue");
        let err = RegionRegistry::parse_toml(&toml_str).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { .. }));
    }

    #[test]
    fn test_validate_unknown_border() {
        let mut registry = RegionRegistry::new();
        registry
            .register(RegionRegistry::parse_toml(HUB_TOML).unwrap())
            .unwrap();
        let err = registry.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBorder { .. }));
    }

    #[test]
    fn test_duplicate_region_rejected() {
        let mut registry = RegionRegistry::new();
        let hub = RegionRegistry::parse_toml(HUB_TOML).unwrap();
        registry.register(hub.clone()).unwrap();
        assert!(matches!(
            registry.register(hub),
            Err(ConfigError::DuplicateRegion(_))
        ));
    }

    #[test]
    fn test_empty_registry_invalid() {
        assert!(matches!(
            RegionRegistry::new().validate(),
            Err(ConfigError::NoRegions)
        ));
    }
}
