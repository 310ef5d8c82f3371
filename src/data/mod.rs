//! Externally authored generator data: region tables and the name corpus

pub mod corpus;
pub mod registry;

pub use corpus::NameCorpus;
pub use registry::{
    CharacteristicTable, RegionDef, RegionRegistry, TraitValue, CHARACTERISTIC_COUNT, MAX_COST,
    PROXIMITY,
};

use std::path::Path;

use crate::core::error::ConfigError;
use crate::sector::names::NameModel;

/// Everything a sector generator reads, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct GeneratorData {
    pub registry: RegionRegistry,
    pub corpus: NameCorpus,
}

impl GeneratorData {
    pub fn new(registry: RegionRegistry, corpus: NameCorpus) -> Result<Self, ConfigError> {
        registry.validate()?;
        NameModel::train(&corpus.planets)?;
        Ok(Self { registry, corpus })
    }

    /// Load `regions/*.toml`, `planets.txt` and `suffixes.txt` from a data directory
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigError> {
        let mut registry = RegionRegistry::new();
        registry.load_directory(&dir.join("regions"))?;
        let corpus = NameCorpus::load(&dir.join("planets.txt"), &dir.join("suffixes.txt"))?;

        tracing::info!(
            "Loaded {} regions and {} corpus entries from {}",
            registry.len(),
            corpus.planets.len(),
            dir.display()
        );

        Self::new(registry, corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::registry::tests::HUB_TOML;

    fn hub_registry() -> RegionRegistry {
        let toml_str = HUB_TOML.replace(r#"borders = ["frontier"]"#, "borders = []");
        let mut registry = RegionRegistry::new();
        registry
            .register(RegionRegistry::parse_toml(&toml_str).unwrap())
            .unwrap();
        registry
    }

    #[test]
    fn test_untrainable_corpus_rejected_at_load() {
        let corpus = NameCorpus::new(vec!["-".into(), "  ".into()], vec!["Prime".into()]);
        let result = GeneratorData::new(hub_registry(), corpus);
        assert!(matches!(result, Err(ConfigError::EmptyCorpus)));
    }

    #[test]
    fn test_trainable_corpus_accepted() {
        let corpus = NameCorpus::new(vec!["al-pha".into()], vec![]);
        let data = GeneratorData::new(hub_registry(), corpus).unwrap();
        assert_eq!(data.corpus.planets.len(), 1);
    }
}
