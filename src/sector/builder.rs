//! Sector generation
//!
//! A sector starts from one capital world and grows in tier-expansion passes
//! over an arena of worlds. Each pass visits the worlds that have not yet
//! produced children and creates, per tier, as many children as the world's
//! proximity roll asks for. Distant and far children never expand.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SectorConfig;
use crate::core::error::{ConfigError, GenerationError, Result};
use crate::core::types::{Tier, WorldId};
use crate::data::registry::RegionDef;
use crate::data::GeneratorData;
use crate::sector::characteristics;
use crate::sector::graph::Sector;
use crate::sector::layout;
use crate::sector::names::{title_case, NameModel, NameSynthesizer};
use crate::sector::world::{Edge, World};

/// Builds sectors from shared, read-only generator data
///
/// Holds no mutable state, so one generator can serve many builds; each
/// build owns its RNG and name session.
#[derive(Debug, Clone)]
pub struct SectorGenerator<'a> {
    data: &'a GeneratorData,
    config: SectorConfig,
}

impl<'a> SectorGenerator<'a> {
    pub fn new(
        data: &'a GeneratorData,
        config: SectorConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { data, config })
    }

    pub fn config(&self) -> &SectorConfig {
        &self.config
    }

    /// Generate a sector around a capital in `region` (random when None)
    ///
    /// The same seed and inputs always reproduce the same sector, layout
    /// included. Without a seed the RNG is drawn from entropy.
    pub fn generate(&self, region: Option<&str>, seed: Option<u32>) -> Result<Sector> {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(u64::from(seed)),
            None => ChaCha8Rng::from_entropy(),
        };
        self.generate_with_rng(region, seed, rng)
    }

    /// Generate with a caller-supplied RNG; `seed` is only recorded
    pub fn generate_with_rng(
        &self,
        region: Option<&str>,
        seed: Option<u32>,
        mut rng: ChaCha8Rng,
    ) -> Result<Sector> {
        let registry = &self.data.registry;
        let capital_region = match region {
            Some(name) => registry.require(name)?,
            None => {
                let names = registry.names();
                if names.is_empty() {
                    return Err(ConfigError::NoRegions.into());
                }
                registry.require(names[rng.gen_range(0..names.len())])?
            }
        };

        tracing::info!(
            "Generating sector in region {} (seed {:?})",
            capital_region.name,
            seed
        );

        let model = NameModel::train(&self.data.corpus.planets)?;
        let names = NameSynthesizer::new(
            model,
            &self.data.corpus.suffixes,
            self.config.name_retries,
        );

        let mut builder = SectorBuilder {
            data: self.data,
            config: &self.config,
            rng,
            names,
            worlds: Vec::new(),
            edges: Vec::new(),
            truncated: false,
        };

        let sector_name = builder.next_name(&capital_region.name, false)?;
        builder.names.set_sector_name(&sector_name);

        builder.spawn(None, Tier::Capital, capital_region)?;
        for pass in 0..self.config.expansion_passes {
            builder.expand(pass)?;
        }

        let SectorBuilder {
            mut rng,
            worlds,
            edges,
            truncated,
            ..
        } = builder;

        let mut sector = Sector {
            name: sector_name,
            region: capital_region.name.clone(),
            seed,
            has_distant: worlds.iter().any(|w| w.tier == Tier::Distant),
            has_far: worlds.iter().any(|w| w.tier == Tier::Far),
            worlds,
            edges,
            truncated,
            canvas: (self.config.layout.width, self.config.layout.height),
        };

        layout::apply(&mut sector, &self.config.layout, &mut rng)?;

        tracing::info!(
            "Generated sector {} with {} worlds{}",
            sector.name,
            sector.len(),
            if sector.truncated { " (capped)" } else { "" }
        );

        Ok(sector)
    }
}

/// In-progress build state; dropped if any step fails
struct SectorBuilder<'a> {
    data: &'a GeneratorData,
    config: &'a SectorConfig,
    rng: ChaCha8Rng,
    names: NameSynthesizer<'a>,
    worlds: Vec<World>,
    edges: Vec<Edge>,
    truncated: bool,
}

impl<'a> SectorBuilder<'a> {
    fn is_full(&self) -> bool {
        self.worlds.len() >= self.config.node_cap
    }

    fn next_name(&mut self, region: &str, want_suffix: bool) -> Result<String> {
        match self.names.generate(&mut self.rng, want_suffix) {
            Ok(name) => Ok(name),
            Err(GenerationError::NamesExhausted { attempts }) if self.config.name_fallback => {
                let name = self.names.designate(region);
                tracing::warn!(
                    "Name synthesis gave up after {} attempts, using designation {}",
                    attempts,
                    name
                );
                Ok(name)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Create one world, unless the sector is already at its cap
    fn spawn(
        &mut self,
        anchor: Option<WorldId>,
        tier: Tier,
        region: &RegionDef,
    ) -> Result<Option<WorldId>> {
        if self.is_full() {
            self.truncated = true;
            return Ok(None);
        }

        let id = WorldId(self.worlds.len() as u32);
        let name = self.next_name(&region.name, true)?;
        let characteristics = characteristics::roll(region, &mut self.rng)?;
        let proximity_counts = characteristics.proximity();

        let color = if tier == Tier::Capital {
            region.color
        } else {
            region.color.darken(self.rng.gen_range(0.7..=1.0))
        };

        let label = if tier.is_remote() {
            format!("{} ({})", name, title_case(&region.name))
        } else {
            name.clone()
        };

        tracing::debug!(
            "Spawned {} world {} in {} with proximity {:?}",
            tier,
            name,
            region.name,
            proximity_counts
        );

        self.worlds.push(World {
            id,
            name,
            label,
            region: region.name.clone(),
            tier,
            anchor,
            characteristics,
            proximity_counts,
            linked: tier.is_remote(),
            radius: tier.radius(),
            color,
            coordinates: None,
        });

        if let Some(parent) = anchor {
            self.edges.push(Edge::new(parent, id, tier));
        }

        Ok(Some(id))
    }

    /// One expansion pass over every world whose children are still pending
    fn expand(&mut self, pass: u32) -> Result<()> {
        let pending: Vec<WorldId> = self
            .worlds
            .iter()
            .filter(|w| !w.linked)
            .map(|w| w.id)
            .collect();

        tracing::debug!("Expansion pass {} over {} worlds", pass + 1, pending.len());

        let data = self.data;
        for parent in pending {
            let (counts, parent_region) = {
                let world = &mut self.worlds[parent.index()];
                world.linked = true;
                (world.proximity_counts, world.region.clone())
            };
            let parent_def = data.registry.require(&parent_region)?;

            for tier in Tier::EXPANSION_ORDER {
                let slot = tier.slot().unwrap_or_default();
                for _ in 0..counts[slot] {
                    if self.is_full() {
                        self.truncated = true;
                        tracing::debug!(
                            "Node cap {} reached during pass {}",
                            self.config.node_cap,
                            pass + 1
                        );
                        return Ok(());
                    }

                    let region = if tier == Tier::Far {
                        self.border_region(parent_def)?
                    } else {
                        parent_def
                    };
                    self.spawn(Some(parent), tier, region)?;
                }
            }
        }

        Ok(())
    }

    /// Random neighbouring region for a far world
    fn border_region(&mut self, region: &RegionDef) -> Result<&'a RegionDef> {
        if region.borders.is_empty() {
            return Err(GenerationError::NoBorders {
                region: region.name.clone(),
            }
            .into());
        }
        let data = self.data;
        let border = &region.borders[self.rng.gen_range(0..region.borders.len())];
        Ok(data.registry.require(border)?)
    }
}
