//! Sector output for renderers and readers

use serde::{Deserialize, Serialize};

use crate::core::types::{Tier, WorldId};
use crate::sector::graph::Sector;
use crate::sector::names::title_case;
use crate::sector::world::World;

const RULE: &str = "---------------------------";

/// Serializable view of a sector, shaped for a map renderer
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SectorSnapshot {
    pub name: String,
    pub region: String,
    pub seed: Option<u32>,
    pub has_distant: bool,
    pub has_far: bool,
    pub truncated: bool,
    pub canvas: CanvasSize,
    pub worlds: Vec<WorldSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub id: u32,
    pub name: String,
    pub label: String,
    pub region: String,
    pub tier: Tier,
    pub visible: bool,
    /// Readable characteristics, proximity excluded
    pub characteristics: Vec<(String, String)>,
    pub radius: f32,
    /// `#rrggbb`
    pub color: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub from: u32,
    pub to: u32,
    pub tier: Tier,
    pub weight: f32,
}

impl SectorSnapshot {
    pub fn new(sector: &Sector) -> Self {
        let (width, height) = sector.canvas();
        Self {
            name: sector.name().to_string(),
            region: sector.region().to_string(),
            seed: sector.seed(),
            has_distant: sector.has_distant(),
            has_far: sector.has_far(),
            truncated: sector.truncated(),
            canvas: CanvasSize { width, height },
            worlds: sector.worlds().iter().map(WorldSnapshot::new).collect(),
            edges: sector
                .edges()
                .iter()
                .map(|e| EdgeSnapshot {
                    from: e.a.0,
                    to: e.b.0,
                    tier: e.tier,
                    weight: e.weight,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl WorldSnapshot {
    fn new(world: &World) -> Self {
        let position = world.coordinates.unwrap_or_default();
        Self {
            id: world.id.0,
            name: world.name.clone(),
            label: world.label.clone(),
            region: world.region.clone(),
            tier: world.tier,
            visible: world.is_visible(),
            characteristics: world
                .characteristics
                .listing()
                .map(|(name, value)| (title_case(name), value.to_string()))
                .collect(),
            radius: world.radius,
            color: world.color.to_hex(),
            x: position.x,
            y: position.y,
        }
    }
}

fn push_characteristics(out: &mut String, world: &World) {
    for (name, value) in world.characteristics.listing() {
        out.push_str(&format!("{} - {}\n", title_case(name), value));
    }
}

impl Sector {
    /// Plain-text description: the capital, then every other world by tier
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let capital = self.capital();

        out.push_str(&format!("Zone Name: {}\n", self.name()));
        out.push_str(&format!("{}\n", capital.name));
        out.push_str(&format!(
            "Generated World - {} {}\n",
            title_case(&capital.region),
            RULE
        ));
        push_characteristics(&mut out, capital);
        out.push_str(&format!(
            "Total Links: {}\n",
            self.edges_of(WorldId(0)).count()
        ));

        for tier in Tier::EXPANSION_ORDER {
            let mut worlds = self.by_tier(tier).peekable();
            if worlds.peek().is_none() {
                continue;
            }
            out.push_str(&format!("\n== {} ==\n", tier));
            for world in worlds {
                out.push_str(&format!("{}\n", world.label));
                out.push_str(&format!(
                    "Linked World - {} {}\n",
                    title_case(&world.region),
                    RULE
                ));
                push_characteristics(&mut out, world);
                out.push('\n');
            }
        }

        out
    }

    pub fn snapshot(&self) -> SectorSnapshot {
        SectorSnapshot::new(self)
    }
}
