//! Sector - the finished graph of worlds

use serde::{Deserialize, Serialize};

use crate::core::types::{Tier, WorldId};
use crate::sector::world::{Edge, World};

/// A generated sector. Built in one pass by `SectorGenerator`, then read-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sector {
    pub(crate) name: String,
    pub(crate) region: String,
    pub(crate) seed: Option<u32>,
    pub(crate) worlds: Vec<World>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) has_distant: bool,
    pub(crate) has_far: bool,
    pub(crate) truncated: bool,
    pub(crate) canvas: (f32, f32),
}

impl Sector {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Region of the capital
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn seed(&self) -> Option<u32> {
        self.seed
    }

    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    pub fn has_distant(&self) -> bool {
        self.has_distant
    }

    pub fn has_far(&self) -> bool {
        self.has_far
    }

    /// Whether the node cap cut expansion short
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Canvas size the coordinates were laid out on
    pub fn canvas(&self) -> (f32, f32) {
        self.canvas
    }

    pub fn world(&self, id: WorldId) -> Option<&World> {
        self.worlds.get(id.index())
    }

    pub fn capital(&self) -> &World {
        // Sectors are never built without a capital
        &self.worlds[0]
    }

    pub fn edges_of(&self, id: WorldId) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    pub fn neighbors(&self, id: WorldId) -> Vec<WorldId> {
        self.edges_of(id).filter_map(|e| e.other(id)).collect()
    }

    pub fn by_tier(&self, tier: Tier) -> impl Iterator<Item = &World> {
        self.worlds.iter().filter(move |w| w.tier == tier)
    }

    /// Worlds drawn in place: capital, very close and close
    pub fn visible_worlds(&self) -> impl Iterator<Item = &World> {
        self.worlds.iter().filter(|w| w.is_visible())
    }

    /// Distant and far worlds, drawn as pointers at the canvas edge
    pub fn remote_worlds(&self) -> impl Iterator<Item = &World> {
        self.worlds.iter().filter(|w| !w.is_visible())
    }

    pub fn find(&self, name: &str) -> Option<&World> {
        self.worlds.iter().find(|w| w.name == name)
    }
}
