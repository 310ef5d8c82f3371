//! World nodes and the edges between them

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::types::{Rgb, Tier, WorldId};
use crate::sector::characteristics::Characteristics;

/// A star system in a sector
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    /// Unique within the sector
    pub name: String,
    /// Display label; distant and far worlds carry their region
    pub label: String,
    pub region: String,
    pub tier: Tier,
    /// The world this one was generated from (None for the capital)
    pub anchor: Option<WorldId>,
    pub characteristics: Characteristics,
    /// Children per tier: very close, close, distant, far
    pub proximity_counts: [u32; 4],
    /// Whether this world's own children have been generated
    pub linked: bool,
    pub radius: f32,
    pub color: Rgb,
    /// Canvas position, assigned by the layout pass
    pub coordinates: Option<Vec2>,
}

impl World {
    /// Drawn in place on the map (capital, very close, close)
    pub fn is_visible(&self) -> bool {
        !self.tier.is_remote()
    }

    /// Total children this world's proximity roll asks for
    pub fn link_count(&self) -> u32 {
        self.proximity_counts.iter().sum()
    }
}

/// Undirected connection between two worlds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: WorldId,
    pub b: WorldId,
    /// Tier of the child end
    pub tier: Tier,
    /// Layout affinity; higher pulls the endpoints closer
    pub weight: f32,
}

impl Edge {
    pub fn new(parent: WorldId, child: WorldId, tier: Tier) -> Self {
        Self {
            a: parent,
            b: child,
            tier,
            weight: tier.edge_weight(),
        }
    }

    pub fn touches(&self, id: WorldId) -> bool {
        self.a == id || self.b == id
    }

    /// The far end of this edge as seen from `id`
    pub fn other(&self, id: WorldId) -> Option<WorldId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_endpoints() {
        let edge = Edge::new(WorldId(0), WorldId(3), Tier::Close);
        assert_eq!(edge.weight, Tier::Close.edge_weight());
        assert!(edge.touches(WorldId(0)));
        assert!(edge.touches(WorldId(3)));
        assert!(!edge.touches(WorldId(1)));
        assert_eq!(edge.other(WorldId(3)), Some(WorldId(0)));
        assert_eq!(edge.other(WorldId(0)), Some(WorldId(3)));
        assert_eq!(edge.other(WorldId(7)), None);
    }
}
