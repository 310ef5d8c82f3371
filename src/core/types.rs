//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a world inside a sector's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub u32);

impl WorldId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Proximity of a world relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Capital,
    VeryClose,
    Close,
    Distant,
    Far,
}

impl Tier {
    /// Order in which child tiers are expanded; matches the slots of a proximity tuple
    pub const EXPANSION_ORDER: [Tier; 4] = [Tier::VeryClose, Tier::Close, Tier::Distant, Tier::Far];

    /// Slot of this tier in a proximity tuple (None for the capital)
    pub fn slot(self) -> Option<usize> {
        match self {
            Tier::Capital => None,
            Tier::VeryClose => Some(0),
            Tier::Close => Some(1),
            Tier::Distant => Some(2),
            Tier::Far => Some(3),
        }
    }

    /// Distant and far worlds are off-map pointers, not drawn in place
    pub fn is_remote(self) -> bool {
        matches!(self, Tier::Distant | Tier::Far)
    }

    /// Layout affinity of an edge leading to a world of this tier
    pub fn edge_weight(self) -> f32 {
        match self {
            Tier::Capital => 0.0,
            Tier::VeryClose => 3.0,
            Tier::Close => 2.0,
            Tier::Distant => 1.0,
            Tier::Far => 0.5,
        }
    }

    /// Drawn radius in canvas units
    pub fn radius(self) -> f32 {
        match self {
            Tier::Capital => 36.0,
            Tier::VeryClose => 24.0,
            Tier::Close => 20.0,
            Tier::Distant | Tier::Far => 12.0,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tier::Capital => "Capital",
            Tier::VeryClose => "Very Close",
            Tier::Close => "Close",
            Tier::Distant => "Distant",
            Tier::Far => "Far",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Darken color by a factor (0.0 = black, 1.0 = unchanged)
    pub fn darken(&self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_order_matches_slots() {
        for (i, tier) in Tier::EXPANSION_ORDER.iter().enumerate() {
            assert_eq!(tier.slot(), Some(i));
        }
        assert_eq!(Tier::Capital.slot(), None);
    }

    #[test]
    fn test_edge_weights_decrease_with_distance() {
        let weights: Vec<f32> = Tier::EXPANSION_ORDER.iter().map(|t| t.edge_weight()).collect();
        assert!(weights.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_rgb_hex() {
        let color = Rgb::from_hex("#4a90D9").unwrap();
        assert_eq!(color, Rgb::new(0x4a, 0x90, 0xd9));
        assert_eq!(color.to_hex(), "#4a90d9");
        assert_eq!(Rgb::from_hex("4a90d9"), Some(color));
        assert!(Rgb::from_hex("#4a90").is_none());
        assert!(Rgb::from_hex("#zz90d9").is_none());
    }

    #[test]
    fn test_darken() {
        let color = Rgb::new(200, 100, 50);
        assert_eq!(color.darken(1.0), color);
        assert_eq!(color.darken(0.5), Rgb::new(100, 50, 25));
        assert_eq!(color.darken(0.0), Rgb::new(0, 0, 0));
    }
}
