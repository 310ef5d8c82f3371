//! Sector generation
//!
//! Names, characteristic rolls, graph growth and layout for one sector.

pub mod builder;
pub mod characteristics;
pub mod graph;
pub mod layout;
pub mod names;
pub mod output;
pub mod world;

pub use builder::SectorGenerator;
pub use characteristics::{roll, Characteristics, DISTRIBUTIONS};
pub use graph::Sector;
pub use names::{NameModel, NameSynthesizer};
pub use output::SectorSnapshot;
pub use world::{Edge, World};
