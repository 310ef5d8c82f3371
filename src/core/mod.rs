pub mod config;
pub mod error;
pub mod types;

pub use config::{LayoutConfig, SectorConfig};
pub use error::{ConfigError, FlareError, GenerationError, Result};
pub use types::{Rgb, Tier, WorldId};
