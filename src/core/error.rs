use thiserror::Error;

/// Problems with region tables, corpus data or sector configuration.
///
/// Always raised before generation starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No regions configured")]
    NoRegions,

    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    #[error("Duplicate region: {0}")]
    DuplicateRegion(String),

    #[error("Region {region} borders unknown region {border}")]
    UnknownBorder { region: String, border: String },

    #[error("Region {region} has {found} characteristics, expected {expected}")]
    CharacteristicArity {
        region: String,
        found: usize,
        expected: usize,
    },

    #[error("Region {region} has no proximity characteristic")]
    MissingProximity { region: String },

    #[error("Region {region}, characteristic {characteristic}: invalid cost key {key:?}")]
    InvalidCost {
        region: String,
        characteristic: String,
        key: String,
    },

    #[error("Region {region}, characteristic {characteristic}: missing cost {cost}")]
    MissingCost {
        region: String,
        characteristic: String,
        cost: u8,
    },

    #[error("Region {region}, characteristic {characteristic}: {reason}")]
    InvalidValue {
        region: String,
        characteristic: String,
        reason: String,
    },

    #[error("Region {region}: invalid color {color:?}")]
    InvalidColor { region: String, color: String },

    #[error("Name corpus contains no syllables")]
    EmptyCorpus,

    #[error("Invalid sector config: {0}")]
    InvalidConfig(String),

    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while a sector is being built. The sector is discarded.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Name synthesis exhausted {attempts} attempts")]
    NamesExhausted { attempts: u32 },

    #[error("Region {region} has no borders for a far world")]
    NoBorders { region: String },

    #[error("Layout failed: {0}")]
    Layout(String),
}

#[derive(Error, Debug)]
pub enum FlareError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlareError>;
