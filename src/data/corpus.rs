//! Planet-name corpus and suffix list

use std::path::Path;

/// Training data for the name synthesizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameCorpus {
    /// Hyphen-delimited sample names, e.g. `al-de-ba-ran`
    pub planets: Vec<String>,
    /// Optional name suffixes; blank entries mean "no suffix"
    pub suffixes: Vec<String>,
}

impl NameCorpus {
    pub fn new(planets: Vec<String>, suffixes: Vec<String>) -> Self {
        Self { planets, suffixes }
    }

    /// Build from the contents of a planets file and a suffixes file
    pub fn parse(planets: &str, suffixes: &str) -> Self {
        Self {
            planets: planets
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string)
                .collect(),
            // Blank lines are meaningful here
            suffixes: suffixes.lines().map(|line| line.trim().to_string()).collect(),
        }
    }

    pub fn load(planets_path: &Path, suffixes_path: &Path) -> std::io::Result<Self> {
        let planets = std::fs::read_to_string(planets_path)?;
        let suffixes = std::fs::read_to_string(suffixes_path)?;
        Ok(Self::parse(&planets, &suffixes))
    }
}
