//! Markov name synthesis
//!
//! A bigram model over syllables. Training splits each corpus entry on `-`
//! and counts which syllable follows which; one extra column counts how often
//! a syllable ends a word. Generation walks the model from a random start.
//!
//! The walk only follows transitions observed *exactly once*. Higher counts
//! are treated as if absent, which makes common pairs unreachable. Existing
//! sectors depend on that behaviour, so weighted sampling is deliberately not
//! used here.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::{ConfigError, GenerationError};

const DELIMITER: char = '-';

/// Trained bigram model; read-only after construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameModel {
    syllables: Vec<String>,
    /// `(S + 1) x (S + 1)` counts; index `S` is the end-of-word marker
    transitions: Vec<Vec<u32>>,
    /// Syllables with at least one count-1 continuation
    starts: Vec<usize>,
}

impl NameModel {
    /// Build the model from hyphen-delimited sample names
    pub fn train<S: AsRef<str>>(corpus: &[S]) -> Result<Self, ConfigError> {
        let tokens: Vec<Vec<String>> = corpus
            .iter()
            .map(|entry| {
                entry
                    .as_ref()
                    .split(DELIMITER)
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|token| !token.is_empty())
            .collect();

        // Vocabulary in first-seen order
        let mut syllables: Vec<String> = Vec::new();
        for token in &tokens {
            for syllable in token {
                if !syllables.contains(syllable) {
                    syllables.push(syllable.clone());
                }
            }
        }
        if syllables.is_empty() {
            return Err(ConfigError::EmptyCorpus);
        }

        let size = syllables.len() + 1;
        let end = size - 1;
        let mut transitions = vec![vec![0u32; size]; size];
        let index = |s: &String| syllables.iter().position(|x| x == s).unwrap_or(end);

        for token in &tokens {
            for pair in token.windows(2) {
                transitions[index(&pair[0])][index(&pair[1])] += 1;
            }
            if let Some(last) = token.last() {
                transitions[index(last)][end] += 1;
            }
        }

        let starts = (0..syllables.len())
            .filter(|&i| transitions[i].iter().any(|&count| count == 1))
            .collect();

        Ok(Self {
            syllables,
            transitions,
            starts,
        })
    }

    pub fn syllables(&self) -> &[String] {
        &self.syllables
    }

    /// Index of the end-of-word marker
    pub fn end_marker(&self) -> usize {
        self.syllables.len()
    }

    /// Observed count of `to` following `from`
    pub fn count(&self, from: usize, to: usize) -> u32 {
        self.transitions
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .unwrap_or(0)
    }

    /// Sum of a row: how many continuations (end marker included) were observed
    pub fn row_total(&self, from: usize) -> u32 {
        self.transitions.get(from).map_or(0, |row| row.iter().sum())
    }

    /// Syllables a walk may begin from
    pub fn starts(&self) -> &[usize] {
        &self.starts
    }

    /// First column whose count is exactly 1
    pub fn next_unique(&self, from: usize) -> Option<usize> {
        self.transitions
            .get(from)
            .and_then(|row| row.iter().position(|&count| count == 1))
    }

    /// One walk attempt: 2 or 3 syllable indices, or None on a dead end
    ///
    /// The walk begins at a random syllable from [`starts`](Self::starts). A
    /// syllable is only appended when its own row has a count-1 entry, and
    /// the walk moves to the first such entry. Reaching the end marker before
    /// the target length abandons the attempt.
    pub fn walk(&self, rng: &mut ChaCha8Rng) -> Option<Vec<usize>> {
        let length = rng.gen_range(2..=3);
        let mut current = *self.starts.choose(rng)?;
        let mut path = Vec::with_capacity(length);

        loop {
            let next = self.next_unique(current)?;
            path.push(current);
            if path.len() == length {
                return Some(path);
            }
            if next == self.end_marker() {
                return None;
            }
            current = next;
        }
    }

    /// Concatenate and title-case a walk
    pub fn compose(&self, path: &[usize]) -> String {
        let joined: String = path
            .iter()
            .filter_map(|&i| self.syllables.get(i))
            .map(String::as_str)
            .collect();
        title_case(&joined)
    }
}

/// Uppercase the first letter of every alphabetic run, lowercase the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

/// Per-sector name session: a model plus every name already handed out
#[derive(Debug, Clone)]
pub struct NameSynthesizer<'a> {
    model: NameModel,
    suffixes: &'a [String],
    /// Lowercased names produced so far
    produced: AHashSet<String>,
    /// Lowercased sector name, once chosen
    sector_name: Option<String>,
    retries: u32,
    designations: u32,
}

impl<'a> NameSynthesizer<'a> {
    pub fn new(model: NameModel, suffixes: &'a [String], retries: u32) -> Self {
        Self {
            model,
            suffixes,
            produced: AHashSet::new(),
            sector_name: None,
            retries: retries.max(1),
            designations: 0,
        }
    }

    pub fn model(&self) -> &NameModel {
        &self.model
    }

    /// Names must not collide with the sector's own name from now on
    pub fn set_sector_name(&mut self, name: &str) {
        let lower = name.to_lowercase();
        self.produced.insert(lower.clone());
        self.sector_name = Some(lower);
    }

    /// Whether a candidate repeats a produced name or overlaps the sector name
    pub fn is_excluded(&self, candidate: &str) -> bool {
        let lower = candidate.to_lowercase();
        if self.produced.contains(&lower) {
            return true;
        }
        self.sector_name
            .as_deref()
            .map_or(false, |sector| lower.contains(sector) || sector.contains(lower.as_str()))
    }

    /// Synthesize a fresh name, optionally with a random suffix
    pub fn generate(
        &mut self,
        rng: &mut ChaCha8Rng,
        want_suffix: bool,
    ) -> Result<String, GenerationError> {
        if self.model.starts().is_empty() {
            return Err(GenerationError::NamesExhausted { attempts: 0 });
        }
        for _ in 0..self.retries {
            let Some(path) = self.model.walk(rng) else {
                continue;
            };
            let mut name = self.model.compose(&path);

            if want_suffix && !self.suffixes.is_empty() {
                let suffix = &self.suffixes[rng.gen_range(0..self.suffixes.len())];
                name.push(' ');
                name.push_str(suffix);
            }
            let name = name.trim_end().to_string();

            if self.is_excluded(&name) {
                continue;
            }
            self.produced.insert(name.to_lowercase());
            return Ok(name);
        }

        Err(GenerationError::NamesExhausted {
            attempts: self.retries,
        })
    }

    /// Catalogue designation such as `HUB-003`, unique within the session
    pub fn designate(&mut self, region: &str) -> String {
        let code: String = region
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .collect();
        let code = if code.is_empty() { "SEC".to_string() } else { code };

        loop {
            self.designations += 1;
            let name = format!("{}-{:03}", code, self.designations);
            if !self.is_excluded(&name) {
                self.produced.insert(name.to_lowercase());
                return name;
            }
        }
    }
}
