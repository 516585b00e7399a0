//! Log level definitions and the level registry
//!
//! Levels are data rather than an enum: the built-in set is registered when a
//! [`LevelRegistry`] is created and applications may add their own levels at
//! runtime. Filtering only ever compares ranks.

use super::error::{LoggerError, Result};
use colored::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TRACE: &str = "TRACE";
pub const DEBUG: &str = "DEBUG";
pub const INFO: &str = "INFO";
pub const SUCCESS: &str = "SUCCESS";
pub const WARNING: &str = "WARNING";
pub const ERROR: &str = "ERROR";
pub const CRITICAL: &str = "CRITICAL";

/// Level used by the zero-configuration output
pub const DEFAULT_LEVEL: &str = INFO;

const BUILTIN_LEVELS: [(&str, u32, Color); 7] = [
    (TRACE, 5, Color::Cyan),
    (DEBUG, 10, Color::Blue),
    (INFO, 20, Color::White),
    (SUCCESS, 25, Color::Green),
    (WARNING, 30, Color::Yellow),
    (ERROR, 40, Color::Red),
    (CRITICAL, 50, Color::BrightRed),
];

/// A named severity with its numeric rank and display color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    name: String,
    rank: u32,
    color: Color,
}

impl Level {
    pub fn new(name: impl AsRef<str>, rank: u32, color: Color) -> Self {
        Self {
            name: normalize(name.as_ref()),
            rank,
            color,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether a record at this level passes a sink filtered at `threshold`
    #[inline]
    pub fn passes(&self, threshold: u32) -> bool {
        self.rank >= threshold
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A level reference as given by configuration: a registered name or a raw rank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSpec {
    Rank(u32),
    Name(String),
}

impl Default for LevelSpec {
    fn default() -> Self {
        LevelSpec::Name(DEFAULT_LEVEL.to_string())
    }
}

impl fmt::Display for LevelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelSpec::Rank(rank) => write!(f, "{}", rank),
            LevelSpec::Name(name) => f.write_str(name),
        }
    }
}

impl From<&str> for LevelSpec {
    fn from(name: &str) -> Self {
        LevelSpec::Name(name.to_string())
    }
}

impl From<String> for LevelSpec {
    fn from(name: String) -> Self {
        LevelSpec::Name(name)
    }
}

impl From<u32> for LevelSpec {
    fn from(rank: u32) -> Self {
        LevelSpec::Rank(rank)
    }
}

impl From<&Level> for LevelSpec {
    fn from(level: &Level) -> Self {
        LevelSpec::Name(level.name.clone())
    }
}

/// Upper-cases a level name and folds the `WARN` alias onto `WARNING`
fn normalize(name: &str) -> String {
    let upper = name.trim().to_uppercase();
    if upper == "WARN" {
        WARNING.to_string()
    } else {
        upper
    }
}

/// Ordered set of known levels, in registration order
#[derive(Debug, Clone)]
pub struct LevelRegistry {
    levels: Vec<Level>,
}

impl LevelRegistry {
    /// Create a registry holding the built-in levels
    pub fn new() -> Self {
        Self {
            levels: BUILTIN_LEVELS
                .iter()
                .map(|(name, rank, color)| Level::new(name, *rank, *color))
                .collect(),
        }
    }

    /// Register a new level
    ///
    /// Names are unique case-insensitively. Ranks may repeat.
    pub fn add_level(&mut self, name: &str, rank: u32, color: Color) -> Result<Level> {
        let normalized = normalize(name);
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(LoggerError::other(format!(
                "Invalid level name '{}': must be a non-empty word",
                name
            )));
        }
        if self.find(&normalized).is_some() {
            return Err(LoggerError::duplicate_level(normalized));
        }

        let level = Level {
            name: normalized,
            rank,
            color,
        };
        self.levels.push(level.clone());
        Ok(level)
    }

    /// Look up a level by name (case-insensitive)
    pub fn resolve(&self, name: &str) -> Result<Level> {
        self.find(&normalize(name))
            .cloned()
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    /// Resolve a configured level reference to a filter threshold rank
    pub fn threshold(&self, spec: &LevelSpec) -> Result<u32> {
        match spec {
            LevelSpec::Rank(rank) => Ok(*rank),
            LevelSpec::Name(name) => self.resolve(name).map(|level| level.rank),
        }
    }

    /// Width of the longest level name, used to align the level column
    pub fn max_name_width(&self) -> usize {
        self.levels
            .iter()
            .map(|level| level.name.chars().count())
            .max()
            .unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(&normalize(name)).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    fn find(&self, normalized: &str) -> Option<&Level> {
        self.levels.iter().find(|level| level.name == normalized)
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
