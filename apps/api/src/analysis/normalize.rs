//! Text normalization for case-insensitive matching.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_ALPHA_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{Alphabetic}{3,}").unwrap());

/// Lower-cased view of a piece of free text.
///
/// Normalizing already-normalized text yields the same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    lowered: String,
}

impl NormalizedText {
    pub fn new(raw: &str) -> Self {
        Self {
            lowered: raw.to_lowercase(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.lowered
    }

    /// Case-insensitive substring check. `needle` may be in any case.
    pub fn contains(&self, needle: &str) -> bool {
        self.lowered.contains(&needle.to_lowercase())
    }

    pub fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.contains(n))
    }

    /// How many of `needles` occur at least once.
    pub fn count_present(&self, needles: &[&str]) -> usize {
        needles.iter().filter(|n| self.contains(n)).count()
    }

    /// Alphabetic runs of at least three characters, in order of appearance.
    pub fn tokens(&self) -> Vec<&str> {
        RE_ALPHA_RUN
            .find_iter(&self.lowered)
            .map(|m| m.as_str())
            .collect()
    }
}
