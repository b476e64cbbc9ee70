//! Word filtering module
//!
//! Normalizes raw word-list lines and decides which of them fall inside the
//! configured length range.

use crate::error::{Error, Result};
use regex::Regex;

/// Default minimum word length for the dictionary filter
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Default maximum word length for the dictionary filter
pub const DEFAULT_MAX_LENGTH: usize = 8;

/// Inclusive word-length bounds, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthRange {
    pub min: usize,
    pub max: usize,
}

impl LengthRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, length: usize) -> bool {
        length >= self.min && length <= self.max
    }

    /// A range with `min > max` can never accept anything.
    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

impl Default for LengthRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_LENGTH, DEFAULT_MAX_LENGTH)
    }
}

/// Keep only the alphabetic characters of `line` and lowercase them.
///
/// "Alphabetic" is the Unicode `Alphabetic` property, which also covers
/// letter numbers such as `Ⅻ` and combining vowel signs.
pub fn normalize_word(line: &str) -> String {
    let letters: String = line.chars().filter(|c| c.is_alphabetic()).collect();
    letters.to_lowercase()
}

/// Outcome of checking a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted(String),
    /// Nothing alphabetic was left after normalization
    Empty,
    TooShort,
    TooLong,
    PatternMismatch,
}

/// Filter configuration
#[derive(Debug, Clone)]
pub struct FilterConfig {
    range: LengthRange,
    /// Optional regex the normalized word must match
    pattern: Option<Regex>,
}

impl FilterConfig {
    /// Create a new filter configuration
    pub fn new(range: LengthRange, pattern: Option<&str>) -> Result<Self> {
        let pattern = match pattern {
            Some(p) if !p.is_empty() => Some(compile_pattern(p)?),
            _ => None,
        };

        Ok(Self { range, pattern })
    }

    pub fn range(&self) -> LengthRange {
        self.range
    }

    pub fn pattern_str(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Normalize `line` and decide what happens to it
    pub fn classify(&self, line: &str) -> Verdict {
        let word = normalize_word(line);
        let length = if word.is_ascii() {
            word.len()
        } else {
            word.chars().count()
        };

        if !self.range.contains(length) {
            return if length == 0 {
                Verdict::Empty
            } else if length < self.range.min {
                Verdict::TooShort
            } else {
                Verdict::TooLong
            };
        }

        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(&word) {
                return Verdict::PatternMismatch;
            }
        }

        Verdict::Accepted(word)
    }

    /// Normalized word if the line passes the filter
    #[inline]
    pub fn accept(&self, line: &str) -> Option<String> {
        match self.classify(line) {
            Verdict::Accepted(word) => Some(word),
            _ => None,
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Helper to validate a regex pattern before use
pub fn validate_pattern(pattern: &str) -> Result<()> {
    compile_pattern(pattern)?;
    Ok(())
}
