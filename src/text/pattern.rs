//! Pattern-matcher capability for text search
//!
//! The search cursor depends only on the narrow [`Pattern`] trait: given a
//! run source and a scan origin, produce a matched char range or nothing.
//! What constitutes a match (case folding, style sensitivity) is entirely
//! the matcher's business.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::source::RunSource;

/// Errors raised while constructing a pattern
#[derive(Debug, Error)]
pub enum PatternError {
    /// Regular expression failed to compile
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    /// The search needle is empty
    #[error("search pattern is empty")]
    EmptyNeedle,
}

/// A matched char range (end exclusive)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchRange {
    pub begin: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(begin: usize, end: usize) -> Self {
        Self { begin, end }
    }
}

/// Matcher capability consumed by the search cursor
pub trait Pattern {
    /// Earliest match whose begin offset is at or after `from`
    fn find_forward(&self, source: &RunSource<'_>, from: usize) -> Option<MatchRange>;

    /// Latest match whose end offset is at or before `limit`
    fn find_backward(&self, source: &RunSource<'_>, limit: usize) -> Option<MatchRange>;
}

/// Literal-text matcher with optional case folding and style restriction
#[derive(Debug, Clone)]
pub struct LiteralPattern {
    needle: Vec<char>,
    fold_case: bool,
    required_style: Option<String>,
}

impl LiteralPattern {
    /// Case-sensitive literal matcher
    pub fn new(needle: &str) -> Result<Self, PatternError> {
        Self::build(needle, false)
    }

    /// Case-insensitive literal matcher (simple case fold)
    pub fn case_insensitive(needle: &str) -> Result<Self, PatternError> {
        Self::build(needle, true)
    }

    /// Restrict matches to text covered by the given style
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.required_style = Some(style.into());
        self
    }

    fn build(needle: &str, fold_case: bool) -> Result<Self, PatternError> {
        if needle.is_empty() {
            return Err(PatternError::EmptyNeedle);
        }
        let needle = if fold_case {
            needle.chars().map(fold_char).collect()
        } else {
            needle.chars().collect()
        };
        Ok(Self {
            needle,
            fold_case,
            required_style: None,
        })
    }

    fn matches_at(&self, source: &RunSource<'_>, at: usize) -> bool {
        for (i, &nc) in self.needle.iter().enumerate() {
            let sc = match source.char_at(at + i) {
                Some(c) => c,
                None => return false,
            };
            let sc = if self.fold_case { fold_char(sc) } else { sc };
            if sc != nc {
                return false;
            }
            if let Some(style) = &self.required_style {
                if source.style_at(at + i) != Some(style.as_str()) {
                    return false;
                }
            }
        }
        true
    }

    fn last_begin(&self, source: &RunSource<'_>, limit: usize) -> Option<usize> {
        limit.min(source.char_len()).checked_sub(self.needle.len())
    }
}

impl Pattern for LiteralPattern {
    fn find_forward(&self, source: &RunSource<'_>, from: usize) -> Option<MatchRange> {
        let last = self.last_begin(source, source.char_len())?;
        (from..=last)
            .find(|&at| self.matches_at(source, at))
            .map(|at| MatchRange::new(at, at + self.needle.len()))
    }

    fn find_backward(&self, source: &RunSource<'_>, limit: usize) -> Option<MatchRange> {
        let last = self.last_begin(source, limit)?;
        (0..=last)
            .rev()
            .find(|&at| self.matches_at(source, at))
            .map(|at| MatchRange::new(at, at + self.needle.len()))
    }
}

/// Regex matcher backed by the `regex` crate
///
/// The regex engine reports byte offsets; results are converted to char
/// offsets before they reach the cursor.
#[derive(Debug, Clone)]
pub struct RegexPattern {
    re: regex::Regex,
}

impl RegexPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            re: regex::Regex::new(pattern)?,
        })
    }

    fn to_char_range(&self, source: &RunSource<'_>, m: regex::Match<'_>) -> MatchRange {
        MatchRange::new(source.byte_to_char(m.start()), source.byte_to_char(m.end()))
    }
}

impl Pattern for RegexPattern {
    fn find_forward(&self, source: &RunSource<'_>, from: usize) -> Option<MatchRange> {
        let byte_from = source.char_to_byte(from);
        self.re
            .find_at(source.as_str(), byte_from)
            .map(|m| self.to_char_range(source, m))
    }

    fn find_backward(&self, source: &RunSource<'_>, limit: usize) -> Option<MatchRange> {
        let byte_limit = source.char_to_byte(limit);
        self.re
            .find_iter(source.as_str())
            .take_while(|m| m.end() <= byte_limit)
            .last()
            .map(|m| self.to_char_range(source, m))
    }
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
