//! Score extraction from advisor reports
//!
//! Advisors talk in plain text. Every report that carries a number ends with
//! a `(score N)` marker; this module pulls it back out. Anything that does
//! not yield a number in [0,1] is treated as "no data".

use regex::Regex;

use crate::error::Result;

/// Compiled patterns for reading advisor reports
#[derive(Debug, Clone)]
pub struct ReportParser {
    score: Regex,
}

impl ReportParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            score: Regex::new(r"(?i)\(\s*score\s*[:=]?\s*(-?[0-9]+(?:\.[0-9]+)?)\s*\)")?,
        })
    }

    /// Extract the last `(score N)` figure in the text
    pub fn parse_score(&self, text: &str) -> Option<f64> {
        let caps = self.score.captures_iter(text).last()?;
        let value: f64 = caps.get(1)?.as_str().parse().ok()?;
        if (0.0..=1.0).contains(&value) {
            Some(value)
        } else {
            None
        }
    }
}
