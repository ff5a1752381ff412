//! Block-word censoring applied to revision text before it is diffed.
//!
//! The block list is a whitespace or comma separated set of words. A `*` in a
//! word matches any run of word characters, so `spam*` also blocks `spammer`.
//! Matching is case-insensitive and limited to whole words; each match is
//! replaced by one `*` per character.

use regex::Regex;

use crate::error::CoreError;

/// A compiled block-word list.
#[derive(Debug, Clone, Default)]
pub struct BlockWords {
    pattern: Option<Regex>,
}

impl BlockWords {
    /// Compile a block list such as `"spam, scam*  *bot"`.
    pub fn parse(list: &str) -> Result<Self, CoreError> {
        let alternatives: Vec<String> = list
            .split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|w| !w.is_empty() && w.chars().any(|c| c != '*'))
            .map(|w| {
                w.split('*')
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\w*")
            })
            .collect();

        if alternatives.is_empty() {
            return Ok(Self::default());
        }

        let pattern = format!(r"(?i)\b(?:{})\b", alternatives.join("|"));
        let regex = Regex::new(&pattern)
            .map_err(|e| CoreError::Validation(format!("Invalid block word list: {e}")))?;
        Ok(Self {
            pattern: Some(regex),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }

    /// Mask every blocked word in `text`.
    pub fn apply(&self, text: &str) -> String {
        match &self.pattern {
            Some(regex) => regex
                .replace_all(text, |caps: &regex::Captures| {
                    "*".repeat(caps[0].chars().count())
                })
                .into_owned(),
            None => text.to_string(),
        }
    }
}
