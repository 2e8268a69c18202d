//! Splitting message text into address fragments.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::address_list::{AddressList, RESERVED_SEPARATOR};
use crate::config::ParserConfig;
use crate::error::AddressError;

/// Parses `text` with the default config: split on line breaks, `,`, `;` and `|`, trim, drop empties.
pub fn parse_addresses(text: &str) -> Result<AddressList, AddressError> {
    AddressParser::default().parse(text)
}

/// Reusable parser holding its config and the compiled city-hint pattern.
#[derive(Debug, Clone)]
pub struct AddressParser {
    config: ParserConfig,
    hint_pattern: Option<Regex>,
    strip_pattern: Option<Regex>,
}

impl Default for AddressParser {
    fn default() -> Self {
        Self {
            config: ParserConfig::default(),
            hint_pattern: None,
            strip_pattern: None,
        }
    }
}

/// One case-insensitive alternation of the literal `items`; None when empty.
fn alternation(prefix: &str, items: &[String]) -> Result<Option<Regex>, AddressError> {
    if items.is_empty() {
        return Ok(None);
    }
    let alternatives: Vec<String> = items.iter().map(|h| regex::escape(h)).collect();
    let pattern = format!("(?i){}(?:{})", prefix, alternatives.join("|"));
    Regex::new(&pattern)
        .map(Some)
        .map_err(|e| AddressError::InvalidHints(e.to_string()))
}

impl AddressParser {
    /// Compiles the city hints and strip tokens (if any) into case-insensitive patterns.
    pub fn new(config: ParserConfig) -> Result<Self, AddressError> {
        let hint_pattern = alternation("", &config.city_hints)?;
        let strip_pattern = alternation(r"\b", &config.strip_tokens)?;
        Ok(Self {
            config,
            hint_pattern,
            strip_pattern,
        })
    }

    /// Splits `text` into an ordered [`AddressList`].
    ///
    /// Fails with [`AddressError::EmptyInput`] when no fragment survives trimming and hint filtering.
    pub fn parse(&self, text: &str) -> Result<AddressList, AddressError> {
        let mut seen = HashSet::new();
        let mut fragments = Vec::new();

        for line in text.lines() {
            for segment in line.split(RESERVED_SEPARATOR) {
                for raw in self.split_segment(segment) {
                    let Some(hinted) = self.apply_hint(raw.trim()) else {
                        continue;
                    };
                    let fragment = self.strip_tokens(hinted);
                    if fragment.is_empty() {
                        continue;
                    }
                    if self.config.dedupe && !seen.insert(fragment.clone()) {
                        continue;
                    }
                    fragments.push(fragment);
                }
            }
        }

        debug!(
            fragments = fragments.len(),
            dedupe = self.config.dedupe,
            hints = self.config.city_hints.len(),
            "Parsed address fragments"
        );

        AddressList::new(fragments)
    }

    /// With city hints a segment is one address (`Київ, вул. Хрещатик 1`); otherwise it is split on
    /// the configured delimiters.
    fn split_segment<'a>(&self, segment: &'a str) -> Vec<&'a str> {
        if self.hint_pattern.is_some() {
            vec![segment]
        } else {
            segment
                .split(|c| self.config.delimiters.contains(&c))
                .collect()
        }
    }

    fn strip_tokens(&self, fragment: &str) -> String {
        let Some(pattern) = &self.strip_pattern else {
            return fragment.to_string();
        };
        let stripped = pattern.replace_all(fragment, " ");
        let collapsed: Vec<&str> = stripped.split_whitespace().collect();
        collapsed
            .join(" ")
            .trim_matches(|c: char| c.is_whitespace() || c == ',')
            .to_string()
    }

    /// Without hints the fragment passes through. With hints it is cut to start at the first match,
    /// or dropped when nothing matches.
    fn apply_hint<'a>(&self, fragment: &'a str) -> Option<&'a str> {
        let Some(pattern) = &self.hint_pattern else {
            return Some(fragment);
        };
        let m = pattern.find(fragment)?;
        Some(fragment[m.start()..].trim_matches(|c: char| c.is_whitespace() || c == ','))
    }
}
