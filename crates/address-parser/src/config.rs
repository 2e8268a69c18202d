//! Parser configuration: delimiters, optional city hints, dedupe. Loaded from env by the caller.

use anyhow::Result;
use std::env;

/// Delimiters used when `ADDRESS_DELIMITERS` is not set. Line breaks always split.
pub const DEFAULT_DELIMITERS: [char; 2] = [',', ';'];

/// How message text is cut into address fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Characters that split a line into fragments, in addition to line breaks and `|`.
    pub delimiters: Vec<char>,
    /// When non-empty, each line (or `|` segment) is one fragment, kept only if it mentions one of
    /// these places and cut to start at the match. Delimiters are not applied in this mode.
    pub city_hints: Vec<String>,
    /// Abbreviations removed from fragments when they start a word, e.g. `м.` (city) or `р.` (district).
    pub strip_tokens: Vec<String>,
    /// Drop repeated fragments, keeping the first occurrence.
    pub dedupe: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            city_hints: Vec::new(),
            strip_tokens: Vec::new(),
            dedupe: false,
        }
    }
}

impl ParserConfig {
    /// Load from env: ADDRESS_DELIMITERS (every char is a delimiter; empty means lines only),
    /// ADDRESS_CITY_HINTS and ADDRESS_STRIP_TOKENS (comma-separated), ADDRESS_DEDUPE (bool).
    pub fn from_env() -> Result<Self> {
        let delimiters = match env::var("ADDRESS_DELIMITERS") {
            Ok(s) => s.chars().filter(|c| !c.is_whitespace()).collect(),
            Err(_) => DEFAULT_DELIMITERS.to_vec(),
        };
        let city_hints = list_var("ADDRESS_CITY_HINTS");
        let strip_tokens = list_var("ADDRESS_STRIP_TOKENS");
        let dedupe = match env::var("ADDRESS_DEDUPE") {
            Ok(s) => s
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("ADDRESS_DEDUPE must be true or false, got: {}", s))?,
            Err(_) => false,
        };
        Ok(Self {
            delimiters,
            city_hints,
            strip_tokens,
            dedupe,
        })
    }
}

fn list_var(name: &str) -> Vec<String> {
    env::var(name)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
